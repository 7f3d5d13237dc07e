use crate::{
    animation::ease::Ease,
    animation::spring::{SpringConfig, SpringParams, spring},
    composition::model::TransitionSpec,
    foundation::core::{Canvas, Fps, Point, Rect, Vec2},
    foundation::error::{ReelError, ReelResult},
    timeline::timing::TransitionWindow,
};

/// Edge a transition enters from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Enter from the left edge.
    #[default]
    FromLeft,
    /// Enter from the right edge.
    FromRight,
    /// Enter from the top edge.
    FromTop,
    /// Enter from the bottom edge.
    FromBottom,
}

impl Direction {
    fn parse(s: &str) -> ReelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "from_left" | "fromleft" | "left_to_right" | "lefttoright" | "ltr" => {
                Ok(Self::FromLeft)
            }
            "from_right" | "fromright" | "right_to_left" | "righttoleft" | "rtl" => {
                Ok(Self::FromRight)
            }
            "from_top" | "fromtop" | "top_to_bottom" | "toptobottom" | "ttb" => {
                Ok(Self::FromTop)
            }
            "from_bottom" | "frombottom" | "bottom_to_top" | "bottomtotop" | "btt" => {
                Ok(Self::FromBottom)
            }
            other => Err(ReelError::validation(format!(
                "unknown transition direction '{other}'"
            ))),
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Self::FromLeft | Self::FromRight)
    }

    /// Unit vector pointing from the entry edge into the canvas.
    fn travel(self) -> Vec2 {
        match self {
            Self::FromLeft => Vec2::new(1.0, 0.0),
            Self::FromRight => Vec2::new(-1.0, 0.0),
            Self::FromTop => Vec2::new(0.0, 1.0),
            Self::FromBottom => Vec2::new(0.0, -1.0),
        }
    }
}

/// Parsed transition effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionKind {
    /// Hard cut at the end of the overlap.
    None,
    /// Entering scene fades in over the exiting one.
    Fade {
        /// Also fade the exiting scene out.
        fade_exiting: bool,
    },
    /// Entering scene pushes the exiting one off canvas.
    Slide {
        /// Entry edge.
        direction: Direction,
    },
    /// Entering scene is revealed by a growing rectangle.
    Wipe {
        /// Entry edge.
        direction: Direction,
    },
    /// Both scenes rotate in 3D like a card.
    Flip {
        /// Entry edge; horizontal directions rotate about Y, vertical about X. The rotation
        /// sense is the same for every edge.
        direction: Direction,
    },
    /// Entering scene is revealed by a clockwise sector from 12 o'clock.
    ClockWipe,
}

/// Progress curve of a transition over its overlap window.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionTiming {
    /// Eased linear progress.
    Linear {
        /// Easing applied to the linear progress.
        #[serde(default)]
        ease: Ease,
    },
    /// Spring stretched over the window.
    Spring {
        /// Spring physics.
        #[serde(default)]
        config: SpringConfig,
    },
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self::Linear { ease: Ease::Linear }
    }
}

impl TransitionTiming {
    /// Validate easing or spring parameters.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Linear { ease } => ease.validate(),
            Self::Spring { config } => config.validate(),
        }
    }

    /// Progress in `[0, 1]` at the window offset; 0 on the first overlapped frame and 1 on the last.
    pub fn progress(&self, window: TransitionWindow, fps: Fps) -> ReelResult<f64> {
        let denom = window.duration.saturating_sub(1);
        if denom == 0 || window.offset >= denom {
            return Ok(1.0);
        }
        let p = match self {
            Self::Linear { ease } => ease.apply(window.offset as f64 / denom as f64),
            Self::Spring { config } => spring(
                window.offset as f64,
                fps,
                SpringParams {
                    config: *config,
                    duration_in_frames: Some(denom as f64),
                    ..SpringParams::default()
                },
            )?,
        };
        Ok(p.clamp(0.0, 1.0))
    }
}

/// Parse a transition spec into a [`TransitionKind`].
pub fn parse_transition(spec: &TransitionSpec) -> ReelResult<TransitionKind> {
    let kind = spec.kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(ReelError::validation("transition kind must be non-empty"));
    }
    let params = if spec.params.is_null() {
        None
    } else {
        Some(
            spec.params
                .as_object()
                .ok_or_else(|| ReelError::validation("transition params must be an object"))?,
        )
    };
    let direction = || -> ReelResult<Direction> {
        match params.and_then(|p| p.get("direction")) {
            None => Ok(Direction::default()),
            Some(v) => v
                .as_str()
                .ok_or_else(|| ReelError::validation("transition direction must be a string"))
                .and_then(Direction::parse),
        }
    };

    match kind.as_str() {
        "none" | "cut" => Ok(TransitionKind::None),
        "fade" | "crossfade" => {
            let fade_exiting = match params.and_then(|p| p.get("fade_exiting")) {
                None => kind == "crossfade",
                Some(v) => v.as_bool().ok_or_else(|| {
                    ReelError::validation("fade.fade_exiting must be a boolean")
                })?,
            };
            Ok(TransitionKind::Fade { fade_exiting })
        }
        "slide" => Ok(TransitionKind::Slide {
            direction: direction()?,
        }),
        "wipe" => Ok(TransitionKind::Wipe {
            direction: direction()?,
        }),
        "flip" => Ok(TransitionKind::Flip {
            direction: direction()?,
        }),
        "clock_wipe" | "clockwipe" => Ok(TransitionKind::ClockWipe),
        _ => Err(ReelError::validation(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

/// Axis of a 3D flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    /// Rotate about the vertical axis.
    Y,
    /// Rotate about the horizontal axis.
    X,
}

/// 3D rotation applied to a layer around the canvas center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Flip3d {
    /// Rotation axis.
    pub axis: FlipAxis,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Perspective distance in pixels.
    pub perspective_px: f64,
    /// Hide the layer while it faces away from the viewer.
    pub backface_hidden: bool,
}

/// Clip region applied to a layer, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ClipShape {
    /// Axis-aligned rectangle.
    Rect {
        /// Visible rectangle.
        rect: Rect,
    },
    /// Circular sector.
    Sector {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Start angle in degrees, clockwise from 3 o'clock.
        start_deg: f64,
        /// Clockwise sweep in degrees.
        sweep_deg: f64,
    },
}

/// How one scene layer is presented during a transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PresentationStyle {
    /// Layer opacity.
    pub opacity: f64,
    /// Layer translation in pixels.
    pub translate: Vec2,
    /// 3D flip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip: Option<Flip3d>,
    /// Clip region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<ClipShape>,
}

impl Default for PresentationStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate: Vec2::ZERO,
            flip: None,
            clip: None,
        }
    }
}

const FLIP_PERSPECTIVE_PX: f64 = 1000.0;

/// Resolve the `(exiting, entering)` presentation at progress `p`.
pub fn present(
    kind: TransitionKind,
    p: f64,
    canvas: Canvas,
) -> (PresentationStyle, PresentationStyle) {
    let p = p.clamp(0.0, 1.0);
    let size = canvas.size();
    let still = PresentationStyle::default();

    match kind {
        TransitionKind::None => {
            let entering = PresentationStyle {
                opacity: if p >= 1.0 { 1.0 } else { 0.0 },
                ..still
            };
            (still, entering)
        }
        TransitionKind::Fade { fade_exiting } => {
            let exiting = PresentationStyle {
                opacity: if fade_exiting { 1.0 - p } else { 1.0 },
                ..still
            };
            let entering = PresentationStyle {
                opacity: p,
                ..still
            };
            (exiting, entering)
        }
        TransitionKind::Slide { direction } => {
            let travel = direction.travel();
            let span = Vec2::new(travel.x * size.x, travel.y * size.y);
            let exiting = PresentationStyle {
                translate: span * p,
                ..still
            };
            let entering = PresentationStyle {
                translate: -span * (1.0 - p),
                ..still
            };
            (exiting, entering)
        }
        TransitionKind::Wipe { direction } => {
            let (w, h) = (size.x, size.y);
            let rect = match direction {
                Direction::FromLeft => Rect::new(0.0, 0.0, w * p, h),
                Direction::FromRight => Rect::new(w * (1.0 - p), 0.0, w, h),
                Direction::FromTop => Rect::new(0.0, 0.0, w, h * p),
                Direction::FromBottom => Rect::new(0.0, h * (1.0 - p), w, h),
            };
            let entering = PresentationStyle {
                clip: Some(ClipShape::Rect { rect }),
                ..still
            };
            (still, entering)
        }
        TransitionKind::Flip { direction } => {
            let axis = if direction.is_horizontal() {
                FlipAxis::Y
            } else {
                FlipAxis::X
            };
            let flip = |rotation_deg: f64| Flip3d {
                axis,
                rotation_deg,
                perspective_px: FLIP_PERSPECTIVE_PX,
                backface_hidden: true,
            };
            let exiting = PresentationStyle {
                flip: Some(flip(-180.0 * p)),
                ..still
            };
            let entering = PresentationStyle {
                flip: Some(flip(180.0 * (1.0 - p))),
                ..still
            };
            (exiting, entering)
        }
        TransitionKind::ClockWipe => {
            let entering = PresentationStyle {
                clip: Some(ClipShape::Sector {
                    center: canvas.center(),
                    radius: size.hypot() * 0.5,
                    start_deg: -90.0,
                    sweep_deg: 360.0 * p,
                }),
                ..still
            };
            (still, entering)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
