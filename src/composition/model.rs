use std::{collections::BTreeMap, collections::BTreeSet, path::Path};

use crate::{
    animation::motion::Motion,
    animation::spring::SpringConfig,
    assets::refs::{AssetKind, AssetRef},
    audio::manifest::AudioTrack,
    effects::transitions::{TransitionTiming, parse_transition},
    foundation::core::{Canvas, Fps, Rgba8, Vec2, VideoConfig},
    foundation::error::{ReelError, ReelResult},
    timeline::timing::SceneTiming,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete scene-sequence composition.
///
/// A composition is a pure data model that can be:
/// - built programmatically (see [`crate::CompositionBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// Its timeline length is derived from the scene durations and the transition overlaps; see
/// [`Composition::duration_frames`].
pub struct Composition {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Shared colors, font and spacing.
    #[serde(default)]
    pub theme: Theme,
    /// Asset table keyed by stable user-facing asset keys.
    #[serde(default)]
    pub assets: BTreeMap<String, AssetRef>,
    /// Ordered scenes.
    pub scenes: Vec<SceneDef>,
    /// Transition between scene `i` and `i + 1`; exactly `scenes.len() - 1` entries.
    #[serde(default)]
    pub transitions: Vec<TransitionSpec>,
    /// Static audio tracks.
    #[serde(default)]
    pub audio: Vec<AudioTrack>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Shared visual styling.
pub struct Theme {
    /// Scene background fill.
    #[serde(default = "default_background")]
    pub background: Rgba8,
    /// Primary text color.
    #[serde(default = "default_foreground")]
    pub foreground: Rgba8,
    /// Secondary text color.
    #[serde(default = "default_muted")]
    pub muted: Rgba8,
    /// Primary accent color.
    #[serde(default = "default_accent")]
    pub accent: Rgba8,
    /// Secondary accent color.
    #[serde(default = "default_accent_alt")]
    pub accent_alt: Rgba8,
    /// Font family passed through to text nodes.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Scene content padding in pixels.
    #[serde(default = "default_padding")]
    pub padding: Edges,
    /// Vertical gap between stacked blocks.
    #[serde(default = "default_block_gap_px")]
    pub block_gap_px: f64,
}

fn default_background() -> Rgba8 {
    Rgba8::rgb(0x0b, 0x0d, 0x17)
}

fn default_foreground() -> Rgba8 {
    Rgba8::rgb(0xf5, 0xf7, 0xff)
}

fn default_muted() -> Rgba8 {
    Rgba8::rgb(0x9a, 0xa3, 0xc7)
}

fn default_accent() -> Rgba8 {
    Rgba8::rgb(0x7c, 0x5c, 0xff)
}

fn default_accent_alt() -> Rgba8 {
    Rgba8::rgb(0x22, 0xd3, 0xee)
}

fn default_font_family() -> String {
    "Inter".to_string()
}

fn default_padding() -> Edges {
    Edges {
        left: 160.0,
        right: 160.0,
        top: 120.0,
        bottom: 120.0,
    }
}

fn default_block_gap_px() -> f64 {
    36.0
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
            muted: default_muted(),
            accent: default_accent(),
            accent_alt: default_accent_alt(),
            font_family: default_font_family(),
            padding: default_padding(),
            block_gap_px: default_block_gap_px(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq)]
/// Padding edges in pixels.
pub struct Edges {
    /// Left padding.
    #[serde(default)]
    pub left: f64,
    /// Right padding.
    #[serde(default)]
    pub right: f64,
    /// Top padding.
    #[serde(default)]
    pub top: f64,
    /// Bottom padding.
    #[serde(default)]
    pub bottom: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One fixed-duration segment of the video.
pub struct SceneDef {
    /// Scene identifier (unique within a composition).
    pub id: String,
    /// Scene length in frames, including transition overlaps.
    pub duration_frames: u64,
    /// Shared entrance/exit motion and background glow.
    #[serde(default)]
    pub shell: ShellStyle,
    /// Content blocks, stacked top to bottom.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Entrance/exit motion shared by every scene.
pub struct ShellStyle {
    /// Frames for the content fade-in.
    #[serde(default = "default_entrance_frames")]
    pub entrance_frames: u64,
    /// Initial downward offset of the content, springing back to 0.
    #[serde(default = "default_entrance_offset_px")]
    pub entrance_offset_px: f64,
    /// Initial content scale, springing back to 1.
    #[serde(default = "default_start_scale")]
    pub start_scale: f64,
    /// Frames for the fade-out at the scene end; 0 disables it.
    #[serde(default)]
    pub exit_frames: u64,
    /// Background glow, if any.
    #[serde(default = "default_glow", skip_serializing_if = "Option::is_none")]
    pub glow: Option<GlowStyle>,
}

fn default_entrance_frames() -> u64 {
    20
}

fn default_entrance_offset_px() -> f64 {
    40.0
}

fn default_start_scale() -> f64 {
    0.96
}

fn default_glow() -> Option<GlowStyle> {
    Some(GlowStyle::default())
}

impl Default for ShellStyle {
    fn default() -> Self {
        Self {
            entrance_frames: default_entrance_frames(),
            entrance_offset_px: default_entrance_offset_px(),
            start_scale: default_start_scale(),
            exit_frames: 0,
            glow: default_glow(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Pulsing radial glow drawn behind scene content.
pub struct GlowStyle {
    /// Glow color; `None` uses the theme accent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// Glow center as a fraction of the canvas size.
    #[serde(default = "default_glow_center")]
    pub center: Vec2,
    /// Glow radius in pixels.
    #[serde(default = "default_glow_radius_px")]
    pub radius_px: f64,
    /// Mean opacity.
    #[serde(default = "default_glow_base_opacity")]
    pub base_opacity: f64,
    /// Opacity swing around the mean.
    #[serde(default = "default_glow_pulse_amp")]
    pub pulse_amp: f64,
    /// Pulse frequency in Hz.
    #[serde(default = "default_glow_pulse_hz")]
    pub pulse_hz: f64,
    /// Horizontal drift amplitude in pixels.
    #[serde(default = "default_glow_drift_px")]
    pub drift_px: f64,
}

fn default_glow_center() -> Vec2 {
    Vec2::new(0.5, 0.45)
}

fn default_glow_radius_px() -> f64 {
    720.0
}

fn default_glow_base_opacity() -> f64 {
    0.35
}

fn default_glow_pulse_amp() -> f64 {
    0.1
}

fn default_glow_pulse_hz() -> f64 {
    0.25
}

fn default_glow_drift_px() -> f64 {
    60.0
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            color: None,
            center: default_glow_center(),
            radius_px: default_glow_radius_px(),
            base_opacity: default_glow_base_opacity(),
            pulse_amp: default_glow_pulse_amp(),
            pulse_hz: default_glow_pulse_hz(),
            drift_px: default_glow_drift_px(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Entrance animation preset.
pub enum EntranceStyle {
    /// Fade in while springing up and scaling to 1.
    #[default]
    Spring,
    /// Eased fade with a small upward slide.
    Fade,
    /// Spring scale from 0 with a light overshoot.
    Pop,
    /// Fade in while springing from a reduced scale.
    Zoom,
    /// No entrance animation.
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Entrance preset plus its start delay in scene-local frames.
pub struct Entrance {
    /// Animation preset.
    #[serde(default)]
    pub style: EntranceStyle,
    /// Delay in frames after scene start.
    #[serde(default)]
    pub delay: u64,
}

/// Sampled-ready motions produced by an [`Entrance`].
#[derive(Clone, Debug, PartialEq)]
pub struct EntranceMotions {
    /// Opacity in `[0, 1]`.
    pub opacity: Motion,
    /// Vertical offset in pixels.
    pub offset_y: Motion,
    /// Uniform scale.
    pub scale: Motion,
}

impl Entrance {
    /// Preset with zero delay.
    pub fn new(style: EntranceStyle) -> Self {
        Self { style, delay: 0 }
    }

    /// Spring preset (default for most blocks).
    pub fn spring() -> Self {
        Self::new(EntranceStyle::Spring)
    }

    /// Fade preset.
    pub fn fade() -> Self {
        Self::new(EntranceStyle::Fade)
    }

    /// Pop preset.
    pub fn pop() -> Self {
        Self::new(EntranceStyle::Pop)
    }

    /// Zoom preset.
    pub fn zoom() -> Self {
        Self::new(EntranceStyle::Zoom)
    }

    /// Same preset starting `delay` frames after scene start.
    pub fn with_delay(self, delay: u64) -> Self {
        Self { delay, ..self }
    }

    /// Expand the preset into concrete motions.
    pub fn motions(self) -> EntranceMotions {
        use crate::animation::ease::Ease;
        let d = self.delay;
        match self.style {
            EntranceStyle::Spring => EntranceMotions {
                opacity: Motion::tween(d, d.saturating_add(15), 0.0, 1.0, Ease::Linear),
                offset_y: Motion::spring(30.0, 0.0, SpringConfig::smooth(), d),
                scale: Motion::spring(0.92, 1.0, SpringConfig::smooth(), d),
            },
            EntranceStyle::Fade => EntranceMotions {
                opacity: Motion::tween(d, d.saturating_add(20), 0.0, 1.0, Ease::OutCubic),
                offset_y: Motion::tween(d, d.saturating_add(20), 20.0, 0.0, Ease::OutCubic),
                scale: Motion::constant(1.0),
            },
            EntranceStyle::Pop => EntranceMotions {
                opacity: Motion::tween(d, d.saturating_add(8), 0.0, 1.0, Ease::Linear),
                offset_y: Motion::constant(0.0),
                scale: Motion::spring(0.0, 1.0, SpringConfig::snappy(), d),
            },
            EntranceStyle::Zoom => EntranceMotions {
                opacity: Motion::tween(d, d.saturating_add(12), 0.0, 1.0, Ease::Linear),
                offset_y: Motion::constant(0.0),
                scale: Motion::spring(0.85, 1.0, SpringConfig::smooth(), d),
            },
            EntranceStyle::None => EntranceMotions {
                opacity: Motion::constant(1.0),
                offset_y: Motion::constant(0.0),
                scale: Motion::constant(1.0),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Presentational content fragment inside a scene.
pub enum Block {
    /// Large headline.
    Title(TextBlock),
    /// Secondary line under a title.
    Subtitle(TextBlock),
    /// Row of pill-shaped tags.
    TagChips(TagChipsBlock),
    /// Mock browser window framing a screenshot.
    BrowserWindow(BrowserWindowBlock),
    /// Mock application screenshot with shadow and slow zoom.
    AppScreenshot(AppScreenshotBlock),
    /// Two side-by-side block columns.
    TwoColumn(TwoColumnBlock),
    /// Row of workflow step cards joined by connectors.
    FlowDiagram(FlowDiagramBlock),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Title or subtitle text.
pub struct TextBlock {
    /// Text content.
    pub text: String,
    /// Font size in pixels; `None` uses the block kind default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_px: Option<f64>,
    /// Text color; `None` uses the theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// Entrance; `None` uses the block kind default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enter: Option<Entrance>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Tag chip row.
pub struct TagChipsBlock {
    /// Chip labels.
    pub tags: Vec<String>,
    /// Label font size.
    #[serde(default = "default_chip_size_px")]
    pub size_px: f64,
    /// Delay between consecutive chips.
    #[serde(default = "default_chip_stagger")]
    pub stagger_frames: u64,
    /// Entrance applied to each chip.
    #[serde(default = "Entrance::pop")]
    pub enter: Entrance,
}

fn default_chip_size_px() -> f64 {
    28.0
}

fn default_chip_stagger() -> u64 {
    6
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Browser window mock.
pub struct BrowserWindowBlock {
    /// URL shown in the address bar.
    pub url: String,
    /// Image asset key for the page content.
    pub content: String,
    /// Window width in pixels.
    pub width: f64,
    /// Window height in pixels, title bar included.
    pub height: f64,
    /// Entrance.
    #[serde(default = "Entrance::zoom")]
    pub enter: Entrance,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Application screenshot mock.
pub struct AppScreenshotBlock {
    /// Image asset key.
    pub asset: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Extra scale reached by the end of the scene.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Corner radius in pixels.
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,
    /// Entrance.
    #[serde(default = "Entrance::spring")]
    pub enter: Entrance,
}

fn default_zoom() -> f64 {
    0.05
}

fn default_corner_radius() -> f64 {
    18.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Two-column layout.
pub struct TwoColumnBlock {
    /// Left column blocks.
    pub left: Vec<Block>,
    /// Right column blocks.
    pub right: Vec<Block>,
    /// Fraction of the width given to the left column, in `(0, 1)`.
    #[serde(default = "default_split")]
    pub split: f64,
    /// Gap between columns in pixels.
    #[serde(default = "default_column_gap_px")]
    pub gap_px: f64,
    /// Delay of the column slide-in.
    #[serde(default)]
    pub delay: u64,
}

fn default_split() -> f64 {
    0.5
}

fn default_column_gap_px() -> f64 {
    64.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One card in a flow diagram.
pub struct FlowStep {
    /// Card headline.
    pub label: String,
    /// Optional smaller line under the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Workflow diagram.
pub struct FlowDiagramBlock {
    /// Steps from left to right.
    pub steps: Vec<FlowStep>,
    /// Card width in pixels.
    #[serde(default = "default_card_width")]
    pub card_width: f64,
    /// Card height in pixels.
    #[serde(default = "default_card_height")]
    pub card_height: f64,
    /// Horizontal space between cards, where connectors are drawn.
    #[serde(default = "default_connector_px")]
    pub connector_px: f64,
    /// Delay between consecutive cards.
    #[serde(default = "default_flow_stagger")]
    pub stagger_frames: u64,
    /// Entrance applied to each card.
    #[serde(default = "Entrance::pop")]
    pub enter: Entrance,
}

fn default_card_width() -> f64 {
    400.0
}

fn default_card_height() -> f64 {
    200.0
}

fn default_connector_px() -> f64 {
    96.0
}

fn default_flow_stagger() -> u64 {
    18
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Transition between two adjacent scenes.
pub struct TransitionSpec {
    /// Transition kind identifier (`fade`, `slide`, `wipe`, `flip`, `clock_wipe`, `none`).
    pub kind: String,
    /// Overlap between the two scenes in frames.
    pub duration_frames: u64,
    /// Progress curve over the overlap.
    #[serde(default)]
    pub timing: TransitionTiming,
    /// Transition parameter object.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl TransitionSpec {
    /// Transition of `kind` with linear timing and no params.
    pub fn new(kind: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            kind: kind.into(),
            duration_frames,
            timing: TransitionTiming::default(),
            params: serde_json::Value::Null,
        }
    }

    /// Replace the parameter object.
    pub fn with_params(self, params: serde_json::Value) -> Self {
        Self { params, ..self }
    }

    /// Replace the timing curve.
    pub fn with_timing(self, timing: TransitionTiming) -> Self {
        Self { timing, ..self }
    }

    /// Validate transition payload invariants.
    pub fn validate(&self) -> ReelResult<()> {
        if self.duration_frames == 0 {
            return Err(ReelError::validation(
                "transition duration_frames must be > 0",
            ));
        }
        if !(self.params.is_null() || self.params.is_object()) {
            return Err(ReelError::validation(
                "transition params must be an object when set",
            ));
        }
        self.timing.validate()?;
        parse_transition(self).map(|_| ())
    }
}

impl Composition {
    /// Parse a composition from JSON text.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a composition JSON file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReelError::Other(anyhow::Error::new(e).context(format!(
                "read composition '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&text)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Scene timing derived from durations and transition overlaps.
    pub fn timing(&self) -> ReelResult<SceneTiming> {
        let durations: Vec<u64> = self.scenes.iter().map(|s| s.duration_frames).collect();
        let overlaps: Vec<u64> = self.transitions.iter().map(|t| t.duration_frames).collect();
        SceneTiming::new(&durations, &overlaps)
    }

    /// Total timeline length in frames.
    pub fn duration_frames(&self) -> ReelResult<u64> {
        Ok(self.timing()?.total_frames())
    }

    /// Frame rate, canvas and duration as a single value.
    pub fn video_config(&self) -> ReelResult<VideoConfig> {
        Ok(VideoConfig {
            fps: self.fps,
            canvas: self.canvas,
            duration_in_frames: self.duration_frames()?,
        })
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<(usize, &SceneDef)> {
        self.scenes.iter().enumerate().find(|(_, s)| s.id == id)
    }

    /// Validate composition invariants and asset references.
    pub fn validate(&self) -> ReelResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ReelError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        self.theme.validate()?;
        let pad = self.theme.padding;
        if pad.left + pad.right >= f64::from(self.canvas.width)
            || pad.top + pad.bottom >= f64::from(self.canvas.height)
        {
            return Err(ReelError::validation(format!(
                "theme padding leaves no content area on a {}x{} canvas",
                self.canvas.width, self.canvas.height
            )));
        }

        for (key, asset) in &self.assets {
            if key.trim().is_empty() {
                return Err(ReelError::validation("asset key must be non-empty"));
            }
            asset.validate(key)?;
        }

        if self.scenes.is_empty() {
            return Err(ReelError::validation("composition needs at least one scene"));
        }
        let mut ids = BTreeSet::new();
        for scene in &self.scenes {
            if scene.id.trim().is_empty() {
                return Err(ReelError::validation("scene id must be non-empty"));
            }
            if !ids.insert(scene.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
            scene.validate(self)?;
        }

        if self.transitions.len() + 1 != self.scenes.len() {
            return Err(ReelError::validation(format!(
                "expected {} transitions for {} scenes, got {}",
                self.scenes.len() - 1,
                self.scenes.len(),
                self.transitions.len()
            )));
        }
        for (i, tr) in self.transitions.iter().enumerate() {
            tr.validate().map_err(|e| {
                e.context(format!(
                    "transition {i} ('{}' -> '{}')",
                    self.scenes[i].id,
                    self.scenes[i + 1].id
                ))
            })?;
        }
        self.timing()?;

        for track in &self.audio {
            track.validate()?;
            self.expect_asset(&track.asset, AssetKind::Audio, "audio track")?;
        }
        Ok(())
    }

    pub(crate) fn expect_asset(&self, key: &str, kind: AssetKind, what: &str) -> ReelResult<()> {
        match self.assets.get(key) {
            None => Err(ReelError::validation(format!(
                "{what} references missing asset key '{key}'"
            ))),
            Some(a) if a.kind != kind => Err(ReelError::validation(format!(
                "{what} expects a {kind:?} asset but '{key}' is {:?}",
                a.kind
            ))),
            Some(_) => Ok(()),
        }
    }
}

impl Theme {
    fn validate(&self) -> ReelResult<()> {
        for (name, value) in [
            ("left", self.padding.left),
            ("right", self.padding.right),
            ("top", self.padding.top),
            ("bottom", self.padding.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ReelError::validation(format!(
                    "theme padding.{name} must be finite and >= 0",
                )));
            }
        }
        if !self.block_gap_px.is_finite() || self.block_gap_px < 0.0 {
            return Err(ReelError::validation(
                "theme block_gap_px must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

impl SceneDef {
    fn validate(&self, comp: &Composition) -> ReelResult<()> {
        if self.duration_frames == 0 {
            return Err(ReelError::validation(format!(
                "scene '{}' duration_frames must be > 0",
                self.id
            )));
        }
        self.shell
            .validate()
            .map_err(|e| e.context(format!("scene '{}' shell", self.id)))?;
        for (i, block) in self.blocks.iter().enumerate() {
            block.validate(comp).map_err(|e| {
                e.context(format!("scene '{}' block {i} ({})", self.id, block.kind_name()))
            })?;
        }
        Ok(())
    }
}

impl ShellStyle {
    fn validate(&self) -> ReelResult<()> {
        if !self.entrance_offset_px.is_finite() {
            return Err(ReelError::validation("entrance_offset_px must be finite"));
        }
        positive_finite("start_scale", self.start_scale)?;
        if let Some(glow) = &self.glow {
            positive_finite("glow radius_px", glow.radius_px)?;
            for (name, v) in [
                ("glow center.x", glow.center.x),
                ("glow center.y", glow.center.y),
                ("glow base_opacity", glow.base_opacity),
                ("glow pulse_amp", glow.pulse_amp),
                ("glow pulse_hz", glow.pulse_hz),
                ("glow drift_px", glow.drift_px),
            ] {
                if !v.is_finite() {
                    return Err(ReelError::validation(format!("{name} must be finite")));
                }
            }
        }
        Ok(())
    }
}

impl Block {
    /// Title block with default styling.
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title(TextBlock::new(text))
    }

    /// Subtitle block with default styling.
    pub fn subtitle(text: impl Into<String>) -> Self {
        Self::Subtitle(TextBlock::new(text))
    }

    /// Tag chip row.
    pub fn tag_chips<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TagChips(TagChipsBlock {
            tags: tags.into_iter().map(Into::into).collect(),
            size_px: default_chip_size_px(),
            stagger_frames: default_chip_stagger(),
            enter: Entrance::pop(),
        })
    }

    /// Browser window around the image asset `content`.
    pub fn browser_window(
        url: impl Into<String>,
        content: impl Into<String>,
        width: f64,
        height: f64,
    ) -> Self {
        Self::BrowserWindow(BrowserWindowBlock {
            url: url.into(),
            content: content.into(),
            width,
            height,
            enter: Entrance::zoom(),
        })
    }

    /// Application screenshot of the image asset `asset`.
    pub fn app_screenshot(asset: impl Into<String>, width: f64, height: f64) -> Self {
        Self::AppScreenshot(AppScreenshotBlock {
            asset: asset.into(),
            width,
            height,
            zoom: default_zoom(),
            corner_radius: default_corner_radius(),
            enter: Entrance::spring(),
        })
    }

    /// Two-column layout with an even split.
    pub fn two_column(left: Vec<Block>, right: Vec<Block>) -> Self {
        Self::TwoColumn(TwoColumnBlock {
            left,
            right,
            split: default_split(),
            gap_px: default_column_gap_px(),
            delay: 0,
        })
    }

    /// Flow diagram with default card geometry.
    pub fn flow_diagram(steps: Vec<FlowStep>) -> Self {
        Self::FlowDiagram(FlowDiagramBlock {
            steps,
            card_width: default_card_width(),
            card_height: default_card_height(),
            connector_px: default_connector_px(),
            stagger_frames: default_flow_stagger(),
            enter: Entrance::pop(),
        })
    }

    /// Same block with its entrance delayed to `delay` frames after scene start.
    pub fn delayed(mut self, delay: u64) -> Self {
        match &mut self {
            Self::Title(b) => {
                b.enter = Some(b.enter.unwrap_or_else(Entrance::spring).with_delay(delay))
            }
            Self::Subtitle(b) => {
                b.enter = Some(b.enter.unwrap_or_else(Entrance::fade).with_delay(delay))
            }
            Self::TagChips(b) => b.enter = b.enter.with_delay(delay),
            Self::BrowserWindow(b) => b.enter = b.enter.with_delay(delay),
            Self::AppScreenshot(b) => b.enter = b.enter.with_delay(delay),
            Self::TwoColumn(b) => b.delay = delay,
            Self::FlowDiagram(b) => b.enter = b.enter.with_delay(delay),
        }
        self
    }

    /// Same block with its font size replaced; only text and chip blocks have one.
    pub fn sized(mut self, size_px: f64) -> Self {
        match &mut self {
            Self::Title(b) | Self::Subtitle(b) => b.size_px = Some(size_px),
            Self::TagChips(b) => b.size_px = size_px,
            _ => {}
        }
        self
    }

    /// Short kind name used in node ids and messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Subtitle(_) => "subtitle",
            Self::TagChips(_) => "tag_chips",
            Self::BrowserWindow(_) => "browser_window",
            Self::AppScreenshot(_) => "app_screenshot",
            Self::TwoColumn(_) => "two_column",
            Self::FlowDiagram(_) => "flow_diagram",
        }
    }

    fn validate(&self, comp: &Composition) -> ReelResult<()> {
        match self {
            Self::Title(b) | Self::Subtitle(b) => {
                non_empty("text", &b.text)?;
                if let Some(size) = b.size_px {
                    positive_finite("size_px", size)?;
                }
                Ok(())
            }
            Self::TagChips(b) => {
                if b.tags.is_empty() {
                    return Err(ReelError::validation("tag_chips needs at least one tag"));
                }
                for tag in &b.tags {
                    non_empty("tag", tag)?;
                }
                positive_finite("size_px", b.size_px)
            }
            Self::BrowserWindow(b) => {
                positive_finite("width", b.width)?;
                positive_finite("height", b.height)?;
                comp.expect_asset(&b.content, AssetKind::Image, "browser_window")
            }
            Self::AppScreenshot(b) => {
                positive_finite("width", b.width)?;
                positive_finite("height", b.height)?;
                if !b.zoom.is_finite() || b.zoom < 0.0 {
                    return Err(ReelError::validation("zoom must be finite and >= 0"));
                }
                if !b.corner_radius.is_finite() || b.corner_radius < 0.0 {
                    return Err(ReelError::validation(
                        "corner_radius must be finite and >= 0",
                    ));
                }
                comp.expect_asset(&b.asset, AssetKind::Image, "app_screenshot")
            }
            Self::TwoColumn(b) => {
                if !(b.split > 0.0 && b.split < 1.0) {
                    return Err(ReelError::validation("split must be in (0, 1)"));
                }
                if !b.gap_px.is_finite() || b.gap_px < 0.0 {
                    return Err(ReelError::validation("gap_px must be finite and >= 0"));
                }
                for child in b.left.iter().chain(b.right.iter()) {
                    child.validate(comp)?;
                }
                Ok(())
            }
            Self::FlowDiagram(b) => {
                if b.steps.is_empty() {
                    return Err(ReelError::validation("flow_diagram needs at least one step"));
                }
                for step in &b.steps {
                    non_empty("step label", &step.label)?;
                }
                positive_finite("card_width", b.card_width)?;
                positive_finite("card_height", b.card_height)?;
                if !b.connector_px.is_finite() || b.connector_px < 0.0 {
                    return Err(ReelError::validation(
                        "connector_px must be finite and >= 0",
                    ));
                }
                Ok(())
            }
        }
    }
}

impl TextBlock {
    /// Text with kind-default size, color and entrance.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size_px: None,
            color: None,
            enter: None,
        }
    }
}

impl FlowStep {
    /// Step with a label and optional caption.
    pub fn new(label: impl Into<String>, caption: Option<&str>) -> Self {
        Self {
            label: label.into(),
            caption: caption.map(str::to_string),
        }
    }
}

fn non_empty(field: &str, s: &str) -> ReelResult<()> {
    if s.trim().is_empty() {
        return Err(ReelError::validation(format!("{field} must be non-empty")));
    }
    Ok(())
}

fn positive_finite(field: &str, v: f64) -> ReelResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(ReelError::validation(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
