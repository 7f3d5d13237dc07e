//! Damped spring motion sampled on the frame clock.
//!
//! The spring is integrated analytically in fixed frame steps starting from rest at `from`, so
//! sampling the same frame always yields the same value regardless of evaluation order.

use crate::{
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
};

/// Physical spring parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Damping coefficient (`> 0`).
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Mass (`> 0`).
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Stiffness (`> 0`).
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Never go past the target value.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_damping() -> f64 {
    10.0
}

fn default_mass() -> f64 {
    1.0
}

fn default_stiffness() -> f64 {
    100.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            mass: default_mass(),
            stiffness: default_stiffness(),
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Heavily damped spring that settles without visible bounce.
    pub fn smooth() -> Self {
        Self {
            damping: 200.0,
            ..Self::default()
        }
    }

    /// Snappy spring with a light overshoot.
    pub fn snappy() -> Self {
        Self {
            damping: 14.0,
            stiffness: 180.0,
            ..Self::default()
        }
    }

    /// Validate that all physical parameters are finite and positive.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [
            ("damping", self.damping),
            ("mass", self.mass),
            ("stiffness", self.stiffness),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReelError::animation(format!(
                    "spring {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Inputs for [`spring`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    /// Spring physics.
    pub config: SpringConfig,
    /// Start value.
    pub from: f64,
    /// Target value.
    pub to: f64,
    /// Frames to wait before the spring starts.
    pub delay: f64,
    /// Stretch or squash the spring so it settles in exactly this many frames.
    pub duration_in_frames: Option<f64>,
    /// Play the spring backwards.
    pub reverse: bool,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            config: SpringConfig::default(),
            from: 0.0,
            to: 1.0,
            delay: 0.0,
            duration_in_frames: None,
            reverse: false,
        }
    }
}

/// Distance to target below which a spring counts as settled.
pub const REST_THRESHOLD: f64 = 0.005;

const MAX_STEP_MS: f64 = 64.0;
const MAX_SETTLE_FRAMES: u64 = 100_000;

#[derive(Clone, Copy, Debug)]
struct SpringState {
    last_timestamp_ms: f64,
    current: f64,
    velocity: f64,
}

fn advance(state: SpringState, now_ms: f64, to: f64, cfg: &SpringConfig) -> SpringState {
    let delta_ms = (now_ms - state.last_timestamp_ms).min(MAX_STEP_MS);
    let c = cfg.damping;
    let m = cfg.mass;
    let k = cfg.stiffness;

    let v0 = -state.velocity;
    let x0 = to - state.current;
    let zeta = c / (2.0 * (k * m).sqrt());
    let omega0 = (k / m).sqrt();
    let t = delta_ms / 1000.0;

    let (current, velocity) = if zeta < 1.0 {
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        let sin1 = (omega1 * t).sin();
        let cos1 = (omega1 * t).cos();
        let envelope = (-zeta * omega0 * t).exp();
        let frag = envelope * (sin1 * ((v0 + zeta * omega0 * x0) / omega1) + x0 * cos1);
        let position = to - frag;
        let velocity = zeta * omega0 * frag
            - envelope * (cos1 * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin1);
        (position, velocity)
    } else {
        let envelope = (-omega0 * t).exp();
        let position = to - envelope * (x0 + (v0 + omega0 * x0) * t);
        let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
        (position, velocity)
    };

    SpringState {
        last_timestamp_ms: now_ms,
        current,
        velocity,
    }
}

/// Raw unit spring (0 -> 1) at a possibly fractional frame.
fn unit_spring_at(frame: f64, fps: Fps, cfg: &SpringConfig) -> f64 {
    let frame = frame.max(0.0);
    let whole = frame.floor();
    let rest = frame - whole;
    let fps = fps.as_f64();

    let mut state = SpringState {
        last_timestamp_ms: 0.0,
        current: 0.0,
        velocity: 0.0,
    };
    let steps = whole as u64;
    for f in 0..=steps {
        let at = if f == steps { f as f64 + rest } else { f as f64 };
        state = advance(state, at / fps * 1000.0, 1.0, cfg);
    }
    state.current
}

/// Number of frames a unit spring needs to come to rest.
///
/// The spring has to stay within [`REST_THRESHOLD`] of the target for 20 consecutive frames.
pub fn measure_spring(fps: Fps, config: &SpringConfig) -> ReelResult<u64> {
    config.validate()?;
    let fps_f = fps.as_f64();

    let mut state = SpringState {
        last_timestamp_ms: 0.0,
        current: 0.0,
        velocity: 0.0,
    };
    let step = |frame: u64, state: &mut SpringState| -> f64 {
        *state = advance(*state, frame as f64 / fps_f * 1000.0, 1.0, config);
        (state.current - 1.0).abs()
    };

    let mut frame = 0u64;
    let mut diff = step(frame, &mut state);
    while diff >= REST_THRESHOLD {
        frame += 1;
        if frame > MAX_SETTLE_FRAMES {
            return Err(ReelError::animation("spring does not settle"));
        }
        diff = step(frame, &mut state);
    }

    let mut finished = frame;
    let mut calm = 0;
    while calm < 20 {
        frame += 1;
        if frame > MAX_SETTLE_FRAMES {
            return Err(ReelError::animation("spring does not settle"));
        }
        diff = step(frame, &mut state);
        if diff >= REST_THRESHOLD {
            calm = 0;
            finished = frame + 1;
        } else {
            calm += 1;
        }
    }
    Ok(finished)
}

/// Sample a spring at `frame`.
pub fn spring(frame: f64, fps: Fps, params: SpringParams) -> ReelResult<f64> {
    params.config.validate()?;
    if let Some(d) = params.duration_in_frames
        && (!d.is_finite() || d <= 0.0)
    {
        return Err(ReelError::animation(
            "spring duration_in_frames must be finite and > 0",
        ));
    }

    let natural = if params.reverse || params.duration_in_frames.is_some() {
        Some(measure_spring(fps, &params.config)? as f64)
    } else {
        None
    };

    let span = params.duration_in_frames.or(natural).unwrap_or(0.0);
    let oriented = if params.reverse { span - frame } else { frame };
    let delayed = if params.reverse {
        oriented + params.delay
    } else {
        oriented - params.delay
    };

    let unit = match (params.duration_in_frames, natural) {
        (Some(d), _) if delayed > d => 1.0,
        (Some(d), Some(n)) if n > 0.0 => unit_spring_at(delayed / (d / n), fps, &params.config),
        _ => unit_spring_at(delayed, fps, &params.config),
    };

    let unit = if params.config.overshoot_clamping {
        unit.min(1.0)
    } else {
        unit
    };
    if params.from == 0.0 && params.to == 1.0 {
        return Ok(unit);
    }
    Ok(params.from + (params.to - params.from) * unit)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
