use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOpts, interpolate, validate_ranges},
    animation::spring::{SpringConfig, SpringParams, spring},
    foundation::core::{Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Copy, Debug)]
/// Sampling context provided to motion evaluators.
///
/// It carries both absolute timeline coordinates and scene-local coordinates so motions can
/// choose the most appropriate space.
pub struct SampleCtx {
    /// Absolute frame index in the composition timeline.
    pub frame: FrameIndex,
    /// Global composition frame rate.
    pub fps: Fps,
    /// Scene-local frame index.
    pub local: FrameIndex,
}

impl SampleCtx {
    /// Context whose local clock is shifted to `local`, keeping the global frame consistent.
    pub fn with_local(mut self, local: FrameIndex) -> Self {
        let delta = local.0 as i128 - self.local.0 as i128;
        self.frame = FrameIndex(if delta >= 0 {
            self.frame.0.saturating_add(delta as u64)
        } else {
            self.frame.0.saturating_sub((-delta) as u64)
        });
        self.local = local;
        self
    }
}

/// Scalar motion description sampled against the frame clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    /// Fixed value.
    Constant {
        /// Value returned for every frame.
        value: f64,
    },
    /// Piecewise interpolation over local frames.
    Tween {
        /// Local frame breakpoints (strictly increasing).
        input: Vec<f64>,
        /// Output values at each breakpoint.
        output: Vec<f64>,
        /// Easing and extrapolation.
        #[serde(default)]
        opts: InterpolateOpts,
    },
    /// Physical spring from `from` to `to`.
    Spring {
        /// Spring physics.
        #[serde(default)]
        config: SpringConfig,
        /// Start value.
        from: f64,
        /// Target value.
        to: f64,
        /// Frames before the spring starts.
        #[serde(default)]
        delay: u64,
        /// Optional fixed settle duration.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_frames: Option<u64>,
    },
    /// `offset + amp * sin(2π * freq_hz * t + phase)` with `t` in local seconds.
    Pulse {
        /// Amplitude.
        amp: f64,
        /// Frequency in Hz.
        freq_hz: f64,
        /// Phase in radians.
        #[serde(default)]
        phase: f64,
        /// Center value.
        offset: f64,
    },
    /// Delay an inner motion by `by` frames.
    Delay {
        /// Inner motion.
        inner: Box<Motion>,
        /// Delay in frames.
        by: u64,
    },
    /// Product of two motions (for example entrance opacity times exit opacity).
    Product {
        /// First factor.
        a: Box<Motion>,
        /// Second factor.
        b: Box<Motion>,
    },
    /// Blend between two motions with an animated factor clamped to `[0, 1]`.
    Mix {
        /// Value at `t = 0`.
        a: Box<Motion>,
        /// Value at `t = 1`.
        b: Box<Motion>,
        /// Blend factor.
        t: Box<Motion>,
    },
}

impl Motion {
    /// Build a constant motion.
    pub fn constant(value: f64) -> Self {
        Self::Constant { value }
    }

    /// Clamped two-point tween between local frames `start` and `end`.
    pub fn tween(start: u64, end: u64, from: f64, to: f64, ease: Ease) -> Self {
        Self::Tween {
            input: vec![start as f64, end.max(start.saturating_add(1)) as f64],
            output: vec![from, to],
            opts: InterpolateOpts::eased(ease),
        }
    }

    /// Spring from `from` to `to` starting after `delay` frames.
    pub fn spring(from: f64, to: f64, config: SpringConfig, delay: u64) -> Self {
        Self::Spring {
            config,
            from,
            to,
            delay,
            duration_frames: None,
        }
    }

    /// Sample the motion value at the given context.
    pub fn sample(&self, ctx: SampleCtx) -> ReelResult<f64> {
        match self {
            Self::Constant { value } => Ok(*value),
            Self::Tween {
                input,
                output,
                opts,
            } => interpolate(ctx.local.0 as f64, input, output, *opts),
            Self::Spring {
                config,
                from,
                to,
                delay,
                duration_frames,
            } => spring(
                ctx.local.0 as f64,
                ctx.fps,
                SpringParams {
                    config: *config,
                    from: *from,
                    to: *to,
                    delay: *delay as f64,
                    duration_in_frames: duration_frames.map(|d| d as f64),
                    reverse: false,
                },
            ),
            Self::Pulse {
                amp,
                freq_hz,
                phase,
                offset,
            } => {
                let secs = ctx.fps.frames_to_secs(ctx.local.0);
                Ok(offset + amp * (std::f64::consts::TAU * freq_hz * secs + phase).sin())
            }
            Self::Delay { inner, by } => {
                let f = ctx.local.0;
                let mapped = FrameIndex(f.saturating_sub(*by));
                inner.sample(ctx.with_local(mapped))
            }
            Self::Product { a, b } => Ok(a.sample(ctx)? * b.sample(ctx)?),
            Self::Mix { a, b, t } => {
                let tt = t.sample(ctx)?.clamp(0.0, 1.0);
                let av = a.sample(ctx)?;
                let bv = b.sample(ctx)?;
                Ok(av + (bv - av) * tt)
            }
        }
    }

    /// Validate static invariants for this motion tree.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Constant { value } => finite("constant value", *value),
            Self::Tween {
                input,
                output,
                opts,
            } => {
                validate_ranges(input, output)?;
                opts.ease.validate()
            }
            Self::Spring {
                config,
                from,
                to,
                duration_frames,
                ..
            } => {
                config.validate()?;
                finite("spring from", *from)?;
                finite("spring to", *to)?;
                if *duration_frames == Some(0) {
                    return Err(ReelError::animation("spring duration_frames must be > 0"));
                }
                Ok(())
            }
            Self::Pulse {
                amp,
                freq_hz,
                phase,
                offset,
            } => {
                finite("pulse amp", *amp)?;
                finite("pulse freq_hz", *freq_hz)?;
                finite("pulse phase", *phase)?;
                finite("pulse offset", *offset)
            }
            Self::Delay { inner, by: _ } => inner.validate(),
            Self::Product { a, b } => {
                a.validate()?;
                b.validate()
            }
            Self::Mix { a, b, t } => {
                a.validate()?;
                b.validate()?;
                t.validate()
            }
        }
    }
}

fn finite(what: &str, v: f64) -> ReelResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ReelError::animation(format!("{what} must be finite")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
