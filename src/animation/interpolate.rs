use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

/// Behavior of [`interpolate`] outside the input range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the nearest output endpoint.
    #[default]
    Clamp,
    /// Continue the edge segment linearly.
    Extend,
    /// Return the input unchanged.
    Identity,
}

/// Options for [`interpolate`]. The default clamps on both sides with linear easing.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOpts {
    /// Easing applied inside each segment.
    #[serde(default)]
    pub ease: Ease,
    /// Left-side extrapolation.
    #[serde(default)]
    pub left: Extrapolate,
    /// Right-side extrapolation.
    #[serde(default)]
    pub right: Extrapolate,
}

impl InterpolateOpts {
    /// Clamped options with the given easing.
    pub fn eased(ease: Ease) -> Self {
        Self {
            ease,
            ..Self::default()
        }
    }
}

/// Validate a pair of interpolation ranges.
pub fn validate_ranges(input_range: &[f64], output_range: &[f64]) -> ReelResult<()> {
    if input_range.len() != output_range.len() {
        return Err(ReelError::animation(format!(
            "input range ({}) and output range ({}) must have the same length",
            input_range.len(),
            output_range.len()
        )));
    }
    if input_range.len() < 2 {
        return Err(ReelError::animation(
            "interpolation ranges need at least 2 points",
        ));
    }
    if !input_range
        .iter()
        .chain(output_range.iter())
        .all(|v| v.is_finite())
    {
        return Err(ReelError::animation("interpolation ranges must be finite"));
    }
    if !input_range.windows(2).all(|w| w[0] < w[1]) {
        return Err(ReelError::animation(
            "input range must be strictly increasing",
        ));
    }
    Ok(())
}

/// Map `input` through a piecewise range mapping.
pub fn interpolate(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: InterpolateOpts,
) -> ReelResult<f64> {
    validate_ranges(input_range, output_range)?;
    if !input.is_finite() {
        return Err(ReelError::animation("interpolation input must be finite"));
    }
    let n = input_range.len();
    let seg = input_range[1..n - 1].partition_point(|&v| v <= input);
    Ok(interpolate_segment(
        input,
        (input_range[seg], input_range[seg + 1]),
        (output_range[seg], output_range[seg + 1]),
        opts,
    ))
}

/// Two-point clamped interpolation that never fails.
///
/// A degenerate input range (`from >= to`) acts as a step at `from`.
pub fn tween(input: f64, input_range: (f64, f64), output_range: (f64, f64), ease: Ease) -> f64 {
    if input_range.0 >= input_range.1 {
        return if input < input_range.0 {
            output_range.0
        } else {
            output_range.1
        };
    }
    interpolate_segment(
        input,
        input_range,
        output_range,
        InterpolateOpts::eased(ease),
    )
}

fn interpolate_segment(
    input: f64,
    (in0, in1): (f64, f64),
    (out0, out1): (f64, f64),
    opts: InterpolateOpts,
) -> f64 {
    let mut x = input;
    if x < in0 {
        match opts.left {
            Extrapolate::Identity => return x,
            Extrapolate::Clamp => x = in0,
            Extrapolate::Extend => {}
        }
    }
    if x > in1 {
        match opts.right {
            Extrapolate::Identity => return x,
            Extrapolate::Clamp => x = in1,
            Extrapolate::Extend => {}
        }
    }
    if out0 == out1 {
        return out0;
    }

    let t = (x - in0) / (in1 - in0);
    // Easing only shapes the in-range part; extension stays linear.
    let te = if (0.0..=1.0).contains(&t) {
        opts.ease.apply(t)
    } else {
        t
    };
    out0 + (out1 - out0) * te
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
