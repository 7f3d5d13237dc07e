use crate::animation::motion::Motion;

/// Delay `inner` by `by_frames`.
pub fn delay(inner: Motion, by_frames: u64) -> Motion {
    if by_frames == 0 {
        return inner;
    }
    Motion::Delay {
        inner: Box::new(inner),
        by: by_frames,
    }
}

/// Multiply two motions.
pub fn product(a: Motion, b: Motion) -> Motion {
    Motion::Product {
        a: Box::new(a),
        b: Box::new(b),
    }
}

/// Blend `a` toward `b` by `t`.
pub fn mix(a: Motion, b: Motion, t: Motion) -> Motion {
    Motion::Mix {
        a: Box::new(a),
        b: Box::new(b),
        t: Box::new(t),
    }
}

/// One copy of `base` per item, each delayed by `start + i * step` frames.
pub fn stagger(base: &Motion, count: usize, start: u64, step: u64) -> Vec<Motion> {
    (0..count)
        .map(|i| delay(base.clone(), start + (i as u64) * step))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
