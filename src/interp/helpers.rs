use crate::Gradient;

/// Gyromagnetic ratio of 1H, unit: `Hz / G`
pub const GAMMA: f64 = 4257.638_543;

/// Number of raster samples needed to cover `duration`. Durations are
/// usually integer multiples of the raster, so floating point noise in the
/// division must not add an extra sample.
pub fn raster_len(duration: f64, raster: f64) -> usize {
    (duration / raster - 1e-6).ceil().max(0.0) as usize
}

/// Number of raster samples before an event starting at `delay`.
pub fn raster_offset(delay: f64, raster: f64) -> usize {
    (delay / raster).round().max(0.0) as usize
}

/// Samples `f` at the centers of the first `n` raster intervals.
pub fn rasterize(n: usize, raster: f64, f: impl Fn(f64) -> f64) -> Vec<f64> {
    (0..n).map(|k| f((k as f64 + 0.5) * raster)).collect()
}

/// Linear interpolation of a shape whose samples sit at the centers of
/// `dwell` long intervals. Zero outside of `[0, len * dwell]`, held constant
/// in the first and last half interval.
pub fn sample_shape(shape: &[f64], dwell: f64, t: f64) -> f64 {
    let Some(&last) = shape.last() else {
        return 0.0;
    };
    if t < 0.0 || t > shape.len() as f64 * dwell {
        return 0.0;
    }

    let x = t / dwell - 0.5;
    if x <= 0.0 {
        return shape[0];
    }
    let i = x.floor() as usize;
    if i + 1 >= shape.len() {
        return last;
    }
    let frac = x - i as f64;
    shape[i] * (1.0 - frac) + shape[i + 1] * frac
}

/// Gradient amplitude at time `t` after block start, unit: `Hz / m`
pub fn sample_grad(t: f64, grad: &Gradient, grad_raster: f64) -> f64 {
    match grad {
        Gradient::Free { amp, delay, shape } => amp * sample_shape(shape, grad_raster, t - delay),
        Gradient::Trap {
            amp,
            rise,
            flat,
            fall,
            delay,
        } => amp * trap_sample(t - delay, *rise, *flat, *fall),
    }
}

pub fn trap_sample(t: f64, rise: f64, flat: f64, fall: f64) -> f64 {
    if t < 0.0 {
        0.0
    } else if t < rise {
        t / rise
    } else if t < rise + flat {
        1.0
    } else if t < rise + flat + fall {
        ((rise + flat + fall) - t) / fall
    } else {
        0.0
    }
}
