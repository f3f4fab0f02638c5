use tracing::debug;

use crate::{Adc, Error, Gradient, ModuleId, Result, Rf, RfWaveform, SystemSpecs};

mod helpers;

pub use helpers::GAMMA;

/// Position of the RF or ADC activity on the scanner raster of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    /// Raster samples before the window starts
    pub n_pre: usize,
    /// Raster samples covered by the RF pulse or the ADC
    pub len: usize,
}

/// Resamples block events onto the scanner raster (`SystemSpecs::raster`).
/// The module builder only relies on this trait, so alternative resampling
/// strategies can be plugged into the conversion.
pub trait Interpolator {
    /// Returns the RF waveform (starting at block start) and its window.
    fn rf(
        &self,
        id: ModuleId,
        rf: &Rf,
        block_duration: f64,
        sys: &SystemSpecs,
    ) -> Result<(RfWaveform, Window)>;

    /// Returns the gradient waveform in `G / cm`, starting at block start.
    fn gradient(
        &self,
        id: ModuleId,
        grad: &Gradient,
        block_duration: f64,
        sys: &SystemSpecs,
        grad_raster: f64,
    ) -> Result<Vec<f64>>;

    /// The ADC produces no waveform, only its window.
    fn adc(&self, id: ModuleId, adc: &Adc, sys: &SystemSpecs) -> Result<Window>;
}

/// Default interpolator: linear resampling at the centers of the raster
/// intervals, waveforms zero padded to the block duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterInterpolator;

fn check_raster(id: ModuleId, raster: f64) -> Result<f64> {
    if raster.is_finite() && raster > 0.0 {
        Ok(raster)
    } else {
        Err(Error::InvalidRaster { module: id, raster })
    }
}

fn check_delay(id: ModuleId, delay: f64) -> Result<f64> {
    if delay.is_finite() && delay >= 0.0 {
        Ok(delay)
    } else {
        Err(Error::InvalidDelay { module: id, delay })
    }
}

impl Interpolator for RasterInterpolator {
    fn rf(
        &self,
        id: ModuleId,
        rf: &Rf,
        block_duration: f64,
        sys: &SystemSpecs,
    ) -> Result<(RfWaveform, Window)> {
        let raster = check_raster(id, sys.raster)?;
        check_raster(id, rf.dwell)?;
        let delay = check_delay(id, rf.delay)?;

        let window = Window {
            n_pre: helpers::raster_offset(delay, raster),
            len: helpers::raster_len(rf.duration(), raster),
        };
        let end = window
            .n_pre
            .checked_add(window.len)
            .ok_or(Error::InvalidDelay { module: id, delay })?;
        let n = helpers::raster_len(block_duration, raster).max(end);

        // Sample relative to the raster aligned pulse start, not to rf.delay,
        // so the pulse fills exactly the window reported to the scanner.
        let t_start = window.n_pre as f64 * raster;
        let magnitude = helpers::rasterize(n, raster, |t| {
            rf.amp * helpers::sample_shape(&rf.amp_shape, rf.dwell, t - t_start) / GAMMA
        });
        let phase = helpers::rasterize(n, raster, |t| {
            helpers::sample_shape(&rf.phase_shape, rf.dwell, t - t_start) * std::f64::consts::TAU
        });

        debug!(module = %id, n, n_pre = window.n_pre, window_len = window.len, "resampled rf");
        Ok((RfWaveform { magnitude, phase }, window))
    }

    fn gradient(
        &self,
        id: ModuleId,
        grad: &Gradient,
        block_duration: f64,
        sys: &SystemSpecs,
        grad_raster: f64,
    ) -> Result<Vec<f64>> {
        let raster = check_raster(id, sys.raster)?;
        check_raster(id, grad_raster)?;
        check_delay(id, grad.delay())?;

        let n = helpers::raster_len(block_duration, raster).max(helpers::raster_len(
            grad.delay() + grad.duration(grad_raster),
            raster,
        ));

        // Hz/m -> G/cm
        Ok(helpers::rasterize(n, raster, |t| {
            helpers::sample_grad(t, grad, grad_raster) / GAMMA / 100.0
        }))
    }

    fn adc(&self, id: ModuleId, adc: &Adc, sys: &SystemSpecs) -> Result<Window> {
        let raster = check_raster(id, sys.raster)?;
        check_raster(id, adc.dwell)?;
        let delay = check_delay(id, adc.delay)?;

        Ok(Window {
            n_pre: helpers::raster_offset(delay, raster),
            len: helpers::raster_len(adc.duration(), raster),
        })
    }
}
