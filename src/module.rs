use tracing::debug;

use crate::interp::{Interpolator, Window};
use crate::{
    ChopWindow, Error, GradientChannel, Module, ModuleId, ModuleTrigger, ParentBlock, Result,
    SystemSpecs,
};

/// Converts one parent block into a TOPPE module.
///
/// All waveforms of the returned module are resampled to the scanner raster
/// and padded to a common length `n`. If the block plays an RF pulse or an
/// ADC, `n_chop` holds the number of samples before and after that window:
/// `(n_pre, n - n_pre - window_len)`. Blocks with neither get `(0, 0)`.
pub fn build_module<I: Interpolator + ?Sized>(
    id: ModuleId,
    block: &ParentBlock,
    sys: &SystemSpecs,
    grad_raster: f64,
    interp: &I,
    ignore_trigger: bool,
) -> Result<Module> {
    if block.rf.is_some() && block.adc.is_some() {
        return Err(Error::ConflictingEvents { module: id });
    }

    // Set by either RF or ADC, never both
    let mut window: Option<Window> = None;

    let mut rf = match &block.rf {
        Some(rf) => {
            let (wave, rf_window) = interp.rf(id, rf, block.block_duration, sys)?;
            window = Some(rf_window);
            Some(wave)
        }
        None => None,
    };

    let mut grads: [Option<Vec<f64>>; 3] = [None, None, None];
    for (channel, grad) in GradientChannel::ALL.into_iter().zip(&mut grads) {
        if let Some(g) = block.gradient(channel) {
            *grad = Some(interp.gradient(id, g, block.block_duration, sys, grad_raster)?);
        }
    }

    let adc = match &block.adc {
        Some(adc) => {
            window = Some(interp.adc(id, adc, sys)?);
            true
        }
        None => false,
    };

    let trig = match &block.trig {
        Some(trig) if !ignore_trigger => Some(ModuleTrigger { delay: trig.delay }),
        _ => None,
    };

    // Number of raster samples in the module
    let n = rf
        .iter()
        .map(|rf| rf.len())
        .chain(grads.iter().flatten().map(Vec::len))
        .max()
        .unwrap_or(0);

    let n_chop = match window {
        None => ChopWindow::default(),
        Some(Window { n_pre, len }) => {
            let post = n_pre
                .checked_add(len)
                .and_then(|end| n.checked_sub(end))
                .ok_or(Error::InterpolationInconsistency {
                    module: id,
                    n,
                    n_pre,
                    window_len: len,
                })?;
            ChopWindow { pre: n_pre, post }
        }
    };

    if let Some(rf) = &mut rf {
        rf.pad_to(n);
    }
    for grad in grads.iter_mut().flatten() {
        grad.resize(n, 0.0);
    }
    let [gx, gy, gz] = grads;

    debug!(module = %id, n, ?n_chop, adc, "built module");

    Ok(Module {
        ofname: id.to_string(),
        block_duration: block.block_duration,
        rf,
        gx,
        gy,
        gz,
        adc,
        trig,
        n_chop,
    })
}
