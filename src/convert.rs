use tracing::{debug, info, warn};

use crate::interp::{Interpolator, RasterInterpolator};
use crate::module::build_module;
use crate::select::{find_b1_scaling, find_readout};
use crate::transpose::transpose_loop;
use crate::{ConvertOptions, Error, FilesBundle, ModuleId, ModuleTable, PulCeq, Result, SystemSpecs};

macro_rules! narrate {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+)
        } else {
            debug!($($arg)+)
        }
    };
}

/// Converts a PulCeq sequence into the module table and scanner loop of the
/// TOPPE v6 interpreter, using the default `RasterInterpolator`.
pub fn ceq_to_files(
    ceq: &PulCeq,
    sys: &SystemSpecs,
    options: &ConvertOptions,
) -> Result<FilesBundle> {
    ceq_to_files_with(ceq, sys, options, &RasterInterpolator)
}

/// Same as `ceq_to_files`, with a custom waveform interpolator.
pub fn ceq_to_files_with<I: Interpolator + ?Sized>(
    ceq: &PulCeq,
    sys: &SystemSpecs,
    options: &ConvertOptions,
    interp: &I,
) -> Result<FilesBundle> {
    let b1scaling = find_b1_scaling(&ceq.parent_blocks);
    let readout = find_readout(&ceq.parent_blocks);
    if b1scaling.is_delay() {
        warn!("no parent block contains an RF pulse, B1 scaling falls back to the delay module");
    }

    let path = options.sequence_path();
    narrate!(
        options.verbose,
        sequence = %options.sequence_name,
        path = %path.display(),
        "converting Pulseq blocks to TOPPE modules"
    );
    let mut modules = ModuleTable::new();
    for (p, block) in ceq.parent_blocks.iter().enumerate().skip(1) {
        let id = ModuleId(p);
        let block = block.as_ref().ok_or(Error::MissingParentBlock(id))?;
        let module = build_module(
            id,
            block,
            sys,
            ceq.sys.grad_raster_time,
            interp,
            options.ignore_trigger,
        )?;
        modules.insert(id, module);
    }
    narrate!(options.verbose, n_modules = modules.len(), "done");

    let events = transpose_loop(ceq, &modules, sys)?;
    narrate!(
        options.verbose,
        n_events = events.len(),
        b1scaling = %b1scaling,
        readout = %readout,
        "built scanner loop"
    );

    Ok(FilesBundle {
        sys: sys.clone(),
        modules,
        cores: ceq.blocks_in_segment.clone(),
        events,
        b1scaling,
        readout,
    })
}
