use tracing::debug;

use crate::error::Capacity;
use crate::{Error, LoopEvent, ModuleId, ModuleTable, PulCeq, Result, SystemSpecs};

/// Acquisition coordinate decoded from a flat ADC index. All fields are
/// one-based, as expected by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcqIndex {
    pub view: usize,
    pub slice: usize,
    pub echo: usize,
}

impl AcqIndex {
    /// Views run fastest. The slice is not wrapped at `max_slice`, so an
    /// index past the last slice shows up as a slice overflow.
    pub fn decode(adc_idx: usize, max_view: usize, max_slice: usize) -> Result<Self> {
        let invalid = Error::InvalidCapacity {
            max_view,
            max_slice,
        };
        if max_view == 0 || max_slice == 0 {
            return Err(invalid);
        }
        let views_per_echo = max_view.checked_mul(max_slice).ok_or(invalid)?;

        Ok(Self {
            view: adc_idx % max_view + 1,
            slice: adc_idx / max_view + 1,
            echo: adc_idx / views_per_echo + 1,
        })
    }
}

fn check_len(column: &'static str, len: usize, n_max: usize) -> Result<()> {
    if len == n_max {
        Ok(())
    } else {
        Err(Error::LoopLengthMismatch { column, len, n_max })
    }
}

/// Turns the column wise loop of `ceq` into one `LoopEvent` per timepoint,
/// in timepoint order.
///
/// The capacity check covers the whole acquisition: if any timepoint needs
/// more slices than `sys.max_slice` or more echoes than `sys.max_echo + 1`,
/// no event list is returned at all.
pub fn transpose_loop(
    ceq: &PulCeq,
    modules: &ModuleTable,
    sys: &SystemSpecs,
) -> Result<Vec<LoopEvent>> {
    let n_max = ceq.n_max;
    let lt = &ceq.looptable;
    check_len("parent_blocks_idx", ceq.parent_blocks_idx.len(), n_max)?;
    check_len("segments_idx", ceq.segments_idx.len(), n_max)?;
    check_len("Gamplitude", lt.gamplitude.len(), n_max)?;
    check_len("RFoffset", lt.rf_offset.len(), n_max)?;
    check_len("RFphase", lt.rf_phase.len(), n_max)?;
    check_len("DAQphase", lt.daq_phase.len(), n_max)?;
    check_len("trigout", lt.trigout.len(), n_max)?;
    check_len("textra", lt.textra.len(), n_max)?;
    check_len("rotmat", lt.rotmat.len(), n_max)?;
    check_len("adc_idx", lt.adc_idx.len(), n_max)?;

    let acq = lt
        .adc_idx
        .iter()
        .map(|&a| AcqIndex::decode(a, sys.max_view, sys.max_slice))
        .collect::<Result<Vec<_>>>()?;

    if let Some(max) = acq.iter().map(|a| a.slice).max() {
        if max > sys.max_slice {
            return Err(Error::CapacityExceeded {
                what: Capacity::Slice,
                value: max,
                max: sys.max_slice,
            });
        }
    }
    // Compared zero-based: echo may reach max_echo + 1
    if let Some(max) = acq.iter().map(|a| a.echo - 1).max() {
        if max > sys.max_echo {
            return Err(Error::CapacityExceeded {
                what: Capacity::Echo,
                value: max,
                max: sys.max_echo,
            });
        }
    }

    let events = (0..n_max)
        .zip(acq)
        .map(|(n, acq)| {
            let module = ModuleId(ceq.parent_blocks_idx[n]);
            if !modules.contains(module) {
                return Err(Error::UnknownParentBlock {
                    timepoint: n,
                    index: module.index(),
                });
            }

            Ok(LoopEvent {
                module,
                gamplitude: lt.gamplitude[n],
                rf_offset: lt.rf_offset[n],
                rf_phase: lt.rf_phase[n],
                daq_phase: lt.daq_phase[n],
                trigout: lt.trigout[n],
                textra: lt.textra[n],
                rotmat: lt.rotmat[n],
                view: acq.view,
                slice: acq.slice,
                echo: acq.echo,
                core: ceq.segments_idx[n],
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(n_max, "transposed loop");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use assert2::{check, let_assert};

    fn sys(max_view: usize, max_slice: usize, max_echo: usize) -> SystemSpecs {
        SystemSpecs {
            max_view,
            max_slice,
            max_echo,
            ..Default::default()
        }
    }

    fn modules(ceq: &PulCeq) -> ModuleTable {
        crate::convert::ceq_to_files(ceq, &SystemSpecs::default(), &Default::default())
            .unwrap()
            .modules
    }

    #[test]
    fn decode_acquisition_index() {
        let acq = AcqIndex::decode(250, 100, 10).unwrap();
        check!(acq == AcqIndex { view: 51, slice: 3, echo: 1 });

        let acq = AcqIndex::decode(0, 100, 10).unwrap();
        check!(acq == AcqIndex { view: 1, slice: 1, echo: 1 });

        let acq = AcqIndex::decode(1000, 100, 10).unwrap();
        check!(acq == AcqIndex { view: 1, slice: 11, echo: 2 });
    }

    #[test]
    fn decode_rejects_zero_capacity() {
        let_assert!(Err(Error::InvalidCapacity { .. }) = AcqIndex::decode(1, 0, 10));
        let_assert!(Err(Error::InvalidCapacity { .. }) = AcqIndex::decode(1, 10, 0));
    }

    #[test]
    fn random_indices_stay_in_range() {
        for _ in 0..1000 {
            let max_view = rand::random::<usize>() % 512 + 1;
            let max_slice = rand::random::<usize>() % 64 + 1;
            let a = rand::random::<usize>() % (max_view * max_slice);

            let acq = AcqIndex::decode(a, max_view, max_slice).unwrap();
            check!((1..=max_view).contains(&acq.view));
            check!((1..=max_slice).contains(&acq.slice));
            check!(acq.echo == 1);
            check!((acq.slice - 1) * max_view + acq.view - 1 == a);
        }
    }

    #[test]
    fn events_keep_timepoint_order() {
        let ceq = test_utils::gre_ceq(8);
        let events = transpose_loop(&ceq, &modules(&ceq), &sys(100, 10, 1)).unwrap();

        check!(events.len() == ceq.n_max);
        for (n, event) in events.iter().enumerate() {
            check!(event.module == ModuleId(ceq.parent_blocks_idx[n]));
            check!(event.core == ceq.segments_idx[n]);
            check!(event.gamplitude == ceq.looptable.gamplitude[n]);
            check!(event.rf_phase == ceq.looptable.rf_phase[n]);
            check!(event.rotmat == ceq.looptable.rotmat[n]);
            check!(event.view == ceq.looptable.adc_idx[n] % 100 + 1);
        }
    }

    #[test]
    fn slice_overflow_fails_whole_loop() {
        let mut ceq = test_utils::gre_ceq(4);
        let modules = modules(&ceq);
        ceq.looptable.adc_idx[2] = 1000;

        let_assert!(
            Err(Error::CapacityExceeded { what, value, max }) =
                transpose_loop(&ceq, &modules, &sys(100, 10, 1))
        );
        check!(what == Capacity::Slice);
        check!(value == 11);
        check!(max == 10);
    }

    #[test]
    fn column_length_mismatch() {
        let mut ceq = test_utils::gre_ceq(4);
        let modules = modules(&ceq);
        ceq.looptable.textra.pop();

        let_assert!(
            Err(Error::LoopLengthMismatch { column, len, n_max }) =
                transpose_loop(&ceq, &modules, &sys(100, 10, 1))
        );
        check!(column == "textra");
        check!(len + 1 == n_max);
    }

    #[test]
    fn unknown_parent_block() {
        let mut ceq = test_utils::gre_ceq(4);
        let modules = modules(&ceq);
        ceq.parent_blocks_idx[5] = 42;

        let_assert!(
            Err(Error::UnknownParentBlock { timepoint, index }) =
                transpose_loop(&ceq, &modules, &sys(100, 10, 1))
        );
        check!(timepoint == 5);
        check!(index == 42);
    }

    #[test]
    fn empty_loop() {
        let ceq = PulCeq::default();
        let events = transpose_loop(&ceq, &ModuleTable::new(), &sys(100, 10, 1)).unwrap();
        check!(events.is_empty());
    }
}
