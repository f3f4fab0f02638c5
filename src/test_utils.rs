//! Shared fixtures: the blocks of a small 2D gradient echo sequence.

use crate::{Adc, CeqSystem, Gradient, LoopTable, ParentBlock, PulCeq, Rf};

pub const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

fn trap(amp: f64, rise: f64, flat: f64, fall: f64) -> Option<Gradient> {
    Some(Gradient::Trap {
        amp,
        rise,
        flat,
        fall,
        delay: 0.0,
    })
}

/// 100 us block pulse after 100 us, slice select on z. 100 raster samples.
pub fn excitation_block() -> ParentBlock {
    ParentBlock {
        rf: Some(Rf {
            amp: 500.0,
            amp_shape: vec![1.0; 100],
            phase_shape: vec![0.0; 100],
            dwell: 1e-6,
            delay: 100e-6,
            ..Default::default()
        }),
        gz: trap(2e5, 60e-6, 280e-6, 60e-6),
        block_duration: 400e-6,
        ..Default::default()
    }
}

/// Phase encoding and readout prephaser.
pub fn prephaser_block() -> ParentBlock {
    ParentBlock {
        gx: trap(-4e5, 40e-6, 120e-6, 40e-6),
        gy: trap(4e5, 40e-6, 120e-6, 40e-6),
        block_duration: 200e-6,
        ..Default::default()
    }
}

/// 64 samples of 4 us after 40 us, readout on x. 100 raster samples.
pub fn readout_block() -> ParentBlock {
    ParentBlock {
        gx: trap(4e5, 40e-6, 320e-6, 40e-6),
        adc: Some(Adc {
            num: 64,
            dwell: 4e-6,
            delay: 40e-6,
            ..Default::default()
        }),
        block_duration: 400e-6,
        ..Default::default()
    }
}

pub fn spoiler_block() -> ParentBlock {
    ParentBlock {
        gz: trap(8e5, 100e-6, 300e-6, 100e-6),
        block_duration: 500e-6,
        ..Default::default()
    }
}

/// `n_views` repetitions of excitation, prephaser, readout and spoiler in a
/// single core. Only the readout timepoints carry an acquisition index.
pub fn gre_ceq(n_views: usize) -> PulCeq {
    let mut ceq = PulCeq {
        parent_blocks: vec![
            None,
            Some(excitation_block()),
            Some(prephaser_block()),
            Some(readout_block()),
            Some(spoiler_block()),
        ],
        blocks_in_segment: vec![vec![1, 2, 3, 4]],
        sys: CeqSystem::default(),
        ..Default::default()
    };

    let mut lt = LoopTable::default();
    for view in 0..n_views {
        let pe = (view as f64 - n_views as f64 / 2.0) / (n_views as f64 / 2.0);
        let phase = (117.0 * (view * (view + 1) / 2) as f64).to_radians() % std::f64::consts::TAU;

        for (block, gamplitude, adc_idx) in [
            (1, [0.0, 0.0, 1.0], 0),
            (2, [1.0, pe, 0.0], 0),
            (3, [1.0, 0.0, 0.0], view),
            (4, [0.0, 0.0, 1.0], 0),
        ] {
            ceq.parent_blocks_idx.push(block);
            ceq.segments_idx.push(1);
            lt.gamplitude.push(gamplitude);
            lt.rf_offset.push(0.0);
            lt.rf_phase.push(phase);
            lt.daq_phase.push(phase);
            lt.trigout.push(false);
            lt.textra.push(0.0);
            lt.rotmat.push(IDENTITY);
            lt.adc_idx.push(adc_idx);
        }
    }

    ceq.n_max = ceq.parent_blocks_idx.len();
    ceq.looptable = lt;
    ceq
}
