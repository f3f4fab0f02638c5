// Converts a small 2D gradient echo and prints the bundle the file writer
// would receive. Run with RUST_LOG=debug to see the per module narration.

use pulceq2toppe::{
    Adc, ConvertOptions, Gradient, LoopTable, ParentBlock, PulCeq, Rf, SystemSpecs,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn trap(amp: f64, rise: f64, flat: f64, fall: f64) -> Option<Gradient> {
    Some(Gradient::Trap {
        amp,
        rise,
        flat,
        fall,
        delay: 0.0,
    })
}

fn gre(n_views: usize) -> PulCeq {
    // 1 ms sinc, 4 zero crossings
    let sinc: Vec<f64> = (0..1000)
        .map(|i| {
            let x = (i as f64 - 500.0) / 125.0 * std::f64::consts::PI;
            if x == 0.0 {
                1.0
            } else {
                x.sin() / x
            }
        })
        .collect();

    let excitation = ParentBlock {
        rf: Some(Rf {
            amp: 250.0,
            phase_shape: vec![0.0; sinc.len()],
            amp_shape: sinc,
            dwell: 1e-6,
            delay: 100e-6,
            ..Default::default()
        }),
        gz: trap(4e5, 100e-6, 1000e-6, 100e-6),
        block_duration: 1.2e-3,
        ..Default::default()
    };
    let prephaser = ParentBlock {
        gx: trap(-5e5, 100e-6, 300e-6, 100e-6),
        gy: trap(5e5, 100e-6, 300e-6, 100e-6),
        gz: trap(-4e5, 100e-6, 300e-6, 100e-6),
        block_duration: 500e-6,
        ..Default::default()
    };
    let readout = ParentBlock {
        gx: trap(5e5, 100e-6, 1280e-6, 100e-6),
        adc: Some(Adc {
            num: 256,
            dwell: 5e-6,
            delay: 100e-6,
            ..Default::default()
        }),
        block_duration: 1.48e-3,
        ..Default::default()
    };

    let mut ceq = PulCeq {
        parent_blocks: vec![None, Some(excitation), Some(prephaser), Some(readout)],
        blocks_in_segment: vec![vec![1, 2, 3, 0]],
        ..Default::default()
    };

    let mut lt = LoopTable::default();
    let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    for view in 0..n_views {
        let pe = view as f64 / n_views as f64 * 2.0 - 1.0;
        for (block, gamplitude, adc_idx, textra) in [
            (1, [0.0, 0.0, 1.0], 0, 0.0),
            (2, [1.0, pe, 1.0], 0, 0.0),
            (3, [1.0, 0.0, 0.0], view, 0.0),
            (0, [0.0, 0.0, 0.0], 0, 5e-3),
        ] {
            ceq.parent_blocks_idx.push(block);
            ceq.segments_idx.push(1);
            lt.gamplitude.push(gamplitude);
            lt.rf_offset.push(0.0);
            lt.rf_phase.push(0.0);
            lt.daq_phase.push(0.0);
            lt.trigout.push(false);
            lt.textra.push(textra);
            lt.rotmat.push(identity);
            lt.adc_idx.push(adc_idx);
        }
    }
    ceq.n_max = ceq.parent_blocks_idx.len();
    ceq.looptable = lt;
    ceq
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();

    let ceq = gre(64);
    let sys = SystemSpecs::default().with_extra("gradient", "xrm");
    let options = ConvertOptions::new("gre2d").with_verbose(true);

    match pulceq2toppe::ceq_to_files(&ceq, &sys, &options) {
        Ok(bundle) => {
            for (id, module) in bundle.modules.iter() {
                println!("{id}: {} samples, nChop = {:?}", module.len(), module.n_chop);
            }
            println!(
                "b1 scaling: {}, readout: {}",
                bundle.b1scaling_name(),
                bundle.readout_name()
            );
            match bundle.to_json() {
                Ok(json) => println!("{} bytes of json", json.len()),
                Err(e) => eprintln!("{e}"),
            }
        }
        Err(e) => {
            eprintln!("conversion failed: {e}");
            std::process::exit(1);
        }
    }
}
