// Input side: the vendor neutral PulCeq description. Units follow Pulseq
// (Hz for RF, Hz/m for gradients, seconds for time) so the structs can be
// filled directly from a parsed .seq file.

/// RF event of a parent block. Frequency and phase offsets are not part of
/// the block, they come from the loop (`LoopTable::rf_offset`, `rf_phase`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rf {
    /// Peak amplitude, unit: `Hz`
    pub amp: f64,
    /// Magnitude shape, normalized to a peak of 1
    pub amp_shape: Vec<f64>,
    /// Unit: turns (multiples of 2 pi), as in pulseq-rs. May be empty for a
    /// pulse with constant phase.
    pub phase_shape: Vec<f64>,
    /// Spacing of the shape samples, unit: `s`
    pub dwell: f64,
    /// Unit: `s`
    pub delay: f64,
}

impl Rf {
    pub fn duration(&self) -> f64 {
        self.amp_shape.len() as f64 * self.dwell
    }
}

/// Gradient event on one axis. Arbitrary shapes are sampled on the Pulseq
/// gradient raster (`CeqSystem::grad_raster_time`).
#[derive(Debug, Clone, PartialEq)]
pub enum Gradient {
    Free {
        /// Unit: `Hz / m`
        amp: f64,
        /// Unit: `s`
        delay: f64,
        shape: Vec<f64>,
    },
    Trap {
        /// Unit: `Hz / m`
        amp: f64,
        rise: f64,
        flat: f64,
        fall: f64,
        delay: f64,
    },
}

impl Gradient {
    pub fn delay(&self) -> f64 {
        match self {
            Gradient::Free { delay, .. } | Gradient::Trap { delay, .. } => *delay,
        }
    }

    pub fn duration(&self, grad_raster: f64) -> f64 {
        match self {
            Gradient::Free { shape, .. } => shape.len() as f64 * grad_raster,
            Gradient::Trap {
                rise, flat, fall, ..
            } => rise + flat + fall,
        }
    }
}

/// Acquisition event. The receiver phase comes from `LoopTable::daq_phase`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Adc {
    pub num: usize,
    /// Unit: `s`
    pub dwell: f64,
    /// Unit: `s`
    pub delay: f64,
}

impl Adc {
    pub fn duration(&self) -> f64 {
        self.num as f64 * self.dwell
    }
}

/// TTL output pulse.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Trigger {
    /// Unit: `s`
    pub delay: f64,
    /// Unit: `s`
    pub duration: f64,
}

/// One of the unique block shapes of the sequence. A block never carries an
/// RF and an ADC event at the same time, the module builder rejects it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParentBlock {
    pub rf: Option<Rf>,
    pub gx: Option<Gradient>,
    pub gy: Option<Gradient>,
    pub gz: Option<Gradient>,
    pub adc: Option<Adc>,
    pub trig: Option<Trigger>,
    /// Unit: `s`
    pub block_duration: f64,
}

/// Dynamic, per timepoint settings of the sequence, stored column wise.
/// Every column must contain exactly `PulCeq::n_max` entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoopTable {
    /// Gradient scaling per axis (x, y, z)
    pub gamplitude: Vec<[f64; 3]>,
    /// RF frequency offset, unit: `Hz`
    pub rf_offset: Vec<f64>,
    /// RF phase offset, unit: `rad`
    pub rf_phase: Vec<f64>,
    /// Receiver phase, unit: `rad`
    pub daq_phase: Vec<f64>,
    pub trigout: Vec<bool>,
    /// Extra delay appended after the block, unit: `s`
    pub textra: Vec<f64>,
    pub rotmat: Vec<[[f64; 3]; 3]>,
    /// Flat acquisition index, decoded into view / slice / echo
    pub adc_idx: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CeqSystem {
    /// Pulseq gradient raster, unit: `s`
    pub grad_raster_time: f64,
}

impl Default for CeqSystem {
    fn default() -> Self {
        Self {
            grad_raster_time: 10e-6,
        }
    }
}

/// The complete PulCeq sequence description.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PulCeq {
    /// Index 0 is the sentinel delay block and usually `None`
    pub parent_blocks: Vec<Option<ParentBlock>>,
    /// Parent block indices of every segment ("core")
    pub blocks_in_segment: Vec<Vec<usize>>,
    /// Segment of every timepoint
    pub segments_idx: Vec<usize>,
    /// Parent block of every timepoint
    pub parent_blocks_idx: Vec<usize>,
    pub n_max: usize,
    pub looptable: LoopTable,
    pub sys: CeqSystem,
}
