use std::fmt::Display;

use thiserror::Error;

use crate::ModuleId;

pub type Result<T> = std::result::Result<T, Error>;

/// Scanner acquisition limit that was hit by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Slice,
    Echo,
}

impl Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capacity::Slice => write!(f, "slices"),
            Capacity::Echo => write!(f, "echoes"),
        }
    }
}

/// Every error aborts the whole conversion, there is no partial output.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{module}: a block can either have an RF event or an ADC event, not both")]
    ConflictingEvents { module: ModuleId },

    /// `value` is the one-based slice or the zero-based echo index, matching
    /// what is compared against `max`.
    #[error("max number of {what} (={max}) exceeded, got {value}")]
    CapacityExceeded {
        what: Capacity,
        value: usize,
        max: usize,
    },

    #[error(
        "{module}: RF/ADC window (n_pre = {n_pre}, window_len = {window_len}) \
         does not fit into {n} raster samples"
    )]
    InterpolationInconsistency {
        module: ModuleId,
        n: usize,
        n_pre: usize,
        window_len: usize,
    },

    #[error("loop column `{column}` has {len} entries, expected n_max = {n_max}")]
    LoopLengthMismatch {
        column: &'static str,
        len: usize,
        n_max: usize,
    },

    #[error("timepoint {timepoint} references parent block {index}, which does not exist")]
    UnknownParentBlock { timepoint: usize, index: usize },

    #[error("parent block of {0} is missing")]
    MissingParentBlock(ModuleId),

    #[error("invalid scanner capacity: maxView = {max_view}, maxSlice = {max_slice}")]
    InvalidCapacity { max_view: usize, max_slice: usize },

    #[error("{module}: invalid raster time {raster} s")]
    InvalidRaster { module: ModuleId, raster: f64 },

    /// Also raised when the delay does not fit onto the raster at all.
    #[error("{module}: invalid event delay {delay} s")]
    InvalidDelay { module: ModuleId, delay: f64 },

    #[error("failed to serialize bundle: {0}")]
    Serialization(#[from] serde_json::Error),
}
