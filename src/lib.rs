//! Converts PulCeq sequences into the files executed by the TOPPE interpreter
//! (v6) on GE scanners. PulCeq describes a sequence by a small set of unique
//! parent blocks and a loop that references them for every timepoint; TOPPE
//! wants one module per parent block plus a row wise scanner loop.
//!
//! The public API is a single call, `ceq_to_files`, which returns a
//! `FilesBundle`. Writing the bundle to the binary .mod / loop files is left
//! to the caller, the bundle itself can be serialized with serde.

mod config;
mod convert;
mod error;
pub mod interp;
mod module;
mod select;
mod transpose;
mod types;

#[cfg(test)]
mod test_utils;

pub use config::{ConvertOptions, DEFAULT_SEQUENCE_ROOT};
pub use convert::{ceq_to_files, ceq_to_files_with};
pub use error::{Capacity, Error, Result};
pub use module::build_module;
pub use select::{find_b1_scaling, find_readout};
pub use transpose::{transpose_loop, AcqIndex};
pub use types::*;
