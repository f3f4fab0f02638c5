// Output side: what the TOPPE file writer consumes. Serialized key names
// follow the TOPPE v6 interpreter files.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::Result;

/// Stable identifier of a module: the index of the parent block it was built
/// from. Index 0 is the dummy wait module `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(pub usize);

impl ModuleId {
    pub const DELAY: Self = Self(0);

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_delay(self) -> bool {
        self == Self::DELAY
    }
}

impl Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_delay() {
            write!(f, "delay")
        } else {
            write!(f, "module{}.mod", self.0)
        }
    }
}

// Referenced by name in every output file
impl Serialize for ModuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// RF waveform on the scanner raster. Unit of `magnitude`: `Gauss`,
/// unit of `phase`: `rad`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RfWaveform {
    pub magnitude: Vec<f64>,
    pub phase: Vec<f64>,
}

impl RfWaveform {
    pub fn len(&self) -> usize {
        self.magnitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitude.is_empty()
    }

    pub(crate) fn pad_to(&mut self, n: usize) {
        self.magnitude.resize(n, 0.0);
        self.phase.resize(n, 0.0);
    }
}

/// Number of raster samples to drop at the start and the end of a module to
/// get the RF / ADC window. Serialized as `[pre, post]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "(usize, usize)")]
pub struct ChopWindow {
    pub pre: usize,
    pub post: usize,
}

impl From<ChopWindow> for (usize, usize) {
    fn from(value: ChopWindow) -> Self {
        (value.pre, value.post)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModuleTrigger {
    /// Unit: `s`
    pub delay: f64,
}

/// Scanner loadable form of a parent block. All present waveforms have the
/// same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub ofname: String,
    pub block_duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rf: Option<RfWaveform>,
    /// Unit: `G / cm`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gx: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gy: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gz: Option<Vec<f64>>,
    /// The interpreter only checks for the presence of the key
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub adc: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trig: Option<ModuleTrigger>,
    #[serde(rename = "nChop")]
    pub n_chop: ChopWindow,
}

impl Module {
    /// Number of raster samples of the module waveforms, 0 for a pure delay.
    pub fn len(&self) -> usize {
        [
            self.rf.as_ref().map(RfWaveform::len),
            self.gx.as_ref().map(Vec::len),
            self.gy.as_ref().map(Vec::len),
            self.gz.as_ref().map(Vec::len),
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registry of all converted modules. The `delay` module is always present
/// and has no descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleTable {
    modules: BTreeMap<ModuleId, Module>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ModuleId, module: Module) {
        self.modules.insert(id, module);
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(&id)
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        id.is_delay() || self.modules.contains_key(&id)
    }

    /// Number of entries, including `delay`.
    pub fn len(&self) -> usize {
        self.modules.len() + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &Module)> + '_ {
        self.modules.iter().map(|(id, module)| (*id, module))
    }

    pub fn names(&self) -> Vec<String> {
        std::iter::once(ModuleId::DELAY)
            .chain(self.modules.keys().copied())
            .map(|id| id.to_string())
            .collect()
    }
}

impl Serialize for ModuleTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        map.serialize_entry(&ModuleId::DELAY, &None::<Module>)?;
        for (id, module) in &self.modules {
            map.serialize_entry(id, &Some(module))?;
        }
        map.end()
    }
}

/// One row of the scanner loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopEvent {
    #[serde(rename = "modname")]
    pub module: ModuleId,
    #[serde(rename = "Gamplitude")]
    pub gamplitude: [f64; 3],
    #[serde(rename = "RFoffset")]
    pub rf_offset: f64,
    #[serde(rename = "RFphase")]
    pub rf_phase: f64,
    #[serde(rename = "DAQphase")]
    pub daq_phase: f64,
    pub trigout: bool,
    pub textra: f64,
    pub rotmat: [[f64; 3]; 3],
    pub view: usize,
    pub slice: usize,
    pub echo: usize,
    pub core: usize,
}

/// GE scanner specifications. Only the acquisition limits and the raster are
/// read here, everything else is handed to the file writer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSpecs {
    #[serde(rename = "maxView")]
    pub max_view: usize,
    #[serde(rename = "maxSlice")]
    pub max_slice: usize,
    #[serde(rename = "maxEcho")]
    pub max_echo: usize,
    /// Scanner waveform raster, unit: `s`
    #[serde(default = "SystemSpecs::default_raster")]
    pub raster: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SystemSpecs {
    fn default_raster() -> f64 {
        4e-6
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.to_owned(), value.into());
        self
    }
}

impl Default for SystemSpecs {
    fn default() -> Self {
        Self {
            max_view: 500,
            max_slice: 200,
            max_echo: 16,
            raster: Self::default_raster(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Everything the TOPPE file writer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilesBundle {
    pub sys: SystemSpecs,
    pub modules: ModuleTable,
    pub cores: Vec<Vec<usize>>,
    #[serde(rename = "loop")]
    pub events: Vec<LoopEvent>,
    #[serde(rename = "b1scaling_name")]
    pub b1scaling: ModuleId,
    #[serde(rename = "readout_name")]
    pub readout: ModuleId,
}

impl FilesBundle {
    pub fn b1scaling_name(&self) -> String {
        self.b1scaling.to_string()
    }

    pub fn readout_name(&self) -> String {
        self.readout.to_string()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
