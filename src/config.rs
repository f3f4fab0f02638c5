use std::path::PathBuf;

/// Location of the TOPPE v6 sequence files on the scanner.
pub const DEFAULT_SEQUENCE_ROOT: &str = "/usr/g/research/pulseq/v6/seq2ge";

/// Per conversion options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    /// Only used for naming the output files
    pub sequence_name: String,
    /// Drop all TTL pulses from the modules
    pub ignore_trigger: bool,
    /// Overrides `DEFAULT_SEQUENCE_ROOT/{sequence_name}`
    pub sequence_path: Option<PathBuf>,
    /// Narrate progress at `info` level instead of `debug`
    pub verbose: bool,
}

impl ConvertOptions {
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self {
            sequence_name: sequence_name.into(),
            ..Default::default()
        }
    }

    pub fn with_ignore_trigger(mut self, ignore_trigger: bool) -> Self {
        self.ignore_trigger = ignore_trigger;
        self
    }

    pub fn with_sequence_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sequence_path = Some(path.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Directory on the scanner the interpreter loads the files from.
    pub fn sequence_path(&self) -> PathBuf {
        self.sequence_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEQUENCE_ROOT).join(&self.sequence_name))
    }
}
