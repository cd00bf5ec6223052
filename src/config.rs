use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::constants::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};

/// Where the registry is read from and where the contact list goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl PipelineConfig {
    /// Build from positional arguments (program name already skipped):
    /// `[INPUT_CSV] [OUTPUT_CSV]`, each falling back to its default.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if args.len() > 2 {
            bail!(
                "expected at most 2 arguments ([INPUT_CSV] [OUTPUT_CSV]), got {}",
                args.len()
            );
        }

        let mut config = Self::default();
        if let Some(input) = args.first() {
            config.input_path = PathBuf::from(input);
        }
        if let Some(output) = args.get(1) {
            config.output_path = PathBuf::from(output);
        }
        Ok(config)
    }
}
