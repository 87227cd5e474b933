use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;

pub const NEARBY_CHAPTERS_KEY: &str = "nearby_chapters";
pub const REQUESTED_LOCATION_KEY: &str = "requested_location";

const HEREDOC_DELIMITER: &str = "EOF";

/// Writes workflow step outputs in the `GITHUB_OUTPUT` file format.
pub struct StepOutputs {
    path: Option<PathBuf>,
}

impl StepOutputs {
    /// With no path, outputs are printed to stdout instead.
    pub fn new(path: Option<PathBuf>) -> Self {
        StepOutputs { path }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.append(&format!("{}={}\n", key, value))
    }

    pub fn set_multiline(&self, key: &str, value: &str) -> Result<()> {
        self.append(&format!(
            "{key}<<{delim}\n{value}\n{delim}\n",
            key = key,
            value = value,
            delim = HEREDOC_DELIMITER
        ))
    }

    fn append(&self, entry: &str) -> Result<()> {
        match &self.path {
            Some(path) => {
                debug!("Appending step output to {}", path.display());
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(entry.as_bytes())?;
            }
            None => print!("{}", entry),
        }
        Ok(())
    }
}
