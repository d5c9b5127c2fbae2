//! Export configuration.
//!
//! Exporters are constructed with an [`ExportOptions`] value; the registry's
//! built-in set shares one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where and how exporters write their files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Directory receiving output files
    pub output_dir: PathBuf,
    /// Create `output_dir` when it does not exist
    pub create_dirs: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            create_dirs: true,
        }
    }
}

impl ExportOptions {
    /// Create default options: current directory, create missing dirs
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder: toggle creation of a missing output directory
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    /// Full output path for `filename` with `extension` appended
    pub fn path_for(&self, filename: &str, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", filename, extension))
    }

    /// The output directory
    pub fn dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_appends_extension() {
        let options = ExportOptions::new().output_dir("out");
        assert_eq!(options.path_for("report", "csv"), PathBuf::from("out/report.csv"));
    }

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.dir(), Path::new("."));
        assert!(options.create_dirs);
        assert!(!ExportOptions::new().create_dirs(false).create_dirs);
    }
}
