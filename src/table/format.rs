use std::path::Path;

use super::error::TableError;

/// File format of the answer table, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        match extension(path).as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("xlsx") => Ok(OutputFormat::Xlsx),
            _ => Err(TableError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

pub(super) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
