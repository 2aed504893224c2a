use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("'{}' contains no worksheets", path.display())]
    NoSheets { path: PathBuf },
    #[error("input must contain a column named '{column}' (found: {})", found.join(", "))]
    MissingColumn { column: String, found: Vec<String> },
    #[error("unsupported output format for '{}' (use .xlsx or .csv)", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    pub(crate) fn read(path: &std::path::Path, message: impl ToString) -> Self {
        TableError::Read {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}
