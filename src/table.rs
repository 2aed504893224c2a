//! Spreadsheet input and output for prompt batches.

#[path = "table/error.rs"]
mod error;

#[path = "table/format.rs"]
mod format;

#[path = "table/reader.rs"]
mod reader;

#[path = "table/writer.rs"]
mod writer;

pub use error::TableError;
pub use format::OutputFormat;
pub use reader::{read_prompts, PROMPT_COLUMN};
pub use writer::{answer_columns, write_answers};
