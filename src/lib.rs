//! Collect repeated answers from an LLM for every prompt in a spreadsheet.
//!
//! The pipeline reads a `Prompt` column, sends each prompt to a provider a
//! fixed number of times, and writes one row per prompt with one column per
//! attempt. Failed attempts are stored as error sentinels so every row keeps
//! the same shape.
//!
//! ```no_run
//! use llm_batch::{batch, builder::LLMBackend, collector::NoProgress, config::RunConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunConfig::preset(LLMBackend::Google);
//! let provider = batch::build_provider(&config)?;
//! let report = batch::run_batch(&config, provider.as_ref(), &NoProgress).await?;
//! println!("{} rows written to {}", report.rows, report.output.display());
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod batch;
pub mod builder;
pub mod chat;
pub mod collector;
pub mod config;
pub mod error;
pub mod table;

pub use batch::{run_batch, BatchError, BatchReport};
pub use error::LLMError;
