//! Run configuration: built-in presets, TOML overrides and validation.

#[path = "config/error.rs"]
mod error;

#[path = "config/types.rs"]
mod types;

#[path = "config/presets.rs"]
mod presets;

#[path = "config/file.rs"]
mod file;

#[path = "config/load.rs"]
mod load;

pub use error::ConfigError;
pub use file::ConfigFile;
pub use load::{default_config_path, load_config};
pub use types::{
    GenerationConfig, IoConfig, LoggingConfig, PacingConfig, ProviderConfig, RunConfig,
    SentinelConfig,
};
