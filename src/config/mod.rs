//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config_file, save_config};
pub use paths::{config_dir, config_file_path, resolve_config_path};
pub use types::{Config, DefaultsConfig, ModelConfig, OutputConfig, OutputFormat};
pub use validate::{get_model, validate_config, validate_model_config, validate_threshold};
