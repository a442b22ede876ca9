//! Config module - resolved key/value settings and the typed view over them.

mod config_model;
mod pipeline_config;

pub use config_model::{keys, ConfigMap, ConfigValue};
pub use pipeline_config::{PipelineConfig, DEFAULT_BATCH_SIZE, DEFAULT_QUALITY_THRESHOLD};
