use esgfolio_core::config::{keys, ConfigMap, ConfigValue, PipelineConfig};

const ENV_PREFIX: &str = "ESGFOLIO_";

pub struct Config {
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Resolves pipeline settings from `ESGFOLIO_*` variables, after loading
    /// `.env` when one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let map = config_map(|name| std::env::var(name).ok());
        let pipeline = PipelineConfig::from_map(&map)?;
        Ok(Self { pipeline })
    }
}

/// `esg.weights.environmental` -> `ESGFOLIO_ESG_WEIGHTS_ENVIRONMENTAL`
pub fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.replace('.', "_").to_uppercase())
}

fn config_map(lookup: impl Fn(&str) -> Option<String>) -> ConfigMap {
    keys::ALL
        .iter()
        .filter_map(|key| {
            lookup(&env_var_name(key)).map(|raw| (key.to_string(), ConfigValue::parse(&raw)))
        })
        .collect()
}
