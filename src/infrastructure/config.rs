use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Prefix of environment variables overriding file settings,
/// e.g. `BIODIVERSITY__SERVER__PORT=5005`
const ENV_PREFIX: &str = "BIODIVERSITY";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub dataset: DatasetSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Dashboard page served at `/`
    pub index_path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    Sqlite,
    Csv,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetSettings {
    pub source: DatasetSource,
    pub sqlite_path: String,
    pub csv: CsvSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CsvSettings {
    pub otu_path: String,
    pub samples_path: String,
    pub metadata_path: String,
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5005)?
        .set_default("server.index_path", "templates/index.html")?
        .set_default("dataset.source", "sqlite")?
        .set_default(
            "dataset.sqlite_path",
            "DataSets/belly_button_biodiversity.sqlite",
        )?
        .set_default(
            "dataset.csv.otu_path",
            "DataSets/belly_button_biodiversity_otu_id.csv",
        )?
        .set_default(
            "dataset.csv.samples_path",
            "DataSets/belly_button_biodiversity_samples.csv",
        )?
        .set_default(
            "dataset.csv.metadata_path",
            "DataSets/Belly_Button_Biodiversity_Metadata.csv",
        )
}

/// Load settings from defaults, then `config/server.*`, then the environment
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = builder_with_defaults()?
        .add_source(File::with_name("config/server").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
