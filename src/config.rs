use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::domains::area_map::TableRole;

/// Environment variable naming the input data directory when `data.base_dir` is unset.
pub const DATA_DIR_ENV: &str = "GRID_ROUTE_DATA_DIR";

/// Prefix for layered overrides, e.g. `GRID_ROUTE__ROUTE__ORIGIN_CATEGORY=Home`.
pub const ENV_PREFIX: &str = "GRID_ROUTE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub output: OutputConfig,
    pub route: RouteConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub base_dir: Option<PathBuf>,
    pub map_table: String,
    pub structure_table: String,
    pub category_table: String,
    pub delimiter: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Defaults to the data directory.
    pub dir: Option<PathBuf>,
    pub merged_table: String,
    pub area_table: String,
    pub path_table: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub origin_category: String,
    pub destination_category: String,
    /// Restrict the traversal graph to one area.
    pub area: Option<i64>,
    /// Area written out as the filtered area table.
    pub area_filter: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            map_table: "area_map.csv".to_string(),
            structure_table: "area_struct.csv".to_string(),
            category_table: "area_category.csv".to_string(),
            delimiter: ',',
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            merged_table: "area_merged.csv".to_string(),
            area_table: "area_filtered.csv".to_string(),
            path_table: "route.csv".to_string(),
            summary: None,
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            origin_category: "MyHome".to_string(),
            destination_category: "BandalgomCoffee".to_string(),
            area: None,
            area_filter: Some(1),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Defaults, then the optional TOML file, then `GRID_ROUTE__*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default()).context("encoding defaults")?);
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
        }
        let layered = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("building layered configuration")?;
        layered
            .try_deserialize()
            .context("decoding layered configuration")
    }

    /// Precedence: `data.base_dir` -> `GRID_ROUTE_DATA_DIR` -> ./resources/area_map -> current directory.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data.base_dir {
            return dir.clone();
        }
        if let Ok(v) = env::var(DATA_DIR_ENV) {
            return PathBuf::from(v);
        }
        let cwd_default = Path::new("resources/area_map");
        if cwd_default.exists() {
            return cwd_default.to_path_buf();
        }
        PathBuf::from(".")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output.dir.clone().unwrap_or_else(|| self.data_dir())
    }

    /// Input file for a raw table role; the merged artifact lives in the output directory.
    pub fn table_path(&self, role: TableRole) -> PathBuf {
        match role {
            TableRole::Map => self.data_dir().join(&self.data.map_table),
            TableRole::Structure => self.data_dir().join(&self.data.structure_table),
            TableRole::Category => self.data_dir().join(&self.data.category_table),
            TableRole::Merged => self.output_dir().join(&self.output.merged_table),
        }
    }

    /// Config rooted at `base`, writing outputs next to the inputs.
    pub fn with_base_dir<P: Into<PathBuf>>(base: P) -> Self {
        let mut config = Config::default();
        config.data.base_dir = Some(base.into());
        config
    }
}
