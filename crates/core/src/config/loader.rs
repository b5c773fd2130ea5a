//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use std::path::Path;

/// Smallest polygon resolution that still looks like a circle
const MIN_BUFFER_SEGMENTS: usize = 8;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed (or default) settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit `path` must exist; without one, the standard locations are
    /// searched and defaults are used when none is found.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        validate(&schema)?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        validate(&schema)?;
        Ok(Self { schema, path: None })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [".responder.toml", "responder.toml", ".config/responder.toml"];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(ToString::to_string)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {path}: {e}")))?;

    toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("While parsing config file {path}"))
    })
}

fn validate(schema: &ConfigSchema) -> Result<()> {
    let coverage = &schema.coverage;
    if !(coverage.inner_radius_km.is_finite() && coverage.inner_radius_km > 0.0) {
        return Err(Error::config_invalid("coverage.inner_radius_km", "must be positive"));
    }
    if !(coverage.outer_radius_km.is_finite() && coverage.outer_radius_km > 0.0) {
        return Err(Error::config_invalid("coverage.outer_radius_km", "must be positive"));
    }
    if coverage.buffer_segments < MIN_BUFFER_SEGMENTS {
        return Err(Error::config_invalid(
            "coverage.buffer_segments",
            format!("must be at least {MIN_BUFFER_SEGMENTS}"),
        ));
    }

    let assets = &schema.assets;
    if assets.lat_span < 0.0 || assets.lng_span < 0.0 {
        return Err(Error::config_invalid("assets", "spans must not be negative"));
    }

    let cleaning = &schema.cleaning;
    if cleaning.lat_min > cleaning.lat_max || cleaning.lon_min > cleaning.lon_max {
        return Err(Error::config_invalid("cleaning", "bounding box minimum exceeds maximum"));
    }

    Ok(())
}
