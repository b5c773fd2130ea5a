//! Configuration schema definitions
//!
//! Every section and field carries a serde default, so a partial file (or no
//! file at all) yields the sample dashboard setup.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    /// Buffer radii and polygon resolution
    #[serde(default)]
    pub coverage: CoverageConfig,

    /// Synthetic asset generator
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Stations placed at startup
    #[serde(default = "default_seed_stations")]
    pub stations: Vec<SeedStationConfig>,

    /// Initial map view
    #[serde(default)]
    pub map: MapConfig,

    /// Incident CSV cleaning
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self {
            coverage: CoverageConfig::default(),
            assets: AssetsConfig::default(),
            stations: default_seed_stations(),
            map: MapConfig::default(),
            cleaning: CleaningConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Coverage buffer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Radius of the inner buffer, also used by the placement heuristic
    #[serde(default = "default_inner_radius_km")]
    pub inner_radius_km: f64,

    /// Radius of the outer buffer
    #[serde(default = "default_outer_radius_km")]
    pub outer_radius_km: f64,

    /// Number of segments used to approximate each buffer circle
    #[serde(default = "default_buffer_segments")]
    pub buffer_segments: usize,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            inner_radius_km: default_inner_radius_km(),
            outer_radius_km: default_outer_radius_km(),
            buffer_segments: default_buffer_segments(),
        }
    }
}

fn default_inner_radius_km() -> f64 {
    5.0
}

fn default_outer_radius_km() -> f64 {
    10.0
}

fn default_buffer_segments() -> usize {
    64
}

/// Synthetic asset generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Number of assets to generate
    #[serde(default = "default_asset_count")]
    pub count: usize,

    /// RNG seed; identical seeds give identical asset sets
    #[serde(default = "default_asset_seed")]
    pub seed: u64,

    /// Southern edge of the generation window
    #[serde(default = "default_lat_min")]
    pub lat_min: f64,

    /// Height of the generation window in degrees
    #[serde(default = "default_lat_span")]
    pub lat_span: f64,

    /// Western edge of the generation window
    #[serde(default = "default_lng_min")]
    pub lng_min: f64,

    /// Width of the generation window in degrees
    #[serde(default = "default_lng_span")]
    pub lng_span: f64,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            count: default_asset_count(),
            seed: default_asset_seed(),
            lat_min: default_lat_min(),
            lat_span: default_lat_span(),
            lng_min: default_lng_min(),
            lng_span: default_lng_span(),
        }
    }
}

fn default_asset_count() -> usize {
    50
}

fn default_asset_seed() -> u64 {
    42
}

fn default_lat_min() -> f64 {
    20.8
}

fn default_lat_span() -> f64 {
    2.2
}

fn default_lng_min() -> f64 {
    77.8
}

fn default_lng_span() -> f64 {
    2.7
}

/// A station placed when the session starts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedStationConfig {
    /// Display name
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

fn default_seed_stations() -> Vec<SeedStationConfig> {
    vec![
        SeedStationConfig {
            name: "User Station: Nagpur Fire Station".to_string(),
            latitude: 21.1466,
            longitude: 79.0888,
        },
        SeedStationConfig {
            name: "User Station: Indore Ambulance HQ".to_string(),
            latitude: 22.7179,
            longitude: 75.8577,
        },
    ]
}

/// Initial map view, carried into the rendered GeoJSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// View center latitude
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,

    /// View center longitude
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            zoom: default_zoom(),
        }
    }
}

fn default_center_latitude() -> f64 {
    21.1466
}

fn default_center_longitude() -> f64 {
    79.0888
}

fn default_zoom() -> u8 {
    7
}

/// Incident cleaning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Raw incident CSV
    #[serde(default = "default_cleaning_input")]
    pub input: String,

    /// Cleaned CSV, overwritten on every run
    #[serde(default = "default_cleaning_output")]
    pub output: String,

    /// Bounding box; rows outside it are dropped
    #[serde(default = "default_bounds_lat_min")]
    pub lat_min: f64,

    #[serde(default = "default_bounds_lat_max")]
    #[allow(missing_docs)]
    pub lat_max: f64,

    #[serde(default = "default_bounds_lon_min")]
    #[allow(missing_docs)]
    pub lon_min: f64,

    #[serde(default = "default_bounds_lon_max")]
    #[allow(missing_docs)]
    pub lon_max: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            input: default_cleaning_input(),
            output: default_cleaning_output(),
            lat_min: default_bounds_lat_min(),
            lat_max: default_bounds_lat_max(),
            lon_min: default_bounds_lon_min(),
            lon_max: default_bounds_lon_max(),
        }
    }
}

fn default_cleaning_input() -> String {
    "data/nyc_911_raw.csv".to_string()
}

fn default_cleaning_output() -> String {
    "data/nyc_911_clean.csv".to_string()
}

// NYC, approximately
fn default_bounds_lat_min() -> f64 {
    40.4774
}

fn default_bounds_lat_max() -> f64 {
    40.9176
}

fn default_bounds_lon_min() -> f64 {
    -74.2591
}

fn default_bounds_lon_max() -> f64 {
    -73.7004
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
