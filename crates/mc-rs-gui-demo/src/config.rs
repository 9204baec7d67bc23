use serde::Deserialize;
use std::path::Path;

use mc_rs_gui::config::NavigationSection;

#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub demo: DemoSection,
    #[serde(default)]
    pub navigation: NavigationSection,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DemoSection {
    /// Interval between deferred-move flushes, in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    #[serde(default = "default_viewer_name")]
    pub viewer_name: String,
    #[serde(default)]
    pub operator: bool,
    /// Print every shown view as JSON instead of a slot listing.
    #[serde(default)]
    pub json_views: bool,
}

fn default_tick_millis() -> u64 {
    50
}

fn default_viewer_name() -> String {
    "Steve".into()
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            viewer_name: default_viewer_name(),
            operator: false,
            json_views: false,
        }
    }
}

impl DemoConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: DemoConfig = toml::from_str(contents)?;
        Ok(config)
    }
}
