use serde::Deserialize;
use std::path::Path;

use crate::layout::{
    page_turn_button, placeholder_button, NavigationPosition, NavigationStyle, NAVIGATION_SOUND,
    NEXT_PAGE_TITLE, PLACEHOLDER_ICON, PREVIOUS_PAGE_TITLE,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuiConfig {
    #[serde(default)]
    pub navigation: NavigationSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavigationSection {
    #[serde(default)]
    pub position: NavigationPosition,
    #[serde(default)]
    pub placeholders: bool,
    #[serde(default = "default_previous_title")]
    pub previous_title: String,
    #[serde(default = "default_next_title")]
    pub next_title: String,
    /// Sound of both navigation buttons. Empty = silent.
    #[serde(default = "default_sound")]
    pub sound: String,
    #[serde(default = "default_placeholder_icon")]
    pub placeholder_icon: String,
}

fn default_previous_title() -> String {
    PREVIOUS_PAGE_TITLE.into()
}

fn default_next_title() -> String {
    NEXT_PAGE_TITLE.into()
}

fn default_sound() -> String {
    NAVIGATION_SOUND.into()
}

fn default_placeholder_icon() -> String {
    PLACEHOLDER_ICON.into()
}

impl Default for NavigationSection {
    fn default() -> Self {
        Self {
            position: NavigationPosition::default(),
            placeholders: false,
            previous_title: default_previous_title(),
            next_title: default_next_title(),
            sound: default_sound(),
            placeholder_icon: default_placeholder_icon(),
        }
    }
}

impl NavigationSection {
    /// Build the navigation row described by this section.
    pub fn style(&self) -> NavigationStyle {
        let sound = (!self.sound.is_empty()).then_some(self.sound.as_str());
        NavigationStyle {
            position: self.position,
            placeholders: self.placeholders,
            previous: page_turn_button(self.previous_title.as_str(), sound, -1),
            next: page_turn_button(self.next_title.as_str(), sound, 1),
            placeholder: placeholder_button(self.placeholder_icon.as_str()),
        }
    }
}

impl GuiConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn navigation_style(&self) -> NavigationStyle {
        self.navigation.style()
    }
}
