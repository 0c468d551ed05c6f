//! Page behavior configuration.
//!
//! Every field has a default matching the shipped markup and stylesheet, so
//! a page only needs to provide the values it wants to change. Overrides are
//! read from a `<script type="application/json" id="portfolio-config">`
//! element when present.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

pub const DEFAULT_PHRASES: [&str; 3] = ["Web Developer", "Data Engineer", "Researcher"];
pub const DEFAULT_TYPE_DELAY_MS: u32 = 140;
pub const DEFAULT_DELETE_DELAY_MS: u32 = 80;
pub const DEFAULT_PAUSE_DELAY_MS: u32 = 1500;

pub const DEFAULT_REVEAL_SELECTOR: &str = ".fade-in-up, .fade-in-left, .fade-in-right";
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.15;
pub const DEFAULT_REVEAL_ROOT_MARGIN: &str = "0px 0px -80px 0px";

pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 60.0;
pub const DEFAULT_SECTION_THRESHOLD: f64 = 0.6;

pub const DEFAULT_STORAGE_KEY: &str = "preferred-theme";

pub const DEFAULT_STATUS_CLEAR_MS: u32 = 5000;
pub const DEFAULT_SENDING_MESSAGE: &str = "Invio in corso...";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Grazie! Ti risponderò a breve.";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Impossibile inviare il messaggio. Scrivimi via email.";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("typing phrase list is empty")]
    NoPhrases,
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f64 },
    #[error("{0} must be greater than zero")]
    ZeroDelay(&'static str),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub typing: TypingConfig,
    pub reveal: RevealConfig,
    pub navbar: NavbarConfig,
    pub theme: ThemeConfig,
    pub contact: ContactConfig,
    pub footer: FooterConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub target_id: String,
    pub phrases: Vec<String>,
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub pause_delay_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            target_id: "typing".to_owned(),
            phrases: DEFAULT_PHRASES.iter().copied().map(str::to_owned).collect(),
            type_delay_ms: DEFAULT_TYPE_DELAY_MS,
            delete_delay_ms: DEFAULT_DELETE_DELAY_MS,
            pause_delay_ms: DEFAULT_PAUSE_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub appeared_class: String,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_REVEAL_SELECTOR.to_owned(),
            appeared_class: "appear".to_owned(),
            threshold: DEFAULT_REVEAL_THRESHOLD,
            root_margin: DEFAULT_REVEAL_ROOT_MARGIN.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub nav_id: String,
    pub link_selector: String,
    pub scrolled_class: String,
    pub active_class: String,
    pub scroll_threshold_px: f64,
    pub section_threshold: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            nav_id: "mainNav".to_owned(),
            link_selector: ".nav-link".to_owned(),
            scrolled_class: "scrolled".to_owned(),
            active_class: "active".to_owned(),
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            section_threshold: DEFAULT_SECTION_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub toggle_id: String,
    pub light_icon_selector: String,
    pub dark_icon_selector: String,
    pub storage_key: String,
    /// Attribute set on the root element to `light` or `dark`.
    pub marker_attribute: String,
    pub root_dark_class: String,
    pub body_dark_class: String,
    pub hidden_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle_id: "themeToggle".to_owned(),
            light_icon_selector: ".icon-light".to_owned(),
            dark_icon_selector: ".icon-dark".to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            marker_attribute: "data-theme".to_owned(),
            root_dark_class: "dark".to_owned(),
            body_dark_class: "dark-mode".to_owned(),
            hidden_class: "d-none".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub form_id: String,
    pub status_id: String,
    pub error_class: String,
    pub sending_message: String,
    pub success_message: String,
    pub failure_message: String,
    pub status_clear_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_owned(),
            status_id: "formStatus".to_owned(),
            error_class: "text-danger".to_owned(),
            sending_message: DEFAULT_SENDING_MESSAGE.to_owned(),
            success_message: DEFAULT_SUCCESS_MESSAGE.to_owned(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_owned(),
            status_clear_ms: DEFAULT_STATUS_CLEAR_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Element whose text becomes the current year.
    pub year_id: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self { year_id: "year".to_owned() }
    }
}

impl PortfolioConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed or a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the behaviors rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing.phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        for (field, delay) in [
            ("typing.type_delay_ms", self.typing.type_delay_ms),
            ("typing.delete_delay_ms", self.typing.delete_delay_ms),
            ("typing.pause_delay_ms", self.typing.pause_delay_ms),
        ] {
            if delay == 0 {
                return Err(ConfigError::ZeroDelay(field));
            }
        }
        for (field, value) in [
            ("reveal.threshold", self.reveal.threshold),
            ("navbar.section_threshold", self.navbar.section_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { field, value });
            }
        }
        Ok(())
    }
}
