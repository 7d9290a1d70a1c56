use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub scroll: ScrollSettings,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Custom property holding the main nav height
    #[serde(default = "default_nav_height_var")]
    pub nav_height_var: String,
    /// Custom property holding the sticky sub-nav height
    #[serde(default = "default_subnav_height_var")]
    pub subnav_height_var: String,
    /// Height used when a custom property is missing or unparsable
    #[serde(default = "default_fallback_height")]
    pub fallback_height: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            nav_height_var: default_nav_height_var(),
            subnav_height_var: default_subnav_height_var(),
            fallback_height: default_fallback_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollSettings {
    /// Anchor scroll animation duration in milliseconds (0 = jump)
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Extra pixels added to the anchor target so it clears the bar edge
    #[serde(default = "default_anchor_nudge")]
    pub anchor_nudge_px: i32,
    /// Jump instead of animating when the host prefers reduced motion
    #[serde(default = "default_true")]
    pub respect_reduced_motion: bool,
    /// Frame pacing for hosts without a native frame callback
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            anchor_nudge_px: default_anchor_nudge(),
            respect_reduced_motion: default_true(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

/// Element lookup and presentation class names used by page hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_sticky_bar_attr")]
    pub sticky_bar_attr: String,
    #[serde(default = "default_anchor_attr")]
    pub anchor_attr: String,
    #[serde(default = "default_hero_id")]
    pub hero_id: String,
    #[serde(default = "default_nav_id")]
    pub nav_id: String,
    #[serde(default = "default_year_id")]
    pub year_id: String,
    #[serde(default = "default_released_class")]
    pub released_class: String,
    #[serde(default = "default_nav_off_class")]
    pub nav_off_class: String,
    #[serde(default = "default_active_bar_class")]
    pub active_bar_class: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            sticky_bar_attr: default_sticky_bar_attr(),
            anchor_attr: default_anchor_attr(),
            hero_id: default_hero_id(),
            nav_id: default_nav_id(),
            year_id: default_year_id(),
            released_class: default_released_class(),
            nav_off_class: default_nav_off_class(),
            active_bar_class: default_active_bar_class(),
        }
    }
}

impl SelectorConfig {
    /// Class names must be single DOM tokens or the browser rejects every toggle
    pub fn validate(&self) -> crate::Result<()> {
        let classes = [
            ("released_class", &self.released_class),
            ("nav_off_class", &self.nav_off_class),
            ("active_bar_class", &self.active_bar_class),
        ];
        for (key, class) in classes {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(crate::Error::Config(format!(
                    "selectors.{} must be a single class name, got {:?}",
                    key, class
                )));
            }
        }
        Ok(())
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_nav_height_var() -> String { "--nav-h".to_string() }
fn default_subnav_height_var() -> String { "--subnav-h".to_string() }
fn default_fallback_height() -> u32 { 60 }
fn default_duration_ms() -> u64 { 700 }
fn default_anchor_nudge() -> i32 { 1 }
fn default_true() -> bool { true }
fn default_frame_interval() -> u64 { 16 }
fn default_sticky_bar_attr() -> String { "data-stickybar".to_string() }
fn default_anchor_attr() -> String { "data-scroll".to_string() }
fn default_hero_id() -> String { "home".to_string() }
fn default_nav_id() -> String { "siteNav".to_string() }
fn default_year_id() -> String { "y".to_string() }
fn default_released_class() -> String { "released".to_string() }
fn default_nav_off_class() -> String { "nav--off".to_string() }
fn default_active_bar_class() -> String { "stickybar--active".to_string() }

impl PageConfig {
    /// Load configuration from `path`, or defaults when the file is absent
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.selectors.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Get the default configuration file path
    /// Always uses ~/.config/landing-nav/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("landing-nav")
            .join("config.toml")
    }
}

/// Pixel heights of the main nav and the sticky sub-nav, fixed for the page session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationHeights {
    pub nav_height: u32,
    pub subnav_height: u32,
}

impl Default for NavigationHeights {
    fn default() -> Self {
        Self {
            nav_height: default_fallback_height(),
            subnav_height: default_fallback_height(),
        }
    }
}

impl NavigationHeights {
    pub fn new(nav_height: u32, subnav_height: u32) -> Self {
        Self {
            nav_height,
            subnav_height,
        }
    }

    /// Read both heights through `lookup`, which maps a custom property name
    /// to its raw computed value.
    pub fn from_vars<F>(config: &NavConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let nav = lookup(&config.nav_height_var);
        let subnav = lookup(&config.subnav_height_var);
        let heights = Self {
            nav_height: read_px_var(nav.as_deref(), config.fallback_height),
            subnav_height: read_px_var(subnav.as_deref(), config.fallback_height),
        };
        tracing::debug!(
            nav_height = heights.nav_height,
            subnav_height = heights.subnav_height,
            "Navigation heights resolved"
        );
        heights
    }
}

/// Parse a pixel dimension such as `"60px"` or `" 48 "`.
///
/// Takes the leading integer and ignores any unit suffix. Empty, non-numeric,
/// negative and overflowing values yield `fallback`.
pub fn read_px_var(raw: Option<&str>, fallback: u32) -> u32 {
    let Some(raw) = raw else {
        return fallback;
    };
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse().unwrap_or(fallback)
}
