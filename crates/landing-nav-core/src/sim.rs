//! In-memory landing page
//!
//! [`SimulatedPage`] lays out a hero, sticky bars and anchor targets on a
//! virtual document and answers geometry queries the way a browser would for
//! the current scroll offset. It records every effect the controller writes,
//! which makes it the host for the CLI and for integration tests.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::PageController;
use crate::geometry::{GeometryProvider, PageSurface, Rect};
use crate::scroll::{AnimationToken, FrameOutcome};

/// Static description of a page, loadable from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default = "default_document_height")]
    pub document_height: f64,
    #[serde(default)]
    pub reduced_motion: bool,
    /// Computed custom properties on the document root, e.g. `"--nav-h" = "60px"`
    #[serde(default)]
    pub custom_properties: HashMap<String, String>,
    #[serde(default)]
    pub hero: Option<HeroLayout>,
    #[serde(default, rename = "sticky_bar")]
    pub sticky_bars: Vec<StickyBarLayout>,
    #[serde(default, rename = "anchor")]
    pub anchors: Vec<AnchorLayout>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            document_height: default_document_height(),
            reduced_motion: false,
            custom_properties: HashMap::new(),
            hero: None,
            sticky_bars: Vec::new(),
            anchors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroLayout {
    /// Document Y of the hero's top edge
    #[serde(default)]
    pub top: f64,
    /// Rendered height once the image has loaded
    pub height: f64,
    /// An unloaded hero image renders with zero height
    #[serde(default = "default_true")]
    pub loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyBarLayout {
    /// Document Y of the bar in normal flow
    pub top: f64,
    pub height: f64,
    /// Viewport offset the bar pins at (CSS `top`)
    #[serde(default)]
    pub stick_at: f64,
    /// Document Y of the containing block's bottom; the bar scrolls away past it
    #[serde(default)]
    pub container_bottom: Option<f64>,
}

impl StickyBarLayout {
    /// Viewport rect for the given scroll offset
    pub fn rect_at(&self, scroll_y: f64) -> Rect {
        let natural = self.top - scroll_y;
        let mut top = natural.max(self.stick_at);
        if let Some(bottom) = self.container_bottom {
            top = top.min(bottom - self.height - scroll_y);
        }
        Rect::new(top, top + self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorLayout {
    pub id: String,
    /// Document Y of the target's top edge
    pub top: f64,
    #[serde(default)]
    pub height: f64,
}

fn default_viewport_height() -> f64 { 900.0 }
fn default_document_height() -> f64 { 5000.0 }
fn default_true() -> bool { true }

impl Scenario {
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let scenario: Self =
            toml::from_str(content).map_err(|e| crate::Error::Scenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        let scenario: Self = serde_json::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file; `.json` files are read as JSON, anything else as TOML
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    fn validate(&self) -> crate::Result<()> {
        if self.viewport_height <= 0.0 {
            return Err(crate::Error::Scenario(
                "viewport_height must be positive".to_string(),
            ));
        }
        if self.document_height < self.viewport_height {
            return Err(crate::Error::Scenario(format!(
                "document_height ({}) is smaller than viewport_height ({})",
                self.document_height, self.viewport_height
            )));
        }
        Ok(())
    }

    /// Value of a custom property as the host would report it
    pub fn custom_property(&self, name: &str) -> Option<String> {
        self.custom_properties.get(name).cloned()
    }
}

/// Presentation state written by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurfaceEffects {
    pub released: bool,
    pub nav_off: bool,
    pub scroll_padding_top: Option<u32>,
    pub active_bar: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SimulatedPage {
    scenario: Scenario,
    scroll_y: f64,
    clock_ms: f64,
    hero_loaded: bool,
    effects: SurfaceEffects,
    scroll_writes: Vec<f64>,
    pending_frames: Vec<AnimationToken>,
}

impl SimulatedPage {
    pub fn new(scenario: Scenario) -> Self {
        let hero_loaded = scenario.hero.as_ref().map_or(true, |h| h.loaded);
        Self {
            scenario,
            scroll_y: 0.0,
            clock_ms: 0.0,
            hero_loaded,
            effects: SurfaceEffects::default(),
            scroll_writes: Vec::new(),
            pending_frames: Vec::new(),
        }
    }

    pub fn max_scroll(&self) -> f64 {
        (self.scenario.document_height - self.scenario.viewport_height).max(0.0)
    }

    /// User scroll; clamped to the scrollable range like a browser would
    pub fn set_scroll(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn advance(&mut self, ms: f64) {
        self.clock_ms += ms;
    }

    /// Finish loading the hero image; returns false when there was nothing to load
    pub fn load_hero(&mut self) -> bool {
        if self.scenario.hero.is_none() || self.hero_loaded {
            return false;
        }
        self.hero_loaded = true;
        true
    }

    pub fn effects(&self) -> &SurfaceEffects {
        &self.effects
    }

    /// Every programmatic scroll write, oldest first
    pub fn scroll_writes(&self) -> &[f64] {
        &self.scroll_writes
    }

    pub fn pending_frames(&self) -> &[AnimationToken] {
        &self.pending_frames
    }

    pub fn take_pending_frames(&mut self) -> Vec<AnimationToken> {
        std::mem::take(&mut self.pending_frames)
    }
}

impl GeometryProvider for SimulatedPage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn now_ms(&self) -> f64 {
        self.clock_ms
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.scenario.reduced_motion
    }

    fn hero_rect(&self) -> Option<Rect> {
        self.scenario.hero.as_ref().map(|hero| {
            let height = if self.hero_loaded { hero.height } else { 0.0 };
            let top = hero.top - self.scroll_y;
            Rect::new(top, top + height)
        })
    }

    fn sticky_bar_rects(&self) -> Vec<Rect> {
        self.scenario
            .sticky_bars
            .iter()
            .map(|bar| bar.rect_at(self.scroll_y))
            .collect()
    }

    fn element_rect(&self, id: &str) -> Option<Rect> {
        self.scenario
            .anchors
            .iter()
            .find(|anchor| anchor.id == id)
            .map(|anchor| {
                let top = anchor.top - self.scroll_y;
                Rect::new(top, top + anchor.height)
            })
    }
}

impl PageSurface for SimulatedPage {
    fn set_released(&mut self, released: bool) {
        self.effects.released = released;
        self.effects.nav_off = released;
    }

    fn set_scroll_padding_top(&mut self, px: u32) {
        self.effects.scroll_padding_top = Some(px);
    }

    fn set_active_sticky_bar(&mut self, index: Option<usize>) {
        self.effects.active_bar = index;
    }

    fn scroll_to(&mut self, y: f64) {
        self.set_scroll(y);
        self.scroll_writes.push(self.scroll_y);
    }

    fn request_animation_frame(&mut self, token: AnimationToken) {
        self.pending_frames.push(token);
    }
}

/// Run queued animation frames until none are left.
///
/// Each round advances the virtual clock by `frame_ms`, fires every queued
/// frame and, like a browser, fires scroll handling after the writes.
pub fn drive_frames(
    controller: &mut PageController,
    page: &mut SimulatedPage,
    frame_ms: f64,
    max_rounds: usize,
) -> Vec<FrameOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..max_rounds {
        let frames = page.take_pending_frames();
        if frames.is_empty() {
            break;
        }
        page.advance(frame_ms);
        for token in frames {
            outcomes.push(controller.on_animation_frame(token, page));
        }
        controller.on_scroll(page);
    }
    outcomes
}
