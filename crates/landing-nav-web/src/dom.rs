//! Live document host
//!
//! Implements the controller's geometry and surface traits on top of the
//! browser DOM. Elements are looked up once at construction; a missing
//! element simply disables the behavior that depends on it.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use landing_nav_core::config::SelectorConfig;
use landing_nav_core::{AnimationToken, Error, GeometryProvider, PageSurface, Rect, Result};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub(crate) fn host_error(context: &str, value: JsValue) -> Error {
    Error::Host(format!("{}: {:?}", context, value))
}

pub struct DomPage {
    window: Window,
    document: Document,
    root: HtmlElement,
    flag_target: Element,
    nav: Option<Element>,
    hero: Option<Element>,
    sticky_bars: Vec<Element>,
    selectors: SelectorConfig,
    pending_frames: Vec<AnimationToken>,
}

impl DomPage {
    pub fn new(selectors: SelectorConfig) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Host("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Host("no document".to_string()))?;
        let root = document
            .document_element()
            .ok_or_else(|| Error::Host("no document element".to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|el| Error::Host(format!("document element is not HTML: {:?}", el)))?;

        // The released flag lives on <body>, falling back to <html>
        let flag_target: Element = match document.body() {
            Some(body) => body.into(),
            None => root.clone().into(),
        };

        let nav = document.get_element_by_id(&selectors.nav_id);
        let hero = document.get_element_by_id(&selectors.hero_id);
        let sticky_bars = query_all(&document, &format!("[{}]", selectors.sticky_bar_attr))?;
        tracing::debug!(
            nav = nav.is_some(),
            hero = hero.is_some(),
            sticky_bars = sticky_bars.len(),
            "Page elements resolved"
        );

        Ok(Self {
            window,
            document,
            root,
            flag_target,
            nav,
            hero,
            sticky_bars,
            selectors,
            pending_frames: Vec::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn hero_element(&self) -> Option<&Element> {
        self.hero.as_ref()
    }

    /// Computed value of a custom property on the document root
    pub fn custom_property(&self, name: &str) -> Option<String> {
        let style = self.window.get_computed_style(&self.root).ok().flatten()?;
        style.get_property_value(name).ok()
    }

    /// Keep CSS smooth scrolling from fighting the animator
    pub fn disable_css_smooth_scroll(&self) -> Result<()> {
        self.root
            .style()
            .set_property("scroll-behavior", "auto")
            .map_err(|e| host_error("setting scroll-behavior", e))
    }

    /// Write the current year into the footer element, if present
    pub fn stamp_year(&self) {
        if let Some(el) = self.document.get_element_by_id(&self.selectors.year_id) {
            let year = js_sys::Date::new_0().get_full_year();
            el.set_text_content(Some(&year.to_string()));
        }
    }

    /// Every element carrying the anchor marker attribute
    pub fn anchor_elements(&self) -> Result<Vec<Element>> {
        query_all(&self.document, &format!("[{}]", self.selectors.anchor_attr))
    }

    pub fn take_pending_frames(&mut self) -> Vec<AnimationToken> {
        std::mem::take(&mut self.pending_frames)
    }
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|e| host_error(selector, e))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn viewport_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.top(), rect.bottom())
}

impl GeometryProvider for DomPage {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn now_ms(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }

    fn hero_rect(&self) -> Option<Rect> {
        self.hero.as_ref().map(viewport_rect)
    }

    fn sticky_bar_rects(&self) -> Vec<Rect> {
        self.sticky_bars.iter().map(viewport_rect).collect()
    }

    fn element_rect(&self, id: &str) -> Option<Rect> {
        self.document.get_element_by_id(id).as_ref().map(viewport_rect)
    }
}

/// Toggle a class, logging rather than failing when the browser rejects it
fn toggle_class(element: &Element, class: &str, force: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, force) {
        tracing::warn!(class, error = ?e, "Failed to toggle class");
    }
}

impl PageSurface for DomPage {
    fn set_released(&mut self, released: bool) {
        toggle_class(&self.flag_target, &self.selectors.released_class, released);
        if let Some(nav) = &self.nav {
            toggle_class(nav, &self.selectors.nav_off_class, released);
        }
    }

    fn set_scroll_padding_top(&mut self, px: u32) {
        if let Err(e) = self
            .root
            .style()
            .set_property("scroll-padding-top", &format!("{}px", px))
        {
            tracing::warn!(px, error = ?e, "Failed to set scroll-padding-top");
        }
    }

    fn set_active_sticky_bar(&mut self, index: Option<usize>) {
        for (i, bar) in self.sticky_bars.iter().enumerate() {
            toggle_class(bar, &self.selectors.active_bar_class, Some(i) == index);
        }
    }

    fn scroll_to(&mut self, y: f64) {
        self.window.scroll_to_with_x_and_y(0.0, y);
    }

    fn request_animation_frame(&mut self, token: AnimationToken) {
        // Registered with the browser by the event glue once the handler returns
        self.pending_frames.push(token);
    }
}
