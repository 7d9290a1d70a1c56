//! Browser entry point for the landing page navigation controller
//!
//! `start()` wires the page's load, resize, scroll and anchor click events to
//! a [`PageController`] running over the live DOM.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, HtmlImageElement};

use landing_nav_core::{AnimationToken, PageConfig, PageContext, PageController, Result};

mod dom;

pub use dom::DomPage;
use dom::host_error;

struct App {
    controller: PageController,
    page: DomPage,
}

type SharedApp = Rc<RefCell<App>>;

static INSTALL_HOOKS: Once = Once::new();

/// Route panics and tracing events to the browser console
fn install_hooks() {
    INSTALL_HOOKS.call_once(|| {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    });
}

/// Start with the default configuration
#[wasm_bindgen]
pub fn start() -> std::result::Result<(), JsValue> {
    boot(PageConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Start with a TOML configuration document
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(toml: &str) -> std::result::Result<(), JsValue> {
    PageConfig::from_toml_str(toml)
        .and_then(boot)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn boot(config: PageConfig) -> Result<()> {
    install_hooks();
    let page = DomPage::new(config.selectors.clone())?;
    page.stamp_year();

    let context = PageContext::from_vars(config, |name| page.custom_property(name));
    let app: SharedApp = Rc::new(RefCell::new(App {
        controller: PageController::new(context),
        page,
    }));

    let window = app.borrow().page.window().clone();

    // Run once now in case the load event already fired; init is idempotent
    init(&app)?;
    listen(&window, "load", &app, None, |app, _| {
        if let Err(err) = init(app) {
            tracing::warn!(error = %err, "Page init failed");
        }
    })?;
    listen(&window, "resize", &app, None, |app, _| {
        with_app(app, |a| {
            a.controller.on_resize(&mut a.page);
        });
    })?;

    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);
    listen(&window, "scroll", &app, Some(&passive), |app, _| {
        with_app(app, |a| {
            a.controller.on_scroll(&mut a.page);
        });
    })?;

    watch_hero_load(&app)?;
    wire_anchors(&app)?;
    Ok(())
}

fn init(app: &SharedApp) -> Result<()> {
    let page_ready = with_app(app, |a| a.page.disable_css_smooth_scroll());
    if let Some(result) = page_ready {
        result?;
    }
    with_app(app, |a| {
        a.controller.init(&mut a.page);
    });
    Ok(())
}

/// Recompute once the hero image finishes loading, if it has not yet
fn watch_hero_load(app: &SharedApp) -> Result<()> {
    let hero = app.borrow().page.hero_element().cloned();
    let Some(hero) = hero else {
        return Ok(());
    };
    let pending = hero
        .dyn_ref::<HtmlImageElement>()
        .map(|img| !img.complete())
        .unwrap_or(false);
    if !pending {
        return Ok(());
    }

    let once = AddEventListenerOptions::new();
    once.set_once(true);
    listen(&hero, "load", app, Some(&once), |app, _| {
        with_app(app, |a| {
            a.controller.on_hero_loaded(&mut a.page);
        });
    })
}

fn wire_anchors(app: &SharedApp) -> Result<()> {
    let anchors = app.borrow().page.anchor_elements()?;
    tracing::debug!(count = anchors.len(), "Wiring anchor links");
    for anchor in anchors {
        let link: Element = anchor.clone();
        listen(&anchor, "click", app, None, move |app, event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let outcome = with_app(app, |a| a.controller.on_anchor_activated(&href, &mut a.page));
            if outcome.is_some_and(|o| o.prevents_default()) {
                event.prevent_default();
            }
        })?;
    }
    Ok(())
}

/// Borrow the app for one handler, then hand any queued frames to the browser.
///
/// Returns `None` when the app is already borrowed by an outer handler.
fn with_app<R>(app: &SharedApp, f: impl FnOnce(&mut App) -> R) -> Option<R> {
    let result = {
        let Ok(mut guard) = app.try_borrow_mut() else {
            tracing::trace!("Skipping re-entrant page event");
            return None;
        };
        f(&mut guard)
    };
    schedule_frames(app);
    Some(result)
}

fn schedule_frames(app: &SharedApp) {
    let (window, tokens) = {
        let Ok(mut guard) = app.try_borrow_mut() else {
            return;
        };
        (guard.page.window().clone(), guard.page.take_pending_frames())
    };
    for token in tokens {
        let app = Rc::clone(app);
        let callback = Closure::once_into_js(move |_timestamp: f64| run_frame(&app, token));
        if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
            tracing::warn!(error = ?err, "requestAnimationFrame failed");
        }
    }
}

fn run_frame(app: &SharedApp, token: AnimationToken) {
    with_app(app, |a| {
        a.controller.on_animation_frame(token, &mut a.page);
    });
}

fn listen<F>(
    target: &EventTarget,
    event: &str,
    app: &SharedApp,
    options: Option<&AddEventListenerOptions>,
    handler: F,
) -> Result<()>
where
    F: Fn(&SharedApp, &Event) + 'static,
{
    let app = Rc::clone(app);
    let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| handler(&app, &e));
    let registered = match options {
        Some(options) => target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            options,
        ),
        None => target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()),
    };
    registered.map_err(|e| host_error(event, e))?;
    // Listeners live for the page session
    closure.forget();
    Ok(())
}
