use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;

use landing_nav_core::sim::Scenario;
use landing_nav_core::{GeometryProvider, NavPhase, PageConfig, ReleaseState};

#[derive(Serialize)]
struct Step {
    scroll_y: f64,
    #[serde(flatten)]
    state: ReleaseState,
    offset: u32,
}

pub fn run(
    config: PageConfig,
    scenario_path: &Path,
    to: Option<f64>,
    step: f64,
    json: bool,
) -> Result<()> {
    if step.is_nan() || step <= 0.0 {
        bail!("--step must be a positive number of pixels");
    }

    let scenario = Scenario::load(scenario_path)?;
    let (mut controller, mut page) = super::open_page(config, scenario);

    let heights = controller.context().heights;
    if !json {
        println!(
            "Heights: nav {}px, sub-nav {}px",
            heights.nav_height, heights.subnav_height
        );
    }

    let mut last = controller.init(&mut page);
    if page.load_hero() {
        last = controller.on_hero_loaded(&mut page);
        if !json {
            println!("Hero image loaded");
        }
    }
    if !json {
        println!("Hero release threshold: {}", controller.hero_threshold());
        print_state(0.0, last, controller.current_offset(&page));
    }

    let end = to.unwrap_or_else(|| page.max_scroll()).clamp(0.0, page.max_scroll());
    let mut y = 0.0;
    while y < end {
        y = (y + step).min(end);
        page.set_scroll(y);
        let state = controller.on_scroll(&mut page);
        let offset = controller.current_offset(&page);

        if json {
            let line = Step {
                scroll_y: page.scroll_y(),
                state,
                offset,
            };
            println!("{}", serde_json::to_string(&line)?);
        } else if state != last {
            print_state(page.scroll_y(), state, offset);
        }
        last = state;
    }

    Ok(())
}

fn print_state(scroll_y: f64, state: ReleaseState, offset: u32) {
    let phase = match state.phase {
        NavPhase::Docked => "docked",
        NavPhase::Released => "released",
    };
    let bar = state
        .active_bar
        .map(|i| format!(", active bar #{}", i))
        .unwrap_or_default();
    println!("  y={:>7.1}  {}{} (anchor offset {}px)", scroll_y, phase, bar, offset);
}
