use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tokio::time::{interval, MissedTickBehavior};

use landing_nav_core::scroll::ScrollSettingsExt;
use landing_nav_core::sim::Scenario;
use landing_nav_core::{AnchorOutcome, AnimateOutcome, FrameOutcome, GeometryProvider, PageConfig};

pub async fn run(config: PageConfig, scenario_path: &Path, href: &str, from: f64) -> Result<()> {
    let frame_interval = config.scroll.frame_interval();
    let scenario = Scenario::load(scenario_path)?;
    let (mut controller, mut page) = super::open_page(config, scenario);

    page.set_scroll(from);
    controller.init(&mut page);
    if page.load_hero() {
        controller.on_hero_loaded(&mut page);
    }
    let state = controller.on_scroll(&mut page);
    println!(
        "Start: y={:.1}, {:?}, anchor offset {}px",
        page.scroll_y(),
        state.phase,
        controller.current_offset(&page)
    );

    match controller.on_anchor_activated(href, &mut page) {
        AnchorOutcome::Ignored => {
            println!("{} is not an in-page anchor, default navigation applies", href);
            return Ok(());
        }
        AnchorOutcome::TargetMissing { id } => {
            println!("No element with id '{}', default navigation applies", id);
            return Ok(());
        }
        AnchorOutcome::Scrolling {
            id,
            target_y,
            animation,
        } => {
            println!("Scrolling to #{} at y={:.1}", id, target_y);
            if let AnimateOutcome::Jumped { y } = animation {
                println!("Reduced motion: jumped to y={:.1}", y);
                return Ok(());
            }
        }
    }

    // Pace frames in real time and feed the measured elapsed time to the page clock
    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();
    let mut frame_count = 0usize;

    loop {
        ticker.tick().await;
        let frames = page.take_pending_frames();
        if frames.is_empty() {
            break;
        }

        let now = Instant::now();
        page.advance(now.duration_since(last_tick).as_secs_f64() * 1000.0);
        last_tick = now;

        for token in frames {
            match controller.on_animation_frame(token, &mut page) {
                FrameOutcome::Continue { y } => {
                    frame_count += 1;
                    println!("  frame {:>3}: y={:.1}", frame_count, y);
                }
                FrameOutcome::Finished { y } => {
                    frame_count += 1;
                    println!("Finished at y={:.1} after {} frames", y, frame_count);
                }
                FrameOutcome::Superseded => {}
            }
        }
        controller.on_scroll(&mut page);
    }

    let state = controller.state();
    println!(
        "End: {:?}{}",
        state.phase,
        state
            .active_bar
            .map(|i| format!(", active bar #{}", i))
            .unwrap_or_default()
    );
    Ok(())
}
