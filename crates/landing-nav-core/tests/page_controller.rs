use landing_nav_core::sim::{
    drive_frames, AnchorLayout, HeroLayout, Scenario, SimulatedPage, StickyBarLayout,
};
use landing_nav_core::{
    AnchorOutcome, AnimateOutcome, FrameOutcome, GeometryProvider, NavPhase, PageConfig,
    PageContext, PageController, Rect, ReleaseState,
};

const FRAME_MS: f64 = 16.0;

fn landing_scenario() -> Scenario {
    let mut scenario = Scenario {
        viewport_height: 900.0,
        document_height: 5000.0,
        hero: Some(HeroLayout {
            top: 0.0,
            height: 800.0,
            loaded: true,
        }),
        anchors: vec![
            AnchorLayout {
                id: "features".to_string(),
                top: 1000.0,
                height: 400.0,
            },
            AnchorLayout {
                id: "pricing".to_string(),
                top: 2400.0,
                height: 400.0,
            },
        ],
        ..Default::default()
    };
    scenario
        .custom_properties
        .insert("--nav-h".to_string(), "60px".to_string());
    scenario
        .custom_properties
        .insert("--subnav-h".to_string(), "60px".to_string());
    scenario
}

fn setup(scenario: Scenario) -> (PageController, SimulatedPage) {
    let context = PageContext::from_vars(PageConfig::default(), |name| {
        scenario.custom_property(name)
    });
    let controller = PageController::new(context);
    (controller, SimulatedPage::new(scenario))
}

fn started(outcome: &AnchorOutcome) -> f64 {
    match outcome {
        AnchorOutcome::Scrolling {
            target_y,
            animation: AnimateOutcome::Started { .. },
            ..
        } => *target_y,
        other => panic!("expected an animated anchor scroll, got {:?}", other),
    }
}

#[test]
fn test_docked_then_released_past_hero() {
    let (mut controller, mut page) = setup(landing_scenario());

    assert_eq!(controller.init(&mut page), ReleaseState::docked());
    assert_eq!(controller.current_offset(&page), 60);
    assert!(!page.effects().released);
    assert_eq!(page.effects().scroll_padding_top, Some(60));

    page.set_scroll(850.0);
    let state = controller.on_scroll(&mut page);
    assert_eq!(state, ReleaseState::released(None));
    assert_eq!(controller.current_offset(&page), 0);
    assert!(page.effects().released);
    assert!(page.effects().nav_off);
    assert_eq!(page.effects().active_bar, None);
}

/// At scroll 850 this bar sits at top=-5, bottom=55
fn straddling_bar() -> StickyBarLayout {
    StickyBarLayout {
        top: 500.0,
        height: 60.0,
        stick_at: 0.0,
        container_bottom: Some(905.0),
    }
}

#[test]
fn test_straddling_sticky_bar_uses_subnav_offset() {
    let mut scenario = landing_scenario();
    scenario.sticky_bars.push(straddling_bar());
    let (mut controller, mut page) = setup(scenario);
    controller.init(&mut page);

    page.set_scroll(850.0);
    assert_eq!(controller.on_scroll(&mut page), ReleaseState::released(Some(0)));
    assert_eq!(page.sticky_bar_rects(), vec![Rect::new(-5.0, 55.0)]);
    assert_eq!(controller.current_offset(&page), 60);
}

#[test]
fn test_straddling_sticky_bar_becomes_active() {
    let mut scenario = landing_scenario();
    scenario
        .custom_properties
        .insert("--subnav-h".to_string(), "48px".to_string());
    scenario.sticky_bars.push(straddling_bar());
    let (mut controller, mut page) = setup(scenario);
    controller.init(&mut page);

    page.set_scroll(850.0);
    let state = controller.on_scroll(&mut page);
    assert_eq!(state, ReleaseState::released(Some(0)));
    assert_eq!(page.effects().active_bar, Some(0));
    assert_eq!(page.effects().scroll_padding_top, Some(48));
    assert_eq!(controller.current_offset(&page), 48);
}

#[test]
fn test_sticky_bar_reaching_nav_releases_before_hero_end() {
    let mut scenario = landing_scenario();
    scenario.sticky_bars.push(StickyBarLayout {
        top: 500.0,
        height: 60.0,
        stick_at: 0.0,
        container_bottom: None,
    });
    let (mut controller, mut page) = setup(scenario);
    controller.init(&mut page);

    page.set_scroll(439.0);
    assert_eq!(controller.on_scroll(&mut page).phase, NavPhase::Docked);

    page.set_scroll(440.0);
    assert_eq!(controller.on_scroll(&mut page).phase, NavPhase::Released);
}

#[test]
fn test_recompute_is_idempotent() {
    let (mut controller, mut page) = setup(landing_scenario());
    controller.init(&mut page);
    page.set_scroll(1200.0);

    let first_state = controller.on_scroll(&mut page);
    let first_effects = page.effects().clone();
    let second_state = controller.on_scroll(&mut page);

    assert_eq!(first_state, second_state);
    assert_eq!(&first_effects, page.effects());
}

#[test]
fn test_release_follows_scroll_both_ways() {
    let (mut controller, mut page) = setup(landing_scenario());
    controller.init(&mut page);

    for (y, phase) in [
        (0.0, NavPhase::Docked),
        (798.0, NavPhase::Docked),
        (799.0, NavPhase::Released),
        (2000.0, NavPhase::Released),
        (300.0, NavPhase::Docked),
    ] {
        page.set_scroll(y);
        assert_eq!(controller.on_scroll(&mut page).phase, phase, "scroll_y = {}", y);
    }
    assert_eq!(page.effects().scroll_padding_top, Some(60));
    assert!(!page.effects().nav_off);
}

#[test]
fn test_anchor_click_from_docked_state() {
    let (mut controller, mut page) = setup(landing_scenario());
    controller.init(&mut page);

    let outcome = controller.on_anchor_activated("#features", &mut page);
    assert!(outcome.prevents_default());
    assert_eq!(started(&outcome), 941.0);
    assert_eq!(page.pending_frames().len(), 1);

    let frames = drive_frames(&mut controller, &mut page, FRAME_MS, 200);
    assert!(matches!(frames.last(), Some(FrameOutcome::Finished { y }) if *y == 941.0));
    assert_eq!(page.scroll_writes().last(), Some(&941.0));
    assert!(page.scroll_writes().windows(2).all(|w| w[0] <= w[1]));
    assert!(!controller.is_animating());

    // 941 is past the hero threshold, so the nav released on the way down
    assert_eq!(controller.state().phase, NavPhase::Released);
}

#[test]
fn test_anchor_click_while_released_uses_zero_offset() {
    let (mut controller, mut page) = setup(landing_scenario());
    controller.init(&mut page);
    page.set_scroll(1500.0);
    controller.on_scroll(&mut page);

    let outcome = controller.on_anchor_activated("#pricing", &mut page);
    assert_eq!(started(&outcome), 2401.0);
}

#[test]
fn test_missing_or_foreign_anchor_is_a_no_op() {
    let (mut controller, mut page) = setup(landing_scenario());
    controller.init(&mut page);

    let missing = controller.on_anchor_activated("#nowhere", &mut page);
    assert_eq!(
        missing,
        AnchorOutcome::TargetMissing {
            id: "nowhere".to_string()
        }
    );
    assert!(!missing.prevents_default());

    let foreign = controller.on_anchor_activated("/blog", &mut page);
    assert_eq!(foreign, AnchorOutcome::Ignored);

    assert!(page.scroll_writes().is_empty());
    assert!(page.pending_frames().is_empty());
}

#[test]
fn test_reduced_motion_jumps_without_frames() {
    let mut scenario = landing_scenario();
    scenario.reduced_motion = true;
    let (mut controller, mut page) = setup(scenario);
    controller.init(&mut page);

    let outcome = controller.scroll_to(500.0, &mut page);
    assert_eq!(outcome, AnimateOutcome::Jumped { y: 500.0 });
    assert_eq!(page.scroll_writes(), &[500.0]);
    assert!(page.pending_frames().is_empty());
}

#[test]
fn test_second_click_supersedes_first() {
    let (mut controller, mut page) = setup(landing_scenario());
    controller.init(&mut page);

    controller.on_anchor_activated("#pricing", &mut page);
    drive_frames(&mut controller, &mut page, FRAME_MS, 5);
    assert!(controller.is_animating());

    let second = controller.on_anchor_activated("#features", &mut page);
    let target = started(&second);

    let frames = drive_frames(&mut controller, &mut page, FRAME_MS, 200);
    assert_eq!(frames.first(), Some(&FrameOutcome::Superseded));
    assert_eq!(
        frames
            .iter()
            .filter(|f| matches!(f, FrameOutcome::Superseded))
            .count(),
        1
    );
    assert_eq!(page.scroll_writes().last(), Some(&target));
}

#[test]
fn test_page_without_hero_or_bars_never_releases() {
    let mut scenario = landing_scenario();
    scenario.hero = None;
    let (mut controller, mut page) = setup(scenario);
    controller.init(&mut page);
    assert!(controller.hero_threshold().is_infinite());

    page.set_scroll(4100.0);
    assert_eq!(controller.on_scroll(&mut page), ReleaseState::docked());
    assert_eq!(controller.current_offset(&page), 60);
}

#[test]
fn test_hero_load_recomputes_threshold() {
    let mut scenario = landing_scenario();
    if let Some(hero) = scenario.hero.as_mut() {
        hero.loaded = false;
    }
    let (mut controller, mut page) = setup(scenario);

    // A zero-height hero is already scrolled past
    assert_eq!(controller.init(&mut page).phase, NavPhase::Released);

    assert!(page.load_hero());
    assert_eq!(controller.on_hero_loaded(&mut page), ReleaseState::docked());
    assert_eq!(controller.hero_threshold(), 799.0);
}

#[test]
fn test_unparsable_heights_fall_back() {
    let mut scenario = landing_scenario();
    scenario.custom_properties.insert("--nav-h".to_string(), "auto".to_string());
    scenario.custom_properties.remove("--subnav-h");
    let (controller, _page) = setup(scenario);
    assert_eq!(controller.context().heights.nav_height, 60);
    assert_eq!(controller.context().heights.subnav_height, 60);
}
