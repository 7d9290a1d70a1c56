pub mod anchor;
pub mod config;
pub mod simulate;

use landing_nav_core::sim::{Scenario, SimulatedPage};
use landing_nav_core::{PageConfig, PageContext, PageController};

/// Build a controller and page for a scenario, reading heights the way a browser host would
fn open_page(config: PageConfig, scenario: Scenario) -> (PageController, SimulatedPage) {
    tracing::info!(
        sticky_bars = scenario.sticky_bars.len(),
        anchors = scenario.anchors.len(),
        hero = scenario.hero.is_some(),
        "Scenario loaded"
    );
    let context = PageContext::from_vars(config, |name| scenario.custom_property(name));
    (PageController::new(context), SimulatedPage::new(scenario))
}
