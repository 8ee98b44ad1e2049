use energy_core::model::ModuleId;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_fresh_progress() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Total Score: 0/400"), "missing score in {html}");
    assert!(html.contains("Systems Completed: 0/4"), "missing systems in {html}");
    assert!(html.contains("Solar PV System"), "missing module card in {html}");
    assert!(html.contains("LCOE"), "missing summary table in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_rank_after_completion() {
    let mut harness = setup_view_harness(ViewKind::Home);
    let assembly = harness.services.assembly();
    let order = assembly
        .registry()
        .module(ModuleId::Wind)
        .reference_order()
        .to_vec();
    assembly
        .submit(&harness.session, "wind", &order)
        .await
        .expect("submit");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Total Score: 100/400"), "missing score in {html}");
    assert!(html.contains("Clean Energy Explorer"), "missing badge in {html}");
    assert!(html.contains("✅ Completed"), "missing status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_renders_palette_and_placeholders() {
    let mut harness = setup_view_harness(ViewKind::Module("hydro".into()));
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Hydroelectric System"), "missing heading in {html}");
    assert!(html.contains("Score: 0/100"), "missing score in {html}");
    assert!(html.contains("Penstock"), "missing component in {html}");
    assert!(
        html.contains("Place your diagram here"),
        "missing diagram placeholder in {html}"
    );
    assert!(!html.contains("Advanced Engineering Analysis"), "analysis leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_unlocks_analysis_when_completed() {
    let mut harness = setup_view_harness(ViewKind::Module("biomass".into()));
    let assembly = harness.services.assembly();
    let order = assembly
        .registry()
        .module(ModuleId::Biomass)
        .reference_order()
        .to_vec();
    assembly
        .submit(&harness.session, "biomass", &order)
        .await
        .expect("submit");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Score: 100/100"), "missing score in {html}");
    assert!(html.contains("Advanced Engineering Analysis"), "missing analysis in {html}");
    assert!(html.contains("Biomass Process Analysis"), "missing section in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_rejects_unknown_module() {
    let mut harness = setup_view_harness(ViewKind::Module("geothermal".into()));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("This energy system does not exist."),
        "missing not-found notice in {html}"
    );
}
