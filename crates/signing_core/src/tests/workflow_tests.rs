use shared::domain::WorkflowStage;

use crate::workflow::WorkflowNavigator;

#[test]
fn starts_on_profile_stage() {
    let nav = WorkflowNavigator::new();
    assert_eq!(nav.active(), WorkflowStage::Profile);
}

#[test]
fn exactly_one_stage_is_active_after_any_transition() {
    let mut nav = WorkflowNavigator::new();
    for stage in WorkflowStage::ALL {
        nav.show(stage);
        let active: Vec<_> = WorkflowStage::ALL
            .into_iter()
            .filter(|s| nav.is_active(*s))
            .collect();
        assert_eq!(active, vec![stage]);
    }
}

#[test]
fn any_stage_is_reachable_directly() {
    // Transitions are permissive; no forward-only validation.
    let mut nav = WorkflowNavigator::new();
    nav.show(WorkflowStage::ThankYou);
    assert_eq!(nav.active(), WorkflowStage::ThankYou);
    nav.show(WorkflowStage::Profile);
    assert_eq!(nav.active(), WorkflowStage::Profile);
}

#[test]
fn entering_contract_stage_requests_one_surface_refresh() {
    let mut nav = WorkflowNavigator::new();
    nav.show(WorkflowStage::Contract);
    assert!(nav.take_surface_refresh());
    // Consumed; does not fire again until the stage is re-entered.
    assert!(!nav.take_surface_refresh());

    nav.show(WorkflowStage::Review);
    assert!(!nav.take_surface_refresh());

    nav.show(WorkflowStage::Contract);
    assert!(nav.take_surface_refresh());
}

#[test]
fn every_stage_change_requests_a_scroll_reset() {
    let mut nav = WorkflowNavigator::new();
    assert!(!nav.take_scroll_reset());
    nav.show(WorkflowStage::Review);
    assert!(nav.take_scroll_reset());
    assert!(!nav.take_scroll_reset());
}
