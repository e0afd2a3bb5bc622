use crate::form::review_enabled;

#[test]
fn enabled_only_with_name_and_signature() {
    assert!(review_enabled("Jane Doe", true));
    assert!(!review_enabled("Jane Doe", false));
    assert!(!review_enabled("", true));
    assert!(!review_enabled("", false));
}

#[test]
fn whitespace_only_name_does_not_enable() {
    assert!(!review_enabled("   \t", true));
}

#[test]
fn gate_recomputes_without_hysteresis() {
    assert!(review_enabled("Jane", true));
    // Removing either input immediately disables again.
    assert!(!review_enabled("", true));
    assert!(!review_enabled("Jane", false));
}
