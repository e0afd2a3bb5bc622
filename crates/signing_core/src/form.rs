//! Completion gate for the contract stage.

/// The review control unlocks only when a non-blank name has been typed
/// and a signature stroke has been committed. Recomputed fresh on every
/// input change; no hysteresis.
pub fn review_enabled(client_name: &str, has_signature: bool) -> bool {
    !client_name.trim().is_empty() && has_signature
}
