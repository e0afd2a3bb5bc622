//! Stage navigation for the linear signing flow.

use shared::domain::WorkflowStage;
use tracing::debug;

/// Keeps exactly one stage active. Transitions are permissive: any stage
/// may be shown directly, matching the flow's forward-biased but
/// unvalidated navigation.
pub struct WorkflowNavigator {
    active: WorkflowStage,
    surface_refresh_pending: bool,
    scroll_reset_pending: bool,
}

impl WorkflowNavigator {
    pub fn new() -> Self {
        Self {
            active: WorkflowStage::Profile,
            surface_refresh_pending: false,
            scroll_reset_pending: false,
        }
    }

    pub fn active(&self) -> WorkflowStage {
        self.active
    }

    pub fn is_active(&self, stage: WorkflowStage) -> bool {
        self.active == stage
    }

    pub fn show(&mut self, stage: WorkflowStage) {
        debug!(from = ?self.active, to = ?stage, "workflow stage change");
        self.active = stage;
        self.scroll_reset_pending = true;
        if stage == WorkflowStage::Contract {
            // The drawing surface may have been zero-sized while its stage
            // was hidden, so its buffer must be re-established once layout
            // has settled.
            self.surface_refresh_pending = true;
        }
    }

    /// Consume the pending surface-refresh request raised by activating
    /// the contract stage.
    pub fn take_surface_refresh(&mut self) -> bool {
        std::mem::take(&mut self.surface_refresh_pending)
    }

    /// Consume the pending scroll-to-top request raised by a stage change.
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset_pending)
    }
}

impl Default for WorkflowNavigator {
    fn default() -> Self {
        Self::new()
    }
}
