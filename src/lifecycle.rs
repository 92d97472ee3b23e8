// =============================================================================
// LIFECYCLE - Startup/shutdown state machine
// =============================================================================
//
// Uninitialized → WindowReady → InstanceReady → (MessengerReady) →
// DeviceSelected → DeviceReady → Running → ShuttingDown → Terminated
//
// A failed startup step leaves the stage where it was; ShuttingDown is
// reachable from any stage so a partial startup can still be torn down.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    WindowReady,
    InstanceReady,
    MessengerReady,
    DeviceSelected,
    DeviceReady,
    Running,
    ShuttingDown,
    Terminated,
}

impl Stage {
    pub fn can_advance_to(self, next: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, next),
            (Uninitialized, WindowReady)
                | (WindowReady, InstanceReady)
                | (InstanceReady, MessengerReady)
                | (InstanceReady, DeviceSelected)
                | (MessengerReady, DeviceSelected)
                | (DeviceSelected, DeviceReady)
                | (DeviceReady, Running)
                | (ShuttingDown, Terminated)
        ) || (next == ShuttingDown && !matches!(self, ShuttingDown | Terminated))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug)]
pub struct Lifecycle {
    stage: Stage,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            stage: Stage::Uninitialized,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "illegal lifecycle transition {} -> {}",
            self.stage,
            next
        );
        log::debug!("Lifecycle: {} -> {}", self.stage, next);
        self.stage = next;
    }
}
