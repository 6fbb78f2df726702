//! Yes/no gate between the Submit button and the actual form submission.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Idle,
    AwaitingConfirmation,
    Submitting,
}

/// Submit is a two-step action: [`request`](Self::request) opens the modal,
/// [`confirm`](Self::confirm) submits. Nothing else ever submits.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationGate {
    state: GateState,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Whether the confirmation modal is open.
    pub fn is_open(&self) -> bool {
        self.state == GateState::AwaitingConfirmation
    }

    /// Submit was clicked: ask for confirmation.
    pub fn request(&mut self) {
        if self.state == GateState::Idle {
            self.state = GateState::AwaitingConfirmation;
        }
    }

    /// Confirm the pending submission and run `submit`.
    ///
    /// Returns `false` without calling `submit` when no confirmation was
    /// pending.
    pub fn confirm<F: FnOnce()>(&mut self, submit: F) -> bool {
        if self.state != GateState::AwaitingConfirmation {
            return false;
        }
        self.state = GateState::Submitting;
        submit();
        true
    }

    /// Dismiss the modal without submitting.
    pub fn cancel(&mut self) {
        if self.state == GateState::AwaitingConfirmation {
            self.state = GateState::Idle;
        }
    }

    /// Return to idle after the submission round-trip finished (e.g. the
    /// server answered with validation errors).
    pub fn finish(&mut self) {
        if self.state == GateState::Submitting {
            self.state = GateState::Idle;
        }
    }
}
