//! Infrastructure implementation of the `EventLog` port.

use std::cell::RefCell;

use crate::application::ports::EventLog;

/// Event log kept for the lifetime of one invocation and rendered when the
/// trigger completes.
#[derive(Debug, Default)]
pub struct ActionEvent {
    messages: RefCell<Vec<String>>,
    failure: RefCell<Option<String>>,
}

impl ActionEvent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// The failure message, if the event failed.
    #[must_use]
    pub fn failure(&self) -> Option<String> {
        self.failure.borrow().clone()
    }

    #[must_use]
    pub fn failed(&self) -> bool {
        self.failure.borrow().is_some()
    }
}

impl EventLog for ActionEvent {
    fn log(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn fail(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }
}
