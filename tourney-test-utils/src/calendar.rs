//! Recording stand-in for the external calendar.
//!
//! The mock has no knowledge of the server's calendar trait; integration tests wrap it in a
//! local type implementing the trait and forward each call.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCall {
    Create { summary: String },
    Update { event_id: String, summary: String },
    Delete { event_id: String },
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<CalendarCall>,
    failing: bool,
    next_id: u32,
}

/// Shared handle; clones record into the same call log.
#[derive(Debug, Clone, Default)]
pub struct MockCalendar {
    state: Arc<Mutex<State>>,
}

impl MockCalendar {
    pub const PROVIDER: &'static str = "mock";
    pub const FAILURE: &'static str = "mock calendar failure";

    pub fn new() -> Self {
        Self::default()
    }

    /// A calendar that records calls but rejects every one of them.
    pub fn failing() -> Self {
        let calendar = Self::default();
        calendar.set_failing(true);
        calendar
    }

    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Every call so far, including rejected ones.
    pub fn calls(&self) -> Vec<CalendarCall> {
        self.lock().calls.clone()
    }

    /// Records a create and returns `event-{n}` with `n` counting from 1.
    pub fn create(&self, summary: &str) -> Result<String, String> {
        let mut state = self.lock();
        state.calls.push(CalendarCall::Create {
            summary: summary.to_string(),
        });
        if state.failing {
            return Err(Self::FAILURE.to_string());
        }

        state.next_id += 1;
        Ok(format!("event-{}", state.next_id))
    }

    pub fn update(&self, event_id: &str, summary: &str) -> Result<(), String> {
        let mut state = self.lock();
        state.calls.push(CalendarCall::Update {
            event_id: event_id.to_string(),
            summary: summary.to_string(),
        });

        if state.failing {
            Err(Self::FAILURE.to_string())
        } else {
            Ok(())
        }
    }

    pub fn delete(&self, event_id: &str) -> Result<(), String> {
        let mut state = self.lock();
        state.calls.push(CalendarCall::Delete {
            event_id: event_id.to_string(),
        });

        if state.failing {
            Err(Self::FAILURE.to_string())
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("mock calendar state poisoned")
    }
}
