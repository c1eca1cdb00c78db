//! In-memory runtime double for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use crate::runtime::{DocumentRuntime, Reply, RuntimeError, RuntimeOutcome, RuntimeValue};

/// Answers scripts from a table and records everything submitted.
///
/// Each script has a queue of outcomes. Outcomes are consumed in order and
/// the last one sticks, so a single `reply` answers every evaluation.
/// Scripts without an entry answer `Null`.
#[derive(Default)]
pub struct ScriptedRuntime {
    submitted: RefCell<Vec<String>>,
    replies: RefCell<HashMap<String, VecDeque<RuntimeOutcome>>>,
    drop_replies: Cell<bool>,
}

impl ScriptedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, script: &str, value: impl Into<RuntimeValue>) -> &Self {
        self.push(script, Ok(value.into()))
    }

    /// Make `script` fail inside the runtime.
    pub fn fail(&self, script: &str, err: RuntimeError) -> &Self {
        self.push(script, Err(err))
    }

    fn push(&self, script: &str, outcome: RuntimeOutcome) -> &Self {
        self.replies
            .borrow_mut()
            .entry(script.to_owned())
            .or_default()
            .push_back(outcome);
        self
    }

    /// Drop reply slots instead of answering.
    pub fn drop_replies(&self) {
        self.drop_replies.set(true);
    }

    pub fn scripts(&self) -> Vec<String> {
        self.submitted.borrow().clone()
    }

    pub fn count(&self, script: &str) -> usize {
        self.submitted.borrow().iter().filter(|s| *s == script).count()
    }

    pub fn clear(&self) {
        self.submitted.borrow_mut().clear();
    }

    fn outcome_for(&self, script: &str) -> RuntimeOutcome {
        let mut replies = self.replies.borrow_mut();
        match replies.get_mut(script) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(Ok(RuntimeValue::Null)),
            Some(queue) => queue.front().cloned().unwrap_or(Ok(RuntimeValue::Null)),
            None => Ok(RuntimeValue::Null),
        }
    }
}

impl DocumentRuntime for ScriptedRuntime {
    fn submit(&self, script: String, reply: Option<Reply>) {
        let outcome = self.outcome_for(&script);
        self.submitted.borrow_mut().push(script);
        if let Some(reply) = reply {
            if self.drop_replies.get() {
                drop(reply);
            } else {
                let _ = reply.send(outcome);
            }
        }
    }
}
