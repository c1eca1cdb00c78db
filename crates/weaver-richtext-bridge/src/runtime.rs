//! The document runtime seen from the host.
//!
//! The runtime is a black box that evaluates script strings and, when asked,
//! answers with a value. Whatever carries the scripts (a web view's evaluate
//! call, a message port, a test double) implements [`DocumentRuntime`].

use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;

/// A value returned by the runtime for an evaluated script.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    /// No result (`undefined`, `null`, or a value the bridge can't carry).
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl RuntimeValue {
    /// Collapse to the bridge's uniform string form.
    ///
    /// Booleans become `"true"`/`"false"`, numbers their decimal form
    /// (integral floats print without a fraction, since script numbers are
    /// all floats), strings pass through and `Null` is the empty string.
    pub fn into_bridge_string(self) -> String {
        match self {
            RuntimeValue::Null => String::new(),
            RuntimeValue::Bool(b) => b.to_string(),
            RuntimeValue::Int(i) => i.to_string(),
            RuntimeValue::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
                (f as i64).to_string()
            }
            RuntimeValue::Float(f) => f.to_string(),
            RuntimeValue::Str(s) => s,
        }
    }
}

impl From<serde_json::Value> for RuntimeValue {
    /// For runtimes that hand back JSON. Arrays and objects have no string
    /// form on the bridge and map to `Null`.
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => RuntimeValue::Null,
            Value::Bool(b) => RuntimeValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RuntimeValue::Int(i),
                None => n.as_f64().map_or(RuntimeValue::Null, RuntimeValue::Float),
            },
            Value::String(s) => RuntimeValue::Str(s),
        }
    }
}

impl From<&str> for RuntimeValue {
    fn from(s: &str) -> Self {
        RuntimeValue::Str(s.to_owned())
    }
}

impl From<String> for RuntimeValue {
    fn from(s: String) -> Self {
        RuntimeValue::Str(s)
    }
}

impl From<bool> for RuntimeValue {
    fn from(b: bool) -> Self {
        RuntimeValue::Bool(b)
    }
}

impl From<i64> for RuntimeValue {
    fn from(i: i64) -> Self {
        RuntimeValue::Int(i)
    }
}

/// Failure evaluating a script inside the runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuntimeError {
    /// The script threw or its promise rejected.
    #[error("script failed: {message}")]
    Script { message: String },

    /// The runtime is gone or never came up.
    #[error("document runtime unavailable")]
    Unavailable,
}

/// Outcome delivered for one evaluated script.
pub type RuntimeOutcome = Result<RuntimeValue, RuntimeError>;

/// Reply slot for one submitted script.
pub type Reply = oneshot::Sender<RuntimeOutcome>;

/// Something that evaluates scripts inside the embedded document.
///
/// `submit` must not block. Implementations evaluate scripts in submission
/// order and, when `reply` is present, send exactly one outcome for that
/// script through it. Dropping the reply without sending is tolerated and
/// treated by the bridge as a failed evaluation.
pub trait DocumentRuntime {
    fn submit(&self, script: String, reply: Option<Reply>);
}

impl<T: DocumentRuntime + ?Sized> DocumentRuntime for &T {
    fn submit(&self, script: String, reply: Option<Reply>) {
        (**self).submit(script, reply)
    }
}

impl<T: DocumentRuntime + ?Sized> DocumentRuntime for Rc<T> {
    fn submit(&self, script: String, reply: Option<Reply>) {
        (**self).submit(script, reply)
    }
}

impl<T: DocumentRuntime + ?Sized> DocumentRuntime for Arc<T> {
    fn submit(&self, script: String, reply: Option<Reply>) {
        (**self).submit(script, reply)
    }
}
