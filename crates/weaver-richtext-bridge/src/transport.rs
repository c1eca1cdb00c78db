//! Command transport between host and runtime.
//!
//! Two kinds of send: `fire` submits a command and forgets it, `query`
//! submits with a reply slot and waits for that command's own result.
//! Queries never fail from the caller's point of view. A runtime error or a
//! dropped reply is logged and the caller gets the neutral empty string,
//! which every typed helper then maps to its documented fallback.

use std::str::FromStr;

use thiserror::Error;
use tokio::sync::oneshot;
use weaver_richtext::Command;

use crate::runtime::{DocumentRuntime, RuntimeError, RuntimeValue};

/// Transport-level failure for a single query.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// The reply slot was dropped without an answer.
    #[error("runtime dropped the reply without answering")]
    ReplyDropped,

    /// The editor's event loop is no longer receiving.
    #[error("editor event loop has shut down")]
    Closed,
}

/// Sends encoded commands into a [`DocumentRuntime`].
#[derive(Debug, Clone, Default)]
pub struct Bridge<R> {
    runtime: R,
}

impl<R: DocumentRuntime> Bridge<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Submit without waiting for, or asking for, a result.
    pub fn fire(&self, command: &Command) {
        let script = command.encode();
        tracing::trace!(%script, "fire");
        self.runtime.submit(script, None);
    }

    /// Submit and wait for the raw runtime result.
    pub async fn try_query(&self, command: &Command) -> Result<RuntimeValue, BridgeError> {
        let (tx, rx) = oneshot::channel();
        self.runtime.submit(command.encode(), Some(tx));
        match rx.await {
            Ok(outcome) => Ok(outcome?),
            Err(_) => Err(BridgeError::ReplyDropped),
        }
    }

    /// Submit and wait for the result in uniform string form.
    ///
    /// Failures are logged and yield `""`.
    pub async fn query(&self, command: &Command) -> String {
        match self.try_query(command).await {
            Ok(value) => value.into_bridge_string(),
            Err(error) => {
                tracing::warn!(%error, script = %command, "runtime command failed");
                String::new()
            }
        }
    }

    /// Query a flag. Anything but `"true"` reads as `false`.
    pub async fn query_bool(&self, command: &Command) -> bool {
        self.query(command).await == "true"
    }

    /// Query an integer, falling back when the result doesn't parse.
    pub async fn query_parsed<T: FromStr>(&self, command: &Command, fallback: T) -> T {
        parse_or(&self.query(command).await, fallback)
    }
}

/// Parse a bridge string, or take `fallback` when it isn't a `T`.
pub fn parse_or<T: FromStr>(value: &str, fallback: T) -> T {
    value.parse().unwrap_or(fallback)
}
