//! weaver-richtext-bridge: async host side of the rich-text editor bridge.
//!
//! The editor document lives in a sandboxed script runtime (a web view).
//! This crate sends it commands, waits on its answers and keeps the host's
//! mirror in step with the events it reports.
//!
//! - [`DocumentRuntime`] - the seam to whatever evaluates scripts
//! - [`Bridge`] - fire-and-forget and awaited queries with neutral fallbacks
//! - [`RichEditor`] - host-facing editor API and event reconciliation
//! - [`channel`] - mpsc plumbing for runtimes reached through a message port
//!
//! # Example
//!
//! ```ignore
//! let (runtime, mut endpoint) = runtime_channel();
//! let (events, inbound) = event_channel();
//! let mut editor = RichEditor::new(runtime);
//!
//! editor.set_placeholder("Say something...");
//! // hand `endpoint` and `events` to the web view glue, then:
//! editor.run(inbound).await;
//! ```

pub mod channel;
pub mod editor;
pub mod runtime;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod transport;

#[cfg(test)]
mod testing;

pub use channel::{
    ChannelRuntime, EventSender, InboundMessage, NavigationPolicy, NavigationRequest,
    RuntimeEndpoint, ScriptRequest, event_channel, runtime_channel,
};
pub use editor::RichEditor;
pub use runtime::{DocumentRuntime, Reply, RuntimeError, RuntimeOutcome, RuntimeValue};
pub use transport::{Bridge, BridgeError, parse_or};

pub use weaver_richtext as protocol;
