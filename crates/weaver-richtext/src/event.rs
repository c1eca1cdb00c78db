//! Decoding of event identifiers pushed by the document runtime.
//!
//! The runtime reports everything as a single string: `ready`, `input`,
//! `updateHeight`, `focus`, `blur` or `action/<name>`, sometimes with a
//! trailing suffix. Matching is by exact, case-sensitive prefix, in a fixed
//! order, first match wins.

use smol_str::SmolStr;

/// Prefix marking a custom action identifier.
pub const ACTION_PREFIX: &str = "action/";

/// An event reported by the document runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The runtime finished initializing.
    Ready,
    /// The user changed the content.
    Input,
    /// The content height may have changed.
    HeightUpdate,
    Focus,
    Blur,
    /// Custom action raised by script the host injected.
    Action(SmolStr),
    /// The runtime signalled that its command queue has entries.
    GenericCallback,
}

impl InboundEvent {
    /// Decode an event identifier.
    ///
    /// Returns `None` for identifiers that match no known prefix. Those are
    /// ignored by the reconciler rather than treated as errors.
    pub fn decode(identifier: &str) -> Option<Self> {
        let event = if identifier.starts_with("ready") {
            InboundEvent::Ready
        } else if identifier.starts_with("input") {
            InboundEvent::Input
        } else if identifier.starts_with("updateHeight") {
            InboundEvent::HeightUpdate
        } else if identifier.starts_with("focus") {
            InboundEvent::Focus
        } else if identifier.starts_with("blur") {
            InboundEvent::Blur
        } else if let Some(name) = identifier.strip_prefix(ACTION_PREFIX) {
            InboundEvent::Action(SmolStr::new(name))
        } else {
            tracing::trace!(identifier, "ignoring unrecognized event identifier");
            return None;
        };
        Some(event)
    }

    /// Classify an intercepted navigation.
    ///
    /// A URL under the callback scheme is the runtime poking the host to
    /// drain its command queue. Anything else is a real navigation.
    pub fn from_navigation(url: &str, callback_scheme: &str) -> Option<Self> {
        url.starts_with(callback_scheme)
            .then_some(InboundEvent::GenericCallback)
    }

    /// Whether handling this event re-reads the document HTML.
    pub fn refreshes_content(&self) -> bool {
        matches!(self, InboundEvent::Input | InboundEvent::Action(_))
    }
}
