//! Message-channel plumbing between host and runtime.
//!
//! Where the web view offers a real message port, scripts and events travel
//! over two unbounded channels instead of evaluate calls and navigation
//! sniffing:
//! - outbound: [`ChannelRuntime`] → [`RuntimeEndpoint`], one
//!   [`ScriptRequest`] per command, each carrying its own reply slot;
//! - inbound: [`EventSender`] → `RichEditor::run`, one [`InboundMessage`]
//!   per event identifier or intercepted navigation.
//!
//! Both channels are FIFO, which gives the submission-order execution the
//! bridge relies on.

use tokio::sync::{mpsc, oneshot};

use crate::runtime::{DocumentRuntime, Reply, RuntimeError, RuntimeOutcome};
use crate::transport::BridgeError;

/// One script on its way to the runtime.
#[derive(Debug)]
pub struct ScriptRequest {
    pub script: String,
    reply: Option<Reply>,
}

impl ScriptRequest {
    /// Whether the submitter is waiting on the outcome.
    pub fn expects_reply(&self) -> bool {
        self.reply.is_some()
    }

    /// Deliver the outcome. A no-op for fire-and-forget requests or when the
    /// submitter stopped waiting.
    pub fn respond(self, outcome: RuntimeOutcome) {
        if let Some(reply) = self.reply {
            let _ = reply.send(outcome);
        }
    }
}

/// Host half of the outbound channel.
#[derive(Debug, Clone)]
pub struct ChannelRuntime {
    tx: mpsc::UnboundedSender<ScriptRequest>,
}

impl DocumentRuntime for ChannelRuntime {
    fn submit(&self, script: String, reply: Option<Reply>) {
        if let Err(mpsc::error::SendError(request)) = self.tx.send(ScriptRequest { script, reply }) {
            tracing::warn!(script = %request.script, "runtime endpoint closed, dropping script");
            request.respond(Err(RuntimeError::Unavailable));
        }
    }
}

/// Runtime half of the outbound channel.
#[derive(Debug)]
pub struct RuntimeEndpoint {
    rx: mpsc::UnboundedReceiver<ScriptRequest>,
}

impl RuntimeEndpoint {
    /// Next script, or `None` once every `ChannelRuntime` is dropped.
    pub async fn recv(&mut self) -> Option<ScriptRequest> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ScriptRequest> {
        self.rx.try_recv().ok()
    }
}

pub fn runtime_channel() -> (ChannelRuntime, RuntimeEndpoint) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelRuntime { tx }, RuntimeEndpoint { rx })
}

/// What to do with a navigation the document attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    Allow,
    Cancel,
}

/// A navigation intercepted in the web view, awaiting a decision.
#[derive(Debug)]
pub struct NavigationRequest {
    pub url: String,
    /// The user activated a link, as opposed to a scripted navigation.
    pub link_activated: bool,
    decision: Option<oneshot::Sender<NavigationPolicy>>,
}

impl NavigationRequest {
    pub fn new(
        url: impl Into<String>,
        link_activated: bool,
    ) -> (Self, oneshot::Receiver<NavigationPolicy>) {
        let (tx, rx) = oneshot::channel();
        let request = Self {
            url: url.into(),
            link_activated,
            decision: Some(tx),
        };
        (request, rx)
    }

    pub fn decide(mut self, policy: NavigationPolicy) {
        if let Some(tx) = self.decision.take() {
            let _ = tx.send(policy);
        }
    }
}

/// Something the runtime reported to the host.
#[derive(Debug)]
pub enum InboundMessage {
    /// An event identifier, e.g. `input` or `action/insertImage`.
    Signal(String),
    Navigation(NavigationRequest),
}

/// Runtime-side sender for inbound messages.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<InboundMessage>,
}

impl EventSender {
    pub fn signal(&self, identifier: impl Into<String>) -> Result<(), BridgeError> {
        self.tx
            .send(InboundMessage::Signal(identifier.into()))
            .map_err(|_| BridgeError::Closed)
    }

    /// Report a navigation; the receiver resolves once the editor decides.
    pub fn navigate(
        &self,
        url: impl Into<String>,
        link_activated: bool,
    ) -> Result<oneshot::Receiver<NavigationPolicy>, BridgeError> {
        let (request, decision) = NavigationRequest::new(url, link_activated);
        self.tx
            .send(InboundMessage::Navigation(request))
            .map_err(|_| BridgeError::Closed)?;
        Ok(decision)
    }
}

pub fn event_channel() -> (EventSender, mpsc::UnboundedReceiver<InboundMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RuntimeValue;
    use crate::transport::Bridge;
    use weaver_richtext::Command;

    #[tokio::test]
    async fn test_requests_arrive_in_submission_order() {
        let (runtime, mut endpoint) = runtime_channel();
        let bridge = Bridge::new(runtime);
        bridge.fire(&Command::Bold);
        bridge.fire(&Command::Underline);

        let first = endpoint.try_recv().unwrap();
        let second = endpoint.try_recv().unwrap();
        assert_eq!(first.script, "RE.setBold()");
        assert_eq!(second.script, "RE.setUnderline()");
        assert!(!first.expects_reply());
        assert!(endpoint.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_query_round_trip() {
        let (runtime, mut endpoint) = runtime_channel();
        let bridge = Bridge::new(runtime);

        let answer = async {
            let request = endpoint.recv().await.unwrap();
            assert_eq!(request.script, "RE.getText()");
            assert!(request.expects_reply());
            request.respond(Ok(RuntimeValue::Str("hello".into())));
        };
        let (text, ()) = tokio::join!(bridge.query(&Command::GetText), answer);
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_closed_endpoint_answers_neutral() {
        let (runtime, endpoint) = runtime_channel();
        drop(endpoint);
        let bridge = Bridge::new(runtime);
        assert_eq!(bridge.query(&Command::GetHtml).await, "");
    }

    #[tokio::test]
    async fn test_navigation_decision() {
        let (events, mut rx) = event_channel();
        let decision = events.navigate("https://example.com", true).unwrap();

        let Some(InboundMessage::Navigation(request)) = rx.recv().await else {
            panic!("expected navigation");
        };
        assert!(request.link_activated);
        request.decide(NavigationPolicy::Cancel);
        assert_eq!(decision.await.unwrap(), NavigationPolicy::Cancel);
    }

    #[tokio::test]
    async fn test_signal_after_close_errors() {
        let (events, rx) = event_channel();
        drop(rx);
        assert!(matches!(events.signal("input"), Err(BridgeError::Closed)));
    }
}
