//! Host callbacks.
//!
//! Every method has a no-op default, so a host implements only the events it
//! cares about.

use crate::caret::{ScrollOffset, Viewport};

/// Receives notifications from the editor bridge.
pub trait EditorHandler {
    /// Content height changed. Only called when the value actually differs.
    fn on_height_changed(&mut self, _height: u32) {}

    /// The document content was re-read after an edit.
    fn on_content_changed(&mut self, _html: &str) {}

    fn on_focus(&mut self) {}

    fn on_blur(&mut self) {}

    /// The runtime finished loading and the buffered configuration was
    /// applied. Called once per editor.
    fn on_loaded(&mut self) {}

    /// The user activated a link inside the document. Return `false` to
    /// keep the document from navigating.
    fn on_link_navigation(&mut self, _url: &str) -> bool {
        true
    }

    /// A custom `action/<name>` event arrived.
    fn on_custom_action(&mut self, _name: &str) {}

    /// Geometry of the host's scroll container, used to keep the caret in
    /// view while typing. `None` disables caret scrolling.
    fn viewport(&self) -> Option<Viewport> {
        None
    }

    /// Scroll the host's container to `offset`.
    fn scroll_to(&mut self, _offset: ScrollOffset) {}

    /// Content height the host's scroll container should assume.
    fn on_content_size(&mut self, _height: i64) {}
}

/// Handler that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl EditorHandler for NoopHandler {}
