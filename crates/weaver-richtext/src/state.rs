//! Host-side mirror of the document runtime's state.
//!
//! `EditorState` holds what the host last learned from the runtime (content
//! HTML, height) next to what the host wants the runtime to have (HTML,
//! editable flag, placeholder, line height). Host setters are safe at any
//! time: before load they only buffer, after load they also hand back the
//! command that applies the change. The buffered values are flushed exactly
//! once, when the first `ready` arrives.

use smol_str::SmolStr;

use crate::command::Command;
use crate::config::EditorConfig;

/// Whether the runtime has reported `ready` yet. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    /// HTML the host wants in the document.
    html: String,
    /// Last HTML read back from the document.
    content_html: String,
    height_px: u32,
    load: LoadState,
    pending_editable: bool,
    placeholder: String,
    line_height_px: u32,
    default_line_height: u32,
    editor_element_id: SmolStr,
}

impl EditorState {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            html: config.html.clone(),
            content_html: String::new(),
            height_px: 0,
            load: LoadState::Unloaded,
            pending_editable: config.editable,
            placeholder: config.placeholder.clone(),
            line_height_px: config.default_line_height,
            default_line_height: config.default_line_height,
            editor_element_id: SmolStr::new(&config.editor_element_id),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_loaded(&self) -> bool {
        self.load == LoadState::Loaded
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    pub fn height(&self) -> u32 {
        self.height_px
    }

    pub fn editable(&self) -> bool {
        self.pending_editable
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn line_height(&self) -> u32 {
        self.line_height_px
    }

    pub fn default_line_height(&self) -> u32 {
        self.default_line_height
    }

    /// Query for the editor element's rendered height.
    pub fn client_height_command(&self) -> Command {
        Command::ClientHeight {
            element_id: self.editor_element_id.clone(),
        }
    }

    /// Handle a `ready` event.
    ///
    /// On the first call, marks the state loaded, adopts the buffered HTML as
    /// the mirrored content and returns the buffered configuration as
    /// commands in flush order: HTML, content-editable, placeholder, line
    /// height. Later calls return `None`.
    pub fn begin_load(&mut self) -> Option<[Command; 4]> {
        if self.is_loaded() {
            return None;
        }
        self.load = LoadState::Loaded;
        self.content_html = self.html.clone();
        Some([
            Command::SetHtml(self.html.clone()),
            Command::SetContentEditable(self.pending_editable),
            Command::SetPlaceholderText(self.placeholder.clone()),
            Command::SetLineHeight(self.line_height_px),
        ])
    }

    /// Buffer HTML for the document. Once loaded, the mirror follows the
    /// host's value directly and the returned command pushes it.
    pub fn set_html(&mut self, html: impl Into<String>) -> Option<Command> {
        self.html = html.into();
        if self.is_loaded() {
            self.content_html = self.html.clone();
            Some(Command::SetHtml(self.html.clone()))
        } else {
            None
        }
    }

    pub fn set_editable(&mut self, editable: bool) -> Option<Command> {
        self.pending_editable = editable;
        self.is_loaded()
            .then_some(Command::SetContentEditable(editable))
    }

    /// Record the editable flag as the runtime reported it.
    pub fn record_editable(&mut self, editable: bool) {
        self.pending_editable = editable;
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) -> Option<Command> {
        self.placeholder = placeholder.into();
        self.is_loaded()
            .then(|| Command::SetPlaceholderText(self.placeholder.clone()))
    }

    pub fn set_line_height(&mut self, px: u32) -> Option<Command> {
        self.line_height_px = px;
        self.is_loaded().then_some(Command::SetLineHeight(px))
    }

    /// Record HTML read back from the document.
    pub fn record_content(&mut self, html: String) {
        self.content_html = html;
    }

    /// Record a freshly measured height. Returns `true` only when it
    /// differs from the previous measurement.
    pub fn record_height(&mut self, height: u32) -> bool {
        if self.height_px == height {
            return false;
        }
        self.height_px = height;
        true
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
