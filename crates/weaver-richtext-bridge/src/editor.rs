//! RichEditor - the host-side half of the editor bridge.
//!
//! Owns the mirrored [`EditorState`], turns host calls into commands and
//! reconciles the mirror against events the runtime reports. Everything
//! runs on one logical owner: methods take `&mut self` for anything that
//! touches state, and suspend only while waiting on a runtime reply.
//!
//! # Load sequence
//!
//! Until the runtime reports `ready`, setters only buffer. The first `ready`
//! flushes HTML, the editable flag, placeholder and line height, in that
//! order, then notifies [`EditorHandler::on_loaded`]. Later `ready`s just
//! re-measure height.

use tokio::sync::mpsc;
use tracing::{debug, trace, warn};
use weaver_richtext::{
    CaretScroll, Color, Command, EditorConfig, EditorHandler, EditorState, InboundEvent,
    NoopHandler, Viewport, VideoSource, compute_scroll_adjustment, effective_content_height,
};

use crate::channel::{InboundMessage, NavigationPolicy};
use crate::runtime::DocumentRuntime;
use crate::transport::Bridge;

pub struct RichEditor<R, H = NoopHandler> {
    bridge: Bridge<R>,
    state: EditorState,
    handler: H,
    callback_scheme: String,
}

impl<R: DocumentRuntime> RichEditor<R, NoopHandler> {
    /// Editor with default configuration and no host callbacks.
    pub fn new(runtime: R) -> Self {
        Self::with_handler(runtime, NoopHandler, EditorConfig::default())
    }
}

impl<R: DocumentRuntime, H: EditorHandler> RichEditor<R, H> {
    pub fn with_handler(runtime: R, handler: H, config: EditorConfig) -> Self {
        Self {
            bridge: Bridge::new(runtime),
            state: EditorState::new(&config),
            handler,
            callback_scheme: config.callback_scheme,
        }
    }

    pub fn bridge(&self) -> &Bridge<R> {
        &self.bridge
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    // === Event intake ===

    /// Process inbound messages until every sender is dropped.
    ///
    /// Messages are handled strictly one after another; a message's runtime
    /// round trips all finish before the next message is looked at.
    pub async fn run(&mut self, mut inbound: mpsc::UnboundedReceiver<InboundMessage>) {
        while let Some(message) = inbound.recv().await {
            match message {
                InboundMessage::Signal(identifier) => self.handle_identifier(&identifier).await,
                InboundMessage::Navigation(request) => {
                    let policy = self
                        .decide_navigation(&request.url, request.link_activated)
                        .await;
                    request.decide(policy);
                }
            }
        }
        debug!("inbound channel closed, editor loop exiting");
    }

    /// Decode and apply one event identifier. Unknown identifiers are ignored.
    pub async fn handle_identifier(&mut self, identifier: &str) {
        if let Some(event) = InboundEvent::decode(identifier) {
            self.handle_event(event).await;
        }
    }

    /// Apply one decoded event.
    pub async fn handle_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::GenericCallback => self.drain_command_queue().await,
            other => self.apply(other).await,
        }
    }

    /// Decide on a navigation the document attempted.
    ///
    /// The callback scheme is the runtime asking to be drained and never
    /// navigates. Link activations go to the host; anything else (the
    /// initial page load, say) is allowed.
    pub async fn decide_navigation(&mut self, url: &str, link_activated: bool) -> NavigationPolicy {
        if let Some(event) = InboundEvent::from_navigation(url, &self.callback_scheme) {
            self.handle_event(event).await;
            return NavigationPolicy::Cancel;
        }

        if link_activated && !self.handler.on_link_navigation(url) {
            return NavigationPolicy::Cancel;
        }
        NavigationPolicy::Allow
    }

    /// Fetch the runtime's queued event identifiers and apply them in order.
    pub async fn drain_command_queue(&mut self) {
        let raw = self.bridge.query(&Command::GetCommandQueue).await;
        let identifiers: Vec<String> = match serde_json::from_str(&raw) {
            Ok(identifiers) => identifiers,
            Err(error) => {
                warn!(%error, queue = %raw, "failed to parse command queue");
                Vec::new()
            }
        };
        trace!(count = identifiers.len(), "draining command queue");

        for identifier in identifiers {
            match InboundEvent::decode(&identifier) {
                // The queue holds event identifiers only; a nested callback
                // would just re-drain what we're draining.
                Some(InboundEvent::GenericCallback) | None => {}
                Some(event) => self.apply(event).await,
            }
        }
    }

    async fn apply(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::Ready => {
                self.load().await;
                self.update_height().await;
            }
            InboundEvent::Input => {
                if let Some(viewport) = self.handler.viewport() {
                    let scroll = self.scroll_caret_to_visible(viewport).await;
                    self.handler.on_content_size(scroll.content_height);
                    if let Some(offset) = scroll.offset {
                        self.handler.scroll_to(offset);
                    }
                }
                self.refresh_content().await;
            }
            InboundEvent::HeightUpdate => self.update_height().await,
            InboundEvent::Focus => self.handler.on_focus(),
            InboundEvent::Blur => self.handler.on_blur(),
            InboundEvent::Action(name) => {
                self.refresh_content().await;
                self.handler.on_custom_action(&name);
            }
            InboundEvent::GenericCallback => {}
        }
    }

    // === Reconciliation ===

    async fn load(&mut self) {
        let Some([html, editable, placeholder, line_height]) = self.state.begin_load() else {
            return;
        };
        // Height depends on the HTML landing first.
        self.bridge.query(&html).await;
        self.update_height().await;
        self.bridge.fire(&editable);
        self.bridge.fire(&placeholder);
        self.bridge.fire(&line_height);
        debug!("editor runtime loaded");
        self.handler.on_loaded();
    }

    async fn refresh_content(&mut self) {
        let html = self.bridge.query(&Command::GetHtml).await;
        self.state.record_content(html);
        self.handler.on_content_changed(self.state.content_html());
        self.update_height().await;
    }

    async fn update_height(&mut self) {
        let height = self
            .bridge
            .query_parsed(&self.state.client_height_command(), 0u32)
            .await;
        if self.state.record_height(height) {
            self.handler.on_height_changed(height);
        }
    }

    /// Work out whether the host must scroll to keep the caret visible.
    ///
    /// Client height, line height and caret position are fetched together
    /// and all awaited before computing. Failed fetches fall back to the
    /// viewport height, the configured line height and 0 respectively.
    pub async fn scroll_caret_to_visible(&self, viewport: Viewport) -> CaretScroll {
        let client_height_cmd = self.state.client_height_command();
        let client_height = self.bridge.query_parsed(&client_height_cmd, 0i64);
        let line_height = self.fetch_line_height();
        let caret_y = self
            .bridge
            .query_parsed(&Command::RelativeCaretYPosition, 0i64);

        let (client_height, line_height, caret_y) =
            futures_util::join!(client_height, line_height, caret_y);

        CaretScroll {
            content_height: effective_content_height(client_height, viewport.height),
            offset: compute_scroll_adjustment(
                viewport.height,
                viewport.offset,
                i64::from(line_height),
                caret_y,
            ),
        }
    }

    /// Line height as the runtime reports it, or the configured default
    /// before load and when the answer doesn't parse.
    pub async fn fetch_line_height(&self) -> u32 {
        let fallback = self.state.default_line_height();
        if !self.state.is_loaded() {
            return fallback;
        }
        self.bridge
            .query_parsed(&Command::GetLineHeight, fallback)
            .await
    }

    // === Buffered configuration ===

    /// HTML the host asked for (buffered until load).
    pub fn html(&self) -> &str {
        self.state.html()
    }

    /// Last HTML read back from the document.
    pub fn content_html(&self) -> &str {
        self.state.content_html()
    }

    pub fn height(&self) -> u32 {
        self.state.height()
    }

    /// Replace the document HTML. Before load this only buffers.
    pub async fn set_html(&mut self, html: impl Into<String>) {
        if let Some(command) = self.state.set_html(html) {
            self.bridge.query(&command).await;
            self.update_height().await;
        }
    }

    pub fn set_editing_enabled(&mut self, enabled: bool) {
        if let Some(command) = self.state.set_editable(enabled) {
            self.bridge.fire(&command);
        }
    }

    /// Whether the document is editable. Once loaded this asks the runtime
    /// and refreshes the mirror with its answer.
    pub async fn is_editing_enabled(&mut self) -> bool {
        if !self.state.is_loaded() {
            return self.state.editable();
        }
        let editable = self.bridge.query_bool(&Command::IsContentEditable).await;
        self.state.record_editable(editable);
        editable
    }

    pub fn placeholder(&self) -> &str {
        self.state.placeholder()
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        if let Some(command) = self.state.set_placeholder(placeholder) {
            self.bridge.fire(&command);
        }
    }

    pub fn line_height(&self) -> u32 {
        self.state.line_height()
    }

    pub fn set_line_height(&mut self, px: u32) {
        if let Some(command) = self.state.set_line_height(px) {
            self.bridge.fire(&command);
        }
    }

    // === Content queries ===

    pub async fn get_html(&self) -> String {
        self.bridge.query(&Command::GetHtml).await
    }

    pub async fn get_text(&self) -> String {
        self.bridge.query(&Command::GetText).await
    }

    pub async fn selected_text(&self) -> String {
        self.bridge.query(&Command::SelectedText).await
    }

    /// Link target under the current selection; empty without a range
    /// selection or when the selection isn't inside a link.
    pub async fn selected_href(&self) -> String {
        if !self.has_range_selection().await {
            return String::new();
        }
        self.bridge.query(&Command::SelectedHref).await
    }

    pub async fn has_range_selection(&self) -> bool {
        self.bridge.query_bool(&Command::RangeSelectionExists).await
    }

    pub async fn has_range_or_caret_selection(&self) -> bool {
        self.bridge
            .query_bool(&Command::RangeOrCaretSelectionExists)
            .await
    }

    pub async fn is_cursor_in_table(&self) -> bool {
        self.bridge.query_bool(&Command::IsCursorInTable).await
    }

    // === Formatting ===

    pub fn remove_format(&self) {
        self.bridge.fire(&Command::RemoveFormat);
    }

    pub fn undo(&self) {
        self.bridge.fire(&Command::Undo);
    }

    pub fn redo(&self) {
        self.bridge.fire(&Command::Redo);
    }

    pub fn bold(&self) {
        self.bridge.fire(&Command::Bold);
    }

    pub fn italic(&self) {
        self.bridge.fire(&Command::Italic);
    }

    pub fn underline(&self) {
        self.bridge.fire(&Command::Underline);
    }

    pub fn strikethrough(&self) {
        self.bridge.fire(&Command::Strikethrough);
    }

    pub fn subscript(&self) {
        self.bridge.fire(&Command::Subscript);
    }

    pub fn superscript(&self) {
        self.bridge.fire(&Command::Superscript);
    }

    /// Heading level, clamped to `1..=6`.
    pub fn header(&self, level: u8) {
        self.bridge.fire(&Command::Heading(level.clamp(1, 6)));
    }

    pub fn indent(&self) {
        self.bridge.fire(&Command::Indent);
    }

    pub fn outdent(&self) {
        self.bridge.fire(&Command::Outdent);
    }

    pub fn ordered_list(&self) {
        self.bridge.fire(&Command::OrderedList);
    }

    pub fn unordered_list(&self) {
        self.bridge.fire(&Command::UnorderedList);
    }

    pub fn blockquote(&self) {
        self.bridge.fire(&Command::Blockquote);
    }

    pub fn align_left(&self) {
        self.bridge.fire(&Command::AlignLeft);
    }

    pub fn align_center(&self) {
        self.bridge.fire(&Command::AlignCenter);
    }

    pub fn align_right(&self) {
        self.bridge.fire(&Command::AlignRight);
    }

    pub fn checkbox(&self) {
        self.bridge.fire(&Command::checkbox());
    }

    // === Style ===

    /// Font size in px.
    pub fn set_font_size(&self, px: u32) {
        self.bridge.fire(&Command::SetFontSize(px));
    }

    pub fn set_editor_background_color(&self, color: Color) {
        self.bridge.fire(&Command::SetEditorBackgroundColor(color));
    }

    pub fn set_editor_font_color(&self, color: Color) {
        self.bridge.fire(&Command::SetEditorFontColor(color));
    }

    pub fn set_text_color(&self, color: Color) {
        self.bridge.fire(&Command::PrepareInsert);
        self.bridge.fire(&Command::SetTextColor(color));
    }

    pub fn set_text_background_color(&self, color: Color) {
        self.bridge.fire(&Command::PrepareInsert);
        self.bridge.fire(&Command::SetTextBackgroundColor(color));
    }

    // === Insertion ===

    pub fn insert_image(&self, url: impl Into<String>, alt: impl Into<String>) {
        self.bridge.fire(&Command::PrepareInsert);
        self.bridge.fire(&Command::InsertImage {
            url: url.into(),
            alt: alt.into(),
        });
    }

    pub fn insert_video(&self, source: &VideoSource, poster: Option<&str>) {
        self.bridge.fire(&Command::PrepareInsert);
        self.bridge.fire(&Command::InsertHtml(source.to_html(poster)));
    }

    /// Insert a link at the caret. An empty `href` is refused.
    pub fn insert_link(
        &self,
        href: impl Into<String>,
        text: impl Into<String>,
        title: impl Into<String>,
    ) {
        let href = href.into();
        if href.is_empty() {
            warn!("refusing to insert a link without a target");
            return;
        }
        self.bridge.fire(&Command::PrepareInsert);
        self.bridge.fire(&Command::InsertLink {
            href,
            text: text.into(),
            title: title.into(),
        });
    }

    pub fn insert_table(&self, width: u32, height: u32) {
        self.bridge.fire(&Command::PrepareInsert);
        self.bridge.fire(&Command::InsertTable { width, height });
    }

    pub fn add_row_to_table(&self) {
        self.bridge.fire(&Command::AddRowToTable);
    }

    pub fn delete_column_from_table(&self) {
        self.bridge.fire(&Command::DeleteColumnFromTable);
    }

    // === Focus ===

    pub fn focus(&self) {
        self.bridge.fire(&Command::Focus);
    }

    /// Focus at a point in the document's coordinate space.
    pub fn focus_at(&self, x: f64, y: f64) {
        self.bridge.fire(&Command::FocusAt { x, y });
    }

    pub fn blur(&self) {
        self.bridge.fire(&Command::Blur);
    }

    // === Raw scripts ===

    /// Send a host-authored script without waiting.
    pub fn run_script(&self, script: impl Into<String>) {
        self.bridge.fire(&Command::Raw(script.into()));
    }

    /// Evaluate a host-authored script and return its result as a string.
    pub async fn query_script(&self, script: impl Into<String>) -> String {
        self.bridge.query(&Command::Raw(script.into())).await
    }
}
