//! Keeping the caret inside the visible viewport.
//!
//! The runtime reports where the caret sits relative to the top of what is
//! currently shown. From that, the line height and the viewport height, the
//! host can decide whether to scroll. The computation is pure; fetching the
//! three inputs is the bridge's job.

/// The caret is drawn slightly shorter than a full line.
pub const CURSOR_INSET: i64 = 4;

/// Scroll position of the host's scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    pub x: i64,
    pub y: i64,
}

impl ScrollOffset {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Geometry of the host's scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Visible height of the container.
    pub height: i64,
    /// Current scroll offset.
    pub offset: ScrollOffset,
}

impl Viewport {
    pub const fn new(height: i64, offset: ScrollOffset) -> Self {
        Self { height, offset }
    }
}

/// Outcome of a caret-visibility pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretScroll {
    /// Content height the scroll container should assume.
    pub content_height: i64,
    /// Where to scroll, if the caret is out of view.
    pub offset: Option<ScrollOffset>,
}

/// Compute the scroll offset that brings the caret back into view.
///
/// `relative_caret_y` is measured from the top of the visible area, so it
/// is negative when the caret sits above it. Returns `None` when the caret
/// is already visible.
///
/// Inputs come straight from the runtime, so every step saturates instead
/// of overflowing.
pub fn compute_scroll_adjustment(
    viewport_height: i64,
    content_offset: ScrollOffset,
    line_height: i64,
    relative_caret_y: i64,
) -> Option<ScrollOffset> {
    let cursor_height = line_height.saturating_sub(CURSOR_INSET);

    if relative_caret_y.saturating_add(cursor_height) > viewport_height {
        // Below the fold: scroll down until the whole line fits.
        let y = content_offset
            .y
            .saturating_add(relative_caret_y)
            .saturating_add(line_height)
            .saturating_sub(viewport_height);
        Some(ScrollOffset::new(0, y))
    } else if relative_caret_y < 0 {
        let y = content_offset.y.saturating_add(relative_caret_y).max(0);
        Some(ScrollOffset::new(content_offset.x, y))
    } else {
        None
    }
}

/// Content height to use for the scroll container: the runtime's value
/// when it reported a positive one, otherwise the viewport's own height.
pub fn effective_content_height(client_height: i64, viewport_height: i64) -> i64 {
    if client_height > 0 {
        client_height
    } else {
        viewport_height
    }
}
