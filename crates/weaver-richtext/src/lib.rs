//! weaver-richtext: protocol types for the rich-text editor bridge.
//!
//! The editor itself runs as a script inside an embedded web view. This
//! crate holds everything about talking to it that does not depend on how
//! messages actually travel:
//! - `Command` - typed editing intents and their script encoding
//! - `InboundEvent` - decoding of event identifiers the script reports
//! - `EditorState` - the host's mirror of document state
//! - `compute_scroll_adjustment` - caret visibility math
//! - `EditorHandler` - host callbacks
//!
//! The async transport lives in `weaver-richtext-bridge`.

pub mod caret;
pub mod color;
pub mod command;
pub mod config;
pub mod error;
pub mod escape;
pub mod event;
pub mod handler;
pub mod state;
pub mod video;

pub use caret::{
    CURSOR_INSET, CaretScroll, ScrollOffset, Viewport, compute_scroll_adjustment,
    effective_content_height,
};
pub use color::Color;
pub use command::Command;
pub use config::{
    DEFAULT_CALLBACK_SCHEME, DEFAULT_EDITOR_ELEMENT_ID, DEFAULT_LINE_HEIGHT, EditorConfig,
};
pub use error::ConfigError;
pub use escape::escape_script_str;
pub use event::{ACTION_PREFIX, InboundEvent};
pub use handler::{EditorHandler, NoopHandler};
pub use smol_str::SmolStr;
pub use state::{EditorState, LoadState};
pub use video::{THUMBNAIL_FRAGMENT, VideoSource};
