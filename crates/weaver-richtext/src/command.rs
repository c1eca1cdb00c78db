//! Typed editing intents and their script encoding.
//!
//! A `Command` is what the host wants the document runtime to do. Encoding
//! turns it into the single script string the runtime evaluates. Encoding
//! is total: every command has exactly one script, and free-text arguments
//! go through [`escape_script_str`] so they stay inside their literal.
//! Rejecting semantically bad input (an empty link target, say) is the
//! caller's job and happens before a `Command` is built.

use std::fmt;

use smol_str::SmolStr;

use crate::color::Color;
use crate::escape::escape_script_str;

/// Every instruction the host can send to the document runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // === Formatting ===
    RemoveFormat,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Subscript,
    Superscript,
    /// Heading level. Encoded clamped to `1..=6`.
    Heading(u8),
    Indent,
    Outdent,
    OrderedList,
    UnorderedList,
    Blockquote,
    AlignLeft,
    AlignCenter,
    AlignRight,
    /// Insert a checkbox carrying the given element id.
    Checkbox(SmolStr),

    // === Style ===
    /// Font size in px.
    SetFontSize(u32),
    SetEditorBackgroundColor(Color),
    /// Base text color of the whole editor.
    SetEditorFontColor(Color),
    /// Color of the current selection.
    SetTextColor(Color),
    SetTextBackgroundColor(Color),
    /// Line height in px.
    SetLineHeight(u32),
    SetPlaceholderText(String),
    SetContentEditable(bool),

    // === History ===
    Undo,
    Redo,

    // === Insertion ===
    /// Save the selection so a following insert lands where the caret was.
    PrepareInsert,
    InsertImage { url: String, alt: String },
    InsertHtml(String),
    InsertLink { href: String, text: String, title: String },
    InsertTable { width: u32, height: u32 },
    AddRowToTable,
    DeleteColumnFromTable,

    // === Focus ===
    Focus,
    /// Non-finite coordinates encode as `0`.
    FocusAt { x: f64, y: f64 },
    Blur,

    // === Content ===
    SetHtml(String),
    GetHtml,
    GetText,

    // === Queries ===
    SelectedText,
    SelectedHref,
    RangeSelectionExists,
    RangeOrCaretSelectionExists,
    IsCursorInTable,
    IsContentEditable,
    GetLineHeight,
    /// Rendered height of the editor element with the given DOM id.
    ClientHeight { element_id: SmolStr },
    RelativeCaretYPosition,
    /// Pending event identifiers, as a JSON array of strings.
    GetCommandQueue,

    /// Host-authored script, sent verbatim.
    Raw(String),
}

impl Command {
    /// Encode to the script string the runtime evaluates.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Whether the runtime is expected to answer with a value the caller
    /// uses. Purely informational; any command can be sent either way.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Command::GetHtml
                | Command::GetText
                | Command::SelectedText
                | Command::SelectedHref
                | Command::RangeSelectionExists
                | Command::RangeOrCaretSelectionExists
                | Command::IsCursorInTable
                | Command::IsContentEditable
                | Command::GetLineHeight
                | Command::ClientHeight { .. }
                | Command::RelativeCaretYPosition
                | Command::GetCommandQueue
        )
    }

    /// Checkbox with a fresh 8-character id.
    pub fn checkbox() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Command::Checkbox(SmolStr::new(&uuid[..8]))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::RemoveFormat => f.write_str("RE.removeFormat()"),
            Command::Bold => f.write_str("RE.setBold()"),
            Command::Italic => f.write_str("RE.setItalic()"),
            Command::Underline => f.write_str("RE.setUnderline()"),
            Command::Strikethrough => f.write_str("RE.setStrikeThrough()"),
            Command::Subscript => f.write_str("RE.setSubscript()"),
            Command::Superscript => f.write_str("RE.setSuperscript()"),
            Command::Indent => f.write_str("RE.setIndent()"),
            Command::Outdent => f.write_str("RE.setOutdent()"),
            Command::OrderedList => f.write_str("RE.setOrderedList()"),
            Command::UnorderedList => f.write_str("RE.setUnorderedList()"),
            Command::Blockquote => f.write_str("RE.setBlockquote()"),
            Command::AlignLeft => f.write_str("RE.setJustifyLeft()"),
            Command::AlignCenter => f.write_str("RE.setJustifyCenter()"),
            Command::AlignRight => f.write_str("RE.setJustifyRight()"),
            Command::Undo => f.write_str("RE.undo()"),
            Command::Redo => f.write_str("RE.redo()"),
            Command::PrepareInsert => f.write_str("RE.prepareInsert()"),
            Command::AddRowToTable => f.write_str("RE.addRowToTable()"),
            Command::DeleteColumnFromTable => f.write_str("RE.deleteColumnFromTable()"),
            Command::Focus => f.write_str("RE.focus()"),
            Command::Blur => f.write_str("RE.blurFocus()"),
            Command::GetHtml => f.write_str("RE.getHtml()"),
            Command::GetText => f.write_str("RE.getText()"),
            Command::SelectedText => f.write_str("RE.selectedText()"),
            Command::SelectedHref => f.write_str("RE.getSelectedHref()"),
            Command::RangeSelectionExists => f.write_str("RE.rangeSelectionExists()"),
            Command::RangeOrCaretSelectionExists => f.write_str("RE.rangeOrCaretSelectionExists()"),
            Command::IsCursorInTable => f.write_str("RE.isCursorInTable()"),
            Command::IsContentEditable => f.write_str("RE.editor.isContentEditable"),
            Command::GetLineHeight => f.write_str("RE.getLineHeight()"),
            Command::RelativeCaretYPosition => f.write_str("RE.getRelativeCaretYPosition()"),
            Command::GetCommandQueue => f.write_str("RE.getCommandQueue()"),
            Command::Heading(level) => write!(f, "RE.setHeading('{}')", (*level).clamp(1, 6)),
            Command::Checkbox(id) => write!(f, "RE.setCheckbox('{}')", escape_script_str(id)),
            Command::SetFontSize(px) => write!(f, "RE.setFontSize('{px}px')"),
            Command::SetEditorBackgroundColor(c) => write!(f, "RE.setBackgroundColor('{c}')"),
            Command::SetEditorFontColor(c) => write!(f, "RE.setBaseTextColor('{c}')"),
            Command::SetTextColor(c) => write!(f, "RE.setTextColor('{c}')"),
            Command::SetTextBackgroundColor(c) => write!(f, "RE.setTextBackgroundColor('{c}')"),
            Command::SetLineHeight(px) => write!(f, "RE.setLineHeight('{px}px')"),
            Command::SetPlaceholderText(text) => {
                write!(f, "RE.setPlaceholderText('{}')", escape_script_str(text))
            }
            Command::SetContentEditable(editable) => {
                write!(f, "RE.editor.contentEditable = {editable}")
            }
            Command::InsertImage { url, alt } => write!(
                f,
                "RE.insertImage('{}', '{}')",
                escape_script_str(url),
                escape_script_str(alt)
            ),
            Command::InsertHtml(html) => write!(f, "RE.insertHTML('{}')", escape_script_str(html)),
            Command::InsertLink { href, text, title } => write!(
                f,
                "RE.insertLink('{}', '{}', '{}')",
                escape_script_str(href),
                escape_script_str(text),
                escape_script_str(title)
            ),
            Command::InsertTable { width, height } => {
                write!(f, "RE.insertTable({width}, {height})")
            }
            Command::FocusAt { x, y } => {
                write!(f, "RE.focusAtPoint({}, {})", finite_or_zero(*x), finite_or_zero(*y))
            }
            Command::SetHtml(html) => write!(f, "RE.setHtml('{}')", escape_script_str(html)),
            Command::ClientHeight { element_id } => write!(
                f,
                "document.getElementById('{}').clientHeight",
                escape_script_str(element_id)
            ),
            Command::Raw(script) => f.write_str(script),
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_verbs() {
        insta::assert_snapshot!(Command::Bold, @"RE.setBold()");
        insta::assert_snapshot!(Command::Strikethrough, @"RE.setStrikeThrough()");
        insta::assert_snapshot!(Command::AlignCenter, @"RE.setJustifyCenter()");
        insta::assert_snapshot!(Command::Heading(3), @"RE.setHeading('3')");
        insta::assert_snapshot!(Command::Blur, @"RE.blurFocus()");
    }

    #[test]
    fn test_numeric_and_color_args_are_verbatim() {
        assert_eq!(Command::SetFontSize(14).encode(), "RE.setFontSize('14px')");
        assert_eq!(Command::SetLineHeight(28).encode(), "RE.setLineHeight('28px')");
        assert_eq!(
            Command::InsertTable { width: 3, height: 2 }.encode(),
            "RE.insertTable(3, 2)"
        );
        assert_eq!(Command::FocusAt { x: 10.0, y: 12.5 }.encode(), "RE.focusAtPoint(10, 12.5)");
        assert_eq!(
            Command::SetTextColor(Color::rgb(0xFF, 0x80, 0x00)).encode(),
            "RE.setTextColor('#FF8000')"
        );
        assert_eq!(
            Command::SetEditorFontColor(Color::BLACK).encode(),
            "RE.setBaseTextColor('#000000')"
        );
        assert_eq!(
            Command::SetContentEditable(false).encode(),
            "RE.editor.contentEditable = false"
        );
    }

    #[test]
    fn test_free_text_args_are_escaped() {
        let cmd = Command::InsertLink {
            href: "https://example.com/?q='x'".into(),
            text: "it's".into(),
            title: "line\nbreak".into(),
        };
        insta::assert_snapshot!(
            cmd,
            @r"RE.insertLink('https://example.com/?q=\'x\'', 'it\'s', 'line\nbreak')"
        );

        assert_eq!(
            Command::SetHtml(r"<p>a\b</p>".into()).encode(),
            r"RE.setHtml('<p>a\\b</p>')"
        );
        assert_eq!(
            Command::SetPlaceholderText("Write 'here'".into()).encode(),
            r"RE.setPlaceholderText('Write \'here\'')"
        );
    }

    #[test]
    fn test_injection_attempt_stays_in_literal() {
        let cmd = Command::InsertImage {
            url: "x'); RE.setHtml(''); ('".into(),
            alt: String::new(),
        };
        assert_eq!(
            cmd.encode(),
            r"RE.insertImage('x\'); RE.setHtml(\'\'); (\'', '')"
        );
    }

    #[test]
    fn test_delete_column_uses_its_own_entry_point() {
        // Deleting a column must never fall through to adding a row.
        assert_eq!(
            Command::DeleteColumnFromTable.encode(),
            "RE.deleteColumnFromTable()"
        );
        assert_ne!(
            Command::DeleteColumnFromTable.encode(),
            Command::AddRowToTable.encode()
        );
    }

    #[test]
    fn test_heading_level_is_clamped_when_encoding() {
        assert_eq!(Command::Heading(0).encode(), "RE.setHeading('1')");
        assert_eq!(Command::Heading(6).encode(), "RE.setHeading('6')");
        assert_eq!(Command::Heading(9).encode(), "RE.setHeading('6')");
    }

    #[test]
    fn test_focus_at_non_finite_coordinates_encode_as_zero() {
        let cmd = Command::FocusAt {
            x: f64::NAN,
            y: f64::INFINITY,
        };
        assert_eq!(cmd.encode(), "RE.focusAtPoint(0, 0)");
        let cmd = Command::FocusAt {
            x: f64::NEG_INFINITY,
            y: 3.5,
        };
        assert_eq!(cmd.encode(), "RE.focusAtPoint(0, 3.5)");
    }

    #[test]
    fn test_cursor_in_table_is_a_call() {
        assert_eq!(Command::IsCursorInTable.encode(), "RE.isCursorInTable()");
    }

    #[test]
    fn test_client_height_uses_element_id() {
        let cmd = Command::ClientHeight {
            element_id: "editor".into(),
        };
        assert_eq!(cmd.encode(), "document.getElementById('editor').clientHeight");
        assert!(cmd.is_query());
    }

    #[test]
    fn test_checkbox_ids() {
        let Command::Checkbox(a) = Command::checkbox() else {
            panic!("expected checkbox");
        };
        let Command::Checkbox(b) = Command::checkbox() else {
            panic!("expected checkbox");
        };
        assert_eq!(a.len(), 8);
        assert_ne!(a, b);
        assert_eq!(
            Command::Checkbox("ab12cd34".into()).encode(),
            "RE.setCheckbox('ab12cd34')"
        );
    }

    #[test]
    fn test_raw_is_verbatim() {
        assert_eq!(Command::Raw("RE.custom('x')".into()).encode(), "RE.custom('x')");
        assert!(!Command::Raw(String::new()).is_query());
    }
}
