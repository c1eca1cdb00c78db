//! Video insertion markup.
//!
//! The runtime has no dedicated video command; videos go in as an HTML
//! fragment through `RE.insertHTML`. Upload and storage of the media is the
//! host's business, so the editor only needs to know which of two shapes
//! the source takes.

use smol_str::SmolStr;

/// Time fragment appended to remote sources so the runtime paints a
/// thumbnail frame instead of a blank player.
pub const THUMBNAIL_FRAGMENT: &str = "#t=0.01";

/// Where the video data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Base64 `data:` URI carried inline in the document.
    ///
    /// The element is tagged with `id` so the host can find it again after
    /// the editor is saved and swap in an uploaded URL.
    Embedded { data_uri: String, id: SmolStr },
    /// Video served from a remote URL.
    Remote { url: String },
}

impl VideoSource {
    /// Inline source with a freshly generated element id.
    pub fn embedded(data_uri: impl Into<String>) -> Self {
        Self::Embedded {
            data_uri: data_uri.into(),
            id: SmolStr::new(uuid::Uuid::new_v4().to_string()),
        }
    }

    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote { url: url.into() }
    }

    /// Build the HTML fragment for this source.
    ///
    /// Attribute values are HTML-escaped; the caller still has to
    /// script-escape the fragment, which `Command::InsertHtml` does.
    pub fn to_html(&self, poster: Option<&str>) -> String {
        let (id_attr, src) = match self {
            VideoSource::Embedded { data_uri, id } => {
                (format!(" id='{}'", attr(id)), attr(data_uri))
            }
            VideoSource::Remote { url } => (String::new(), format!("{}{THUMBNAIL_FRAGMENT}", attr(url))),
        };
        let poster_attr = poster
            .filter(|p| !p.is_empty())
            .map(|p| format!(" poster='{}'", attr(p)))
            .unwrap_or_default();

        format!(
            "<div><video{id_attr} class='video-js' controls preload='auto'{poster_attr} data-setup='{{}}'><source src='{src}'></source></video></div>"
        )
    }
}

fn attr(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_gets_thumbnail_fragment_and_no_id() {
        let html = VideoSource::remote("clip.mp4").to_html(None);
        assert_eq!(
            html,
            "<div><video class='video-js' controls preload='auto' data-setup='{}'><source src='clip.mp4#t=0.01'></source></video></div>"
        );
    }

    #[test]
    fn test_embedded_is_tagged_with_id() {
        let source = VideoSource::Embedded {
            data_uri: "data:video/mp4;base64,AAAA".into(),
            id: "vid-1".into(),
        };
        let html = source.to_html(None);
        assert!(html.starts_with("<div><video id='vid-1' class='video-js'"));
        assert!(!html.contains(THUMBNAIL_FRAGMENT));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = VideoSource::embedded("data:x");
        let b = VideoSource::embedded("data:x");
        assert_ne!(a, b);
    }

    #[test]
    fn test_poster_attribute() {
        let html = VideoSource::remote("clip.mp4").to_html(Some("thumb.png"));
        assert!(html.contains(" poster='thumb.png'"));

        let html = VideoSource::remote("clip.mp4").to_html(Some(""));
        assert!(!html.contains("poster"));
    }

    #[test]
    fn test_attribute_values_cannot_break_out() {
        let html = VideoSource::remote("x' onerror='boom").to_html(None);
        assert!(!html.contains("x' onerror"));
    }
}
