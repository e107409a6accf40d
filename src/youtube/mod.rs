//! YouTube video identification and transcript types.
//!
//! Provides the validated `VideoId` newtype, the `Transcript` blob the rest
//! of the crate consumes, and the `CaptionSource` trait implemented by the
//! InnerTube captions client.

mod captions;

pub use captions::CaptionClient;

use crate::error::{FetchError, ParseError};
use async_trait::async_trait;
use serde::Serialize;
use url::Url;

/// Length of every YouTube video identifier.
const VIDEO_ID_LEN: usize = 11;

/// A validated YouTube video identifier.
///
/// Always exactly 11 characters of `[A-Za-z0-9_-]`. The only way to obtain
/// one is [`VideoId::parse`], so holding a `VideoId` means the input matched
/// an accepted shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Extract a video ID from a pasted URL or bare identifier.
    ///
    /// Accepted shapes, checked in priority order: a `v=` query parameter on
    /// any YouTube host, a `youtu.be/ID` short link (trailing query ignored),
    /// `youtube.com/embed/ID`, `youtube.com/shorts/ID`, and a bare
    /// 11-character ID. Anything else is a [`ParseError`]. No network access.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();

        if let Some(id) = extract_from_url(trimmed) {
            return Ok(VideoId(id));
        }

        if is_valid_id(trimmed) {
            return Ok(VideoId(trimmed.to_string()));
        }

        Err(ParseError {
            input: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// True if `candidate` is exactly 11 characters of the video-ID alphabet.
fn is_valid_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Pull a video ID out of a YouTube URL. Scheme and `www.` are optional.
fn extract_from_url(input: &str) -> Option<String> {
    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme).ok()?;
    let host = url.host_str()?;
    if host != "youtu.be" && host != "youtube.com" && !host.ends_with(".youtube.com") {
        return None;
    }

    // Long form: ?v=ID on any YouTube host.
    if let Some(id) = url
        .query_pairs()
        .find(|(k, _)| k == "v")
        .map(|(_, v)| v.to_string())
    {
        if is_valid_id(&id) {
            return Some(id);
        }
    }

    // Short form: youtu.be/ID, trailing query ignored.
    if host == "youtu.be" {
        if let Some(id) = url.path_segments().and_then(|mut s| s.next()) {
            if is_valid_id(id) {
                return Some(id.to_string());
            }
        }
        return None;
    }

    // Embed and shorts forms: youtube.com/{embed,shorts}/ID.
    let segments: Vec<&str> = url.path_segments()?.collect();
    if segments.len() >= 2 && (segments[0] == "embed" || segments[0] == "shorts") {
        let candidate = segments[1];
        if is_valid_id(candidate) {
            return Some(candidate.to_string());
        }
    }

    None
}

/// A video's caption transcript, collapsed to plain text.
///
/// Caption fragments are joined by single spaces in chronological order,
/// with timestamps dropped. Never mutated after creation; a re-fetch
/// replaces the whole value.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    /// Video the captions belong to.
    pub video: VideoId,
    /// Video title from the player response.
    pub title: String,
    /// Language code of the caption track actually used.
    pub language: String,
    /// The full transcript text.
    pub text: String,
}

impl Transcript {
    /// First `max_chars` characters of the text, with a `...` marker when
    /// truncated. Cuts on character boundaries, so multibyte text is safe.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.chars().count() <= max_chars {
            return self.text.clone();
        }
        let cut: String = self.text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }

    /// Character count of the full transcript text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Trait for caption transcript providers.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch the caption transcript for a video.
    async fn fetch(&self, video: &VideoId) -> Result<Transcript, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_shapes() {
        // Every shape carrying the same ID parses to the same VideoId
        let inputs = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=VSFea_rMwtaiR8Q7",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ];

        for input in inputs {
            let id = VideoId::parse(input).unwrap();
            assert_eq!(id.as_str(), "dQw4w9WgXcQ", "input: {}", input);
        }
    }

    #[test]
    fn test_parse_short_url() {
        let id = VideoId::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id, VideoId("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_parse_preserves_id_case() {
        let id = VideoId::parse("https://youtu.be/_NuH3D4SN-c").unwrap();
        assert_eq!(id.as_str(), "_NuH3D4SN-c");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let inputs = [
            "",
            "not-a-url",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=tooshort",
            "https://www.youtube.com/watch",
            "https://youtu.be/",
            "dQw4w9WgXc",   // 10 chars
            "dQw4w9WgXcQQ", // 12 chars
            "dQw4w9WgX!Q",  // bad alphabet
        ];

        for input in inputs {
            let err = VideoId::parse(input).unwrap_err();
            assert_eq!(err.input, input.trim(), "input: {}", input);
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = VideoId::parse("  dQw4w9WgXcQ\n").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_watch_url() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    fn transcript_with_text(text: &str) -> Transcript {
        Transcript {
            video: VideoId::parse("dQw4w9WgXcQ").unwrap(),
            title: "Test".to_string(),
            language: "en".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        let t = transcript_with_text("short text");
        assert_eq!(t.preview(2000), "short text");
    }

    #[test]
    fn test_preview_truncates_with_marker() {
        let t = transcript_with_text(&"a".repeat(3000));
        let preview = t.preview(2000);
        assert_eq!(preview.len(), 2003);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        let t = transcript_with_text("日本語のキャプション");
        let preview = t.preview(4);
        assert_eq!(preview, "日本語の...");
    }

    #[test]
    fn test_char_count_counts_chars_not_bytes() {
        let t = transcript_with_text("日本語");
        assert_eq!(t.char_count(), 3);
    }
}
