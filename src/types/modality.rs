//! Content types (modalities) the service can check

use serde::{Deserialize, Serialize};

/// What is being submitted. Doubles as the UI tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Text,
    Image,
    Audio,
    Video,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [Self::Text, Self::Image, Self::Audio, Self::Video];

    /// Value of the `content_type` form field.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Whether this tab takes a file upload.
    pub const fn is_file(self) -> bool {
        !matches!(self, Self::Text)
    }

    /// `accept` filter of the file input, e.g. `image/*`.
    pub const fn accept(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Image => Some("image/*"),
            Self::Audio => Some("audio/*"),
            Self::Video => Some("video/*"),
        }
    }

    /// Whether a file of `mime` may be uploaded under this tab.
    pub fn accepts(self, mime: &str) -> bool {
        match self.accept() {
            Some(filter) => {
                let family = filter.trim_end_matches('*');
                mime.to_ascii_lowercase().starts_with(family)
            }
            None => false,
        }
    }

    /// File tab matching a MIME family.
    pub fn from_mime(mime: &str) -> Option<Self> {
        [Self::Image, Self::Audio, Self::Video]
            .into_iter()
            .find(|kind| kind.accepts(mime))
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wire_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown content type: {s}. Valid options: text, image, audio, video"))
    }
}
