//! File previews
//!
//! The browser version shows a blob URL; here in-memory files get a `data:`
//! URL and files on disk a `file://` URL. A preview lives until the next file
//! is chosen.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::{FileSource, SelectedFile};
use crate::utils::format_bytes;

/// Media element used to show the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Audio,
    Video,
    /// Not a media type the page can play; only name and size are shown.
    Other,
}

impl PreviewKind {
    pub fn from_mime(mime: &str) -> Self {
        match mime.split('/').next().unwrap_or_default() {
            "image" => Self::Image,
            "audio" => Self::Audio,
            "video" => Self::Video,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub name: String,
    pub mime: String,
    pub size_label: String,
    pub kind: PreviewKind,
    /// Source for the media element; `None` when too large to inline.
    pub url: Option<String>,
}

impl Preview {
    pub fn for_file(file: &SelectedFile, max_inline_bytes: u64) -> Self {
        let url = match &file.source {
            FileSource::Memory(bytes) if file.size <= max_inline_bytes => Some(format!(
                "data:{};base64,{}",
                file.mime,
                STANDARD.encode(bytes)
            )),
            FileSource::Memory(_) => None,
            FileSource::Path(path) => Some(format!("file://{}", path.display())),
        };
        Self {
            name: file.name.clone(),
            mime: file.mime.clone(),
            size_label: format_bytes(file.size),
            kind: PreviewKind::from_mime(&file.mime),
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_memory_file_is_inlined() {
        let file = SelectedFile::from_bytes("a.png", vec![1, 2, 3]).with_mime("image/png");
        let p = Preview::for_file(&file, 1024);
        assert_eq!(p.kind, PreviewKind::Image);
        assert_eq!(p.url.as_deref(), Some("data:image/png;base64,AQID"));
        assert_eq!(p.size_label, "3 B");
    }

    #[test]
    fn large_memory_file_is_not_inlined() {
        let file = SelectedFile::from_bytes("a.mp4", vec![0; 64]);
        let p = Preview::for_file(&file, 16);
        assert_eq!(p.kind, PreviewKind::Video);
        assert!(p.url.is_none());
    }

    #[test]
    fn kind_from_mime() {
        assert_eq!(PreviewKind::from_mime("audio/wav"), PreviewKind::Audio);
        assert_eq!(PreviewKind::from_mime("application/pdf"), PreviewKind::Other);
    }
}
