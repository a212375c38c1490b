//! MIME type detection utilities

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file name (extension-based)
pub fn guess_mime_from_name(name: &str) -> Option<String> {
    mime_guess::from_path(name)
        .first_raw()
        .map(|s| s.to_string())
}

/// Top-level type of a media MIME (`image`, `audio`, `video`).
fn media_family(mime: &str) -> Option<&str> {
    let family = mime.split('/').next()?;
    matches!(family, "image" | "audio" | "video").then_some(family)
}

/// Combined guess: prefer bytes, fall back to extension, otherwise octet-stream.
///
/// Containers such as Ogg and WebM carry audio or video under one magic
/// number; when the sniffed family and the extension's family disagree, the
/// extension decides.
pub fn guess_mime(bytes: Option<&[u8]>, name: Option<&str>) -> String {
    let sniffed = bytes.and_then(guess_mime_from_bytes);
    let by_name = name.and_then(guess_mime_from_name);
    match (sniffed, by_name) {
        (Some(sniffed), Some(by_name))
            if media_family(&sniffed).is_some()
                && media_family(&by_name).is_some()
                && media_family(&sniffed) != media_family(&by_name) =>
        {
            by_name
        }
        (Some(sniffed), _) => sniffed,
        (None, Some(by_name)) => by_name,
        (None, None) => "application/octet-stream".to_string(),
    }
}

/// Human-readable byte size, e.g. `1.50 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut i = 0;
    while size >= 1024.0 && i < UNITS.len() - 1 {
        size /= 1024.0;
        i += 1;
    }
    if i == 0 {
        format!("{} {}", bytes, UNITS[i])
    } else {
        format!("{:.2} {}", size, UNITS[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_from_name() {
        assert_eq!(guess_mime_from_name("photo.png"), Some("image/png".to_string()));
        assert_eq!(guess_mime_from_name("song.mp3"), Some("audio/mpeg".to_string()));
        assert_eq!(guess_mime_from_name("clip.mp4"), Some("video/mp4".to_string()));
        assert_eq!(guess_mime_from_name("file.unknownext"), None);
    }

    #[test]
    fn test_guess_mime_combined() {
        // Bytes win over the extension
        let png_bytes = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(guess_mime(Some(png_bytes), Some("file.jpg")), "image/png");
        assert_eq!(guess_mime(None, None), "application/octet-stream");
    }

    #[test]
    fn test_guess_mime_shared_containers() {
        let ogg = b"OggS\x00\x02\x00\x00\x00\x00\x00\x00\x00\x00";
        assert_eq!(guess_mime(Some(ogg), Some("clip.ogv")), "video/ogg");
        assert_eq!(guess_mime(Some(ogg), Some("voice.ogg")), "audio/ogg");
        assert_eq!(guess_mime(Some(ogg), None), "audio/ogg");

        let webm = &[0x1A, 0x45, 0xDF, 0xA3, 0x9F, 0x42, 0x86, 0x81, 0x01];
        assert_eq!(guess_mime(Some(webm), Some("voice.weba")), "audio/webm");
        assert_eq!(guess_mime(Some(webm), Some("clip.webm")), "video/webm");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(50 * 1024 * 1024), "50.00 MB");
    }
}
