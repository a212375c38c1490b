//! Files chosen for upload and the submission built from the active tab

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use super::modality::ContentType;
use crate::defaults;
use crate::error::ModerationError;
use crate::utils::mime::guess_mime;

/// Where the bytes of a [`SelectedFile`] live.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// Read lazily at upload time.
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A file picked from disk or dropped onto the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub source: FileSource,
}

impl SelectedFile {
    /// Stat the file and sniff its MIME type from the first bytes.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ModerationError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(ModerationError::InvalidInput(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let mut head = Vec::with_capacity(defaults::limits::SNIFF_BYTES);
        let file = tokio::fs::File::open(path).await?;
        file.take(defaults::limits::SNIFF_BYTES as u64)
            .read_to_end(&mut head)
            .await?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = guess_mime(Some(&head), Some(&name));

        Ok(Self {
            name,
            mime,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = guess_mime(Some(&bytes), Some(&name));
        Self {
            name,
            mime,
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Override the sniffed MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    pub async fn read(&self) -> Result<Vec<u8>, ModerationError> {
        match &self.source {
            FileSource::Path(path) => Ok(tokio::fs::read(path).await?),
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Validated content ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Text(String),
    File {
        kind: ContentType,
        file: SelectedFile,
    },
}

impl Submission {
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Text(_) => ContentType::Text,
            Self::File { kind, .. } => *kind,
        }
    }
}
