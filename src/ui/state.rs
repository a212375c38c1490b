//! View state: active tab, inputs, preview, loading flag and output panel

use std::collections::HashMap;

use tracing::debug;

use super::preview::Preview;
use crate::defaults;
use crate::error::ModerationError;
use crate::types::{ContentType, ModerationResult, RiskLevel, SelectedFile};

/// What the output area currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Panel {
    #[default]
    Empty,
    Result {
        result: ModerationResult,
        risk: RiskLevel,
        html: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct UiState {
    active: ContentType,
    text: String,
    files: HashMap<ContentType, SelectedFile>,
    preview: Option<Preview>,
    loading: bool,
    panel: Panel,
    max_inline_preview_bytes: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(defaults::limits::MAX_INLINE_PREVIEW_BYTES)
    }
}

impl UiState {
    pub fn new(max_inline_preview_bytes: u64) -> Self {
        Self {
            active: ContentType::Text,
            text: String::new(),
            files: HashMap::new(),
            preview: None,
            loading: false,
            panel: Panel::Empty,
            max_inline_preview_bytes,
        }
    }

    pub fn active_tab(&self) -> ContentType {
        self.active
    }

    /// Show another tab; the output panel is cleared and the tab's own file,
    /// if any, is previewed again.
    pub fn switch_tab(&mut self, tab: ContentType) {
        if tab != self.active {
            debug!(from = %self.active, to = %tab, "Switching tab");
        }
        self.active = tab;
        self.panel = Panel::Empty;
        self.preview = self
            .files
            .get(&tab)
            .map(|f| Preview::for_file(f, self.max_inline_preview_bytes));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Choose a file for the active tab, replacing the previous one and its preview.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<&Preview, ModerationError> {
        if !self.active.is_file() {
            return Err(ModerationError::InvalidInput(
                "The text tab does not take files".to_string(),
            ));
        }
        if !self.active.accepts(&file.mime) {
            return Err(ModerationError::UnsupportedFile {
                mime: file.mime,
                expected: self.active,
            });
        }
        debug!(name = %file.name, mime = %file.mime, size = file.size, "File selected");
        let preview = Preview::for_file(&file, self.max_inline_preview_bytes);
        self.files.insert(self.active, file);
        self.panel = Panel::Empty;
        Ok(self.preview.insert(preview))
    }

    /// Drag-and-drop: only the first file counts.
    pub fn drop_files(
        &mut self,
        files: impl IntoIterator<Item = SelectedFile>,
    ) -> Result<&Preview, ModerationError> {
        let first = files
            .into_iter()
            .next()
            .ok_or_else(|| ModerationError::InvalidInput("No file was dropped".to_string()))?;
        self.select_file(first)
    }

    pub fn active_file(&self) -> Option<&SelectedFile> {
        self.files.get(&self.active)
    }

    pub fn clear_file(&mut self) {
        self.files.remove(&self.active);
        self.preview = None;
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The submit button is disabled while a request is in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.loading
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn show_result(&mut self, result: ModerationResult, risk: RiskLevel, html: String) {
        self.panel = Panel::Result { result, risk, html };
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.panel = Panel::Error {
            message: message.into(),
        };
    }

    pub fn clear_output(&mut self) {
        self.panel = Panel::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, vec![0u8; 4]).with_mime("image/png")
    }

    #[test]
    fn text_tab_refuses_files() {
        let mut ui = UiState::default();
        assert!(matches!(
            ui.select_file(png("a.png")),
            Err(ModerationError::InvalidInput(_))
        ));
    }

    #[test]
    fn wrong_family_is_refused() {
        let mut ui = UiState::default();
        ui.switch_tab(ContentType::Audio);
        let err = ui.select_file(png("a.png")).unwrap_err();
        assert!(matches!(
            err,
            ModerationError::UnsupportedFile { expected: ContentType::Audio, .. }
        ));
        assert!(ui.active_file().is_none());
    }

    #[test]
    fn shared_containers_follow_the_extension() {
        let mut ui = UiState::default();
        ui.switch_tab(ContentType::Video);
        let ogv = SelectedFile::from_bytes("clip.ogv", b"OggS\x00\x02\x00\x00".to_vec());
        assert_eq!(ogv.mime, "video/ogg");
        ui.select_file(ogv).unwrap();

        ui.switch_tab(ContentType::Audio);
        let weba = SelectedFile::from_bytes("voice.weba", vec![0x1A, 0x45, 0xDF, 0xA3, 0x9F]);
        assert_eq!(weba.mime, "audio/webm");
        ui.select_file(weba).unwrap();
        assert_eq!(ui.active_file().unwrap().name, "voice.weba");
    }

    #[test]
    fn selecting_replaces_preview() {
        let mut ui = UiState::default();
        ui.switch_tab(ContentType::Image);
        ui.select_file(png("first.png")).unwrap();
        let preview = ui.select_file(png("second.png")).unwrap();
        assert_eq!(preview.name, "second.png");
        assert_eq!(ui.active_file().unwrap().name, "second.png");
    }

    #[test]
    fn drop_uses_first_file() {
        let mut ui = UiState::default();
        ui.switch_tab(ContentType::Image);
        ui.drop_files(vec![png("one.png"), png("two.png")]).unwrap();
        assert_eq!(ui.active_file().unwrap().name, "one.png");
        assert!(ui.drop_files(Vec::new()).is_err());
    }

    #[test]
    fn switching_tabs_clears_panel_and_restores_preview() {
        let mut ui = UiState::default();
        ui.switch_tab(ContentType::Image);
        ui.select_file(png("a.png")).unwrap();
        ui.show_error("boom");

        ui.switch_tab(ContentType::Video);
        assert_eq!(ui.panel(), &Panel::Empty);
        assert!(ui.preview().is_none());

        ui.switch_tab(ContentType::Image);
        assert_eq!(ui.preview().unwrap().name, "a.png");
    }

    #[test]
    fn loading_disables_submit() {
        let mut ui = UiState::default();
        assert!(ui.submit_enabled());
        ui.set_loading(true);
        assert!(!ui.submit_enabled());
    }
}
