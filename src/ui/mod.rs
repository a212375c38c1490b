//! View layer
//!
//! State of the page (tabs, inputs, preview, output panel), the loading
//! indicator and the HTML/terminal renderers. Nothing here talks to the
//! network.

pub mod loading;
pub mod preview;
pub mod render;
pub mod state;

pub use loading::LoadingIndicator;
pub use preview::{Preview, PreviewKind};
pub use render::{
    classify_risk, escape_html, render_error_html, render_health_text, render_page,
    render_panel, render_preview_html, render_result_html, render_result_text,
    render_submit_button, render_tabs, render_view,
};
pub use state::{Panel, UiState};
