//! HTML and terminal rendering of results
//!
//! The HTML template is fixed: basic info, an optional alignment score and an
//! optional frame timeline for videos. Every interpolated value is escaped.

use std::fmt::Write;

use super::preview::{Preview, PreviewKind};
use super::state::{Panel, UiState};
use crate::config::UiCopy;
use crate::config::copy::fill;
use crate::types::{ContentType, FrameReport, HealthStatus, ModerationResult, RiskLevel, RiskThresholds};

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Confidence as a percentage with one decimal.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

fn info_row(out: &mut String, label: &str, value: &str) {
    let _ = write!(
        out,
        r#"<div class="info-row"><span class="info-label">{}</span><span class="info-value">{}</span></div>"#,
        escape_html(label),
        escape_html(value)
    );
}

pub fn classify_risk(result: &ModerationResult, thresholds: &RiskThresholds) -> RiskLevel {
    result.risk_level(thresholds)
}

/// Result card shown in the output panel.
pub fn render_result_html(
    result: &ModerationResult,
    copy: &UiCopy,
    thresholds: &RiskThresholds,
) -> String {
    let risk = classify_risk(result, thresholds);
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<div class="result-card {class}"><div class="result-header"><h3>{title}</h3><span class="risk-badge {class}">{label}</span></div>"#,
        class = risk.css_class(),
        title = escape_html(&copy.result_title),
        label = escape_html(risk.label(copy)),
    );

    out.push_str(r#"<div class="result-basic">"#);
    if let Some(modality) = &result.modality {
        info_row(&mut out, &copy.label_modality, modality);
    }
    info_row(&mut out, &copy.label_type, &result.category);
    info_row(
        &mut out,
        &copy.label_confidence,
        &format_confidence(result.confidence),
    );
    info_row(
        &mut out,
        &copy.label_violation,
        if result.violation { &copy.yes } else { &copy.no },
    );
    if let Some(method) = &result.method {
        info_row(&mut out, &copy.label_method, method);
    }
    if let Some(keyword) = &result.matched_keyword {
        info_row(&mut out, &copy.label_keyword, keyword);
    }
    out.push_str("</div>");

    if result.is_mock {
        let _ = write!(
            out,
            r#"<p class="mock-note">{}</p>"#,
            escape_html(&copy.mock_note)
        );
    }
    if let Some(error) = &result.error {
        let _ = write!(out, r#"<p class="result-error">{}</p>"#, escape_html(error));
    }

    if let Some(ocr) = result.ocr_text.as_deref().filter(|t| !t.trim().is_empty()) {
        render_quote(&mut out, &copy.label_ocr, ocr);
    }
    if let Some(transcript) = result.any_transcript() {
        render_quote(&mut out, &copy.label_transcript, transcript);
    }

    if let Some(score) = result.alignment_score() {
        let gap = result.features.as_ref().and_then(|f| f.semantic_gap);
        render_alignment(&mut out, score, gap, copy);
    }

    if !result.frames().is_empty() {
        render_timeline(&mut out, result.frames(), copy, thresholds);
    }

    out.push_str("</div>");
    out
}

fn render_quote(out: &mut String, label: &str, text: &str) {
    let _ = write!(
        out,
        r#"<div class="extracted-text"><h4>{}</h4><blockquote>{}</blockquote></div>"#,
        escape_html(label),
        escape_html(text)
    );
}

fn render_alignment(out: &mut String, score: f64, gap: Option<f64>, copy: &UiCopy) {
    let width = (score * 100.0).clamp(0.0, 100.0);
    let _ = write!(
        out,
        r#"<div class="alignment"><h4>{}</h4><div class="score-bar"><div class="score-fill" style="width: {:.1}%"></div></div><span class="score-value">{:.3}</span>"#,
        escape_html(&copy.alignment_title),
        width,
        score
    );
    if let Some(gap) = gap {
        let _ = write!(
            out,
            r#"<span class="score-gap">{}: {:.3}</span>"#,
            escape_html(&copy.alignment_gap),
            gap
        );
    }
    out.push_str("</div>");
}

fn render_timeline(
    out: &mut String,
    frames: &[FrameReport],
    copy: &UiCopy,
    thresholds: &RiskThresholds,
) {
    let _ = write!(
        out,
        r#"<div class="timeline"><h4>{}</h4>"#,
        escape_html(&copy.frames_title)
    );
    for frame in frames {
        let at = fill(&copy.frame_at, &[("t", format!("{:.1}", frame.timestamp))]);
        let verdict = &frame.result;
        if verdict.error.is_some() {
            let _ = write!(
                out,
                r#"<div class="frame-item frame-failed"><span class="frame-time">{}</span><span class="frame-type">{}</span></div>"#,
                escape_html(&at),
                escape_html(&copy.frame_failed)
            );
            continue;
        }
        let risk = verdict.risk_level(thresholds);
        let _ = write!(
            out,
            r#"<div class="frame-item {}"><span class="frame-time">{}</span><span class="frame-type">{}</span><span class="frame-confidence">{}</span></div>"#,
            risk.css_class(),
            escape_html(&at),
            escape_html(&verdict.category),
            format_confidence(verdict.confidence)
        );
    }
    out.push_str("</div>");
}

/// Inline error panel.
pub fn render_error_html(message: &str, copy: &UiCopy) -> String {
    format!(
        r#"<div class="error-panel"><h3>{}</h3><p>{}</p></div>"#,
        escape_html(&copy.error_title),
        escape_html(message)
    )
}

/// Output panel markup for the current state.
pub fn render_panel(panel: &Panel, copy: &UiCopy) -> String {
    match panel {
        Panel::Empty => String::new(),
        Panel::Result { html, .. } => html.clone(),
        Panel::Error { message } => render_error_html(message, copy),
    }
}

/// Media element for a file preview.
pub fn render_preview_html(preview: &Preview) -> String {
    let caption = format!(
        r#"<figcaption>{} ({})</figcaption>"#,
        escape_html(&preview.name),
        escape_html(&preview.size_label)
    );
    let Some(url) = &preview.url else {
        return format!(r#"<figure class="preview">{caption}</figure>"#);
    };
    let url = escape_html(url);
    let media = match preview.kind {
        PreviewKind::Image => format!(r#"<img src="{url}" alt="{}">"#, escape_html(&preview.name)),
        PreviewKind::Audio => format!(r#"<audio controls src="{url}"></audio>"#),
        PreviewKind::Video => format!(r#"<video controls src="{url}"></video>"#),
        PreviewKind::Other => String::new(),
    };
    format!(r#"<figure class="preview">{media}{caption}</figure>"#)
}

fn tab_label(tab: ContentType, copy: &UiCopy) -> &str {
    match tab {
        ContentType::Text => &copy.tab_text,
        ContentType::Image => &copy.tab_image,
        ContentType::Audio => &copy.tab_audio,
        ContentType::Video => &copy.tab_video,
    }
}

/// Tab strip with the active tab marked.
pub fn render_tabs(active: ContentType, copy: &UiCopy) -> String {
    let mut out = String::from(r#"<nav class="tabs">"#);
    for tab in ContentType::ALL {
        let class = if tab == active { "tab active" } else { "tab" };
        let _ = write!(
            out,
            r#"<span class="{class}" data-type="{}">{}</span>"#,
            tab.wire_name(),
            escape_html(tab_label(tab, copy))
        );
    }
    out.push_str("</nav>");
    out
}

/// Submit button; disabled with the processing caption while a request runs.
pub fn render_submit_button(loading: bool, copy: &UiCopy) -> String {
    if loading {
        format!(
            r#"<button class="submit" disabled>{}</button>"#,
            escape_html(&copy.processing)
        )
    } else {
        format!(r#"<button class="submit">{}</button>"#, escape_html(&copy.submit))
    }
}

/// Whole page body: tabs, the active input or preview, the submit button and
/// the output panel.
pub fn render_view(ui: &UiState, copy: &UiCopy) -> String {
    let mut out = render_tabs(ui.active_tab(), copy);
    if ui.active_tab() == ContentType::Text {
        if !ui.text().is_empty() {
            let _ = write!(out, r#"<blockquote class="input-text">{}</blockquote>"#, escape_html(ui.text()));
        }
    } else if let Some(preview) = ui.preview() {
        out.push_str(&render_preview_html(preview));
    }
    out.push_str(&render_submit_button(ui.is_loading(), copy));
    out.push_str(&render_panel(ui.panel(), copy));
    out
}

const PAGE_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", "PingFang SC", sans-serif; margin: 2rem auto; max-width: 860px; color: #1f2933; }
.result-card, .error-panel { border-radius: 10px; padding: 1.25rem 1.5rem; border: 1px solid #d9e2ec; }
.result-header { display: flex; justify-content: space-between; align-items: center; }
.risk-badge { padding: 0.25rem 0.75rem; border-radius: 999px; font-weight: 600; color: #fff; }
.risk-badge.risk-safe { background: #27ae60; }
.risk-badge.risk-warning { background: #f39c12; }
.risk-badge.risk-danger { background: #e74c3c; }
.info-row { display: flex; gap: 1rem; padding: 0.3rem 0; }
.info-label { width: 9rem; color: #627d98; }
.score-bar { height: 10px; background: #e4e7eb; border-radius: 5px; overflow: hidden; margin: 0.4rem 0; }
.score-fill { height: 100%; background: #3498db; }
.score-gap { margin-left: 1rem; color: #627d98; }
.timeline { border-left: 3px solid #d9e2ec; padding-left: 1rem; }
.frame-item { display: flex; gap: 1rem; padding: 0.3rem 0; }
.frame-item.risk-warning .frame-type { color: #f39c12; }
.frame-item.risk-danger .frame-type { color: #e74c3c; }
.frame-failed { color: #9aa5b1; }
.mock-note { color: #8d6e00; background: #fff8e1; padding: 0.5rem; border-radius: 6px; }
.error-panel { border-color: #e74c3c; background: #fdecea; }
blockquote { margin: 0.4rem 0; padding: 0.5rem 1rem; background: #f5f7fa; border-radius: 6px; }
.tabs { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
.tab { padding: 0.4rem 1rem; border-radius: 6px; background: #f0f4f8; color: #486581; }
.tab.active { background: #3498db; color: #fff; }
button.submit { margin: 1rem 0; padding: 0.5rem 1.5rem; border: none; border-radius: 6px; background: #3498db; color: #fff; }
button.submit:disabled { background: #9fb3c8; }
figure.preview img, figure.preview video { max-width: 100%; }
footer.generated { margin-top: 2rem; color: #9aa5b1; font-size: 0.8rem; }
"#;

/// Standalone HTML document around a rendered panel, stamped with the
/// local generation time.
pub fn render_page(title: &str, body: &str, lang: &str) -> String {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{PAGE_STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n<footer class=\"generated\">{generated}</footer>\n</body>\n</html>\n",
        lang = escape_html(lang),
        title = escape_html(title),
    )
}

/// Plain-text rendering for the terminal.
pub fn render_result_text(
    result: &ModerationResult,
    copy: &UiCopy,
    thresholds: &RiskThresholds,
) -> String {
    let risk = result.risk_level(thresholds);
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", copy.result_title, risk.label(copy));
    if let Some(modality) = &result.modality {
        let _ = writeln!(out, "  {}: {}", copy.label_modality, modality);
    }
    let _ = writeln!(out, "  {}: {}", copy.label_type, result.category);
    let _ = writeln!(
        out,
        "  {}: {}",
        copy.label_confidence,
        format_confidence(result.confidence)
    );
    let _ = writeln!(
        out,
        "  {}: {}",
        copy.label_violation,
        if result.violation { &copy.yes } else { &copy.no }
    );
    if let Some(method) = &result.method {
        let _ = writeln!(out, "  {}: {}", copy.label_method, method);
    }
    if result.is_mock {
        let _ = writeln!(out, "  ! {}", copy.mock_note);
    }
    if let Some(error) = &result.error {
        let _ = writeln!(out, "  ! {error}");
    }
    if let Some(score) = result.alignment_score() {
        let _ = writeln!(out, "  {}: {:.3}", copy.alignment_title, score);
    }
    if !result.frames().is_empty() {
        let _ = writeln!(out, "  {}:", copy.frames_title);
        for frame in result.frames() {
            let at = fill(&copy.frame_at, &[("t", format!("{:.1}", frame.timestamp))]);
            if frame.result.error.is_some() {
                let _ = writeln!(out, "    {at}  {}", copy.frame_failed);
            } else {
                let _ = writeln!(
                    out,
                    "    {at}  {}  {}  [{}]",
                    frame.result.category,
                    format_confidence(frame.result.confidence),
                    frame.result.risk_level(thresholds)
                );
            }
        }
    }
    out
}

pub fn render_health_text(health: &HealthStatus, copy: &UiCopy) -> String {
    let mut out = String::new();
    if !health.is_reachable() {
        let _ = writeln!(out, "{}: {}", copy.health_title, copy.health_unreachable);
    } else {
        let _ = writeln!(out, "{}: {}", copy.health_title, health.status);
    }
    if let Some(mode) = &health.mode {
        let _ = writeln!(out, "  mode: {mode}");
    }
    for (name, model) in health.models.iter().flatten() {
        let _ = writeln!(out, "  model {name}: {}", if model.ready { "ready" } else { "unavailable" });
    }
    for (name, ok) in health.dependencies.iter().flatten() {
        let _ = writeln!(out, "  dependency {name}: {}", if *ok { "ok" } else { "missing" });
    }
    if let Some(error) = &health.error {
        let _ = writeln!(out, "  error: {error}");
    }
    out
}
