//! Payloads returned by the moderation service
//!
//! The service decides what it sends; every field is parsed leniently and
//! anything unrecognised is kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::risk::{RiskLevel, RiskThresholds};

/// Envelope of `POST /api/moderate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<ModerationResult>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ModerateResponse {
    /// `error` joined with `detail` when both are present.
    pub fn error_message(&self) -> Option<String> {
        match (&self.error, &self.detail) {
            (Some(e), Some(d)) if !d.is_empty() => Some(format!("{e} ({d})")),
            (Some(e), _) => Some(e.clone()),
            (None, Some(d)) => Some(d.clone()),
            (None, None) => None,
        }
    }
}

/// Verdict for one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    /// Human-readable modality description set by the service
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    /// Violation category, e.g. `暴力` or `正常`
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub violation: bool,
    #[serde(default)]
    pub features: Option<Features>,
    /// Per-keyframe verdicts (video only)
    #[serde(default)]
    pub frames: Option<Vec<FrameReport>>,

    /// Detection method used by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_score: Option<f64>,
    /// Set when the service fell back to a simulated verdict
    #[serde(default)]
    pub is_mock: bool,
    /// Processing error reported inside an otherwise successful response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModerationResult {
    pub fn risk_level(&self, thresholds: &RiskThresholds) -> RiskLevel {
        RiskLevel::classify(self.violation, self.confidence, thresholds)
    }

    pub fn alignment_score(&self) -> Option<f64> {
        self.features.as_ref().and_then(|f| f.alignment_score)
    }

    /// Keyframes, empty for non-video results.
    pub fn frames(&self) -> &[FrameReport] {
        self.frames.as_deref().unwrap_or_default()
    }

    /// Transcript from audio or from the audio track of a video.
    pub fn any_transcript(&self) -> Option<&str> {
        self.transcript
            .as_deref()
            .or(self.audio_transcript.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Cross-modal features computed by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Features {
    #[serde(default)]
    pub alignment_score: Option<f64>,
    #[serde(default)]
    pub semantic_gap: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One analysed keyframe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Seconds from the start of the video
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub result: FrameVerdict,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameVerdict {
    #[serde(default)]
    pub violation: bool,
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FrameVerdict {
    pub fn risk_level(&self, thresholds: &RiskThresholds) -> RiskLevel {
        RiskLevel::classify(self.violation, self.confidence, thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_video_result() {
        let raw = json!({
            "violation": true,
            "type": "暴力",
            "confidence": 0.82,
            "modality": "视频多帧+音频跨模态融合",
            "method": "视频多模态融合",
            "audio_transcript": "hello",
            "frames": [
                {"timestamp": 1.5, "result": {"violation": false, "type": "正常", "confidence": 0.7, "ocr_text": ""}},
                {"timestamp": 5.0, "result": {"error": "图片文件未找到", "method": "路径错误"}}
            ]
        });
        let r: ModerationResult = serde_json::from_value(raw).unwrap();
        assert!(r.violation);
        assert_eq!(r.category, "暴力");
        assert_eq!(r.frames().len(), 2);
        assert_eq!(r.frames()[1].result.error.as_deref(), Some("图片文件未找到"));
        assert!(r.frames()[1].result.extra.contains_key("method"));
        assert_eq!(r.any_transcript(), Some("hello"));
        assert_eq!(r.risk_level(&RiskThresholds::default()), RiskLevel::Danger);
    }

    #[test]
    fn tolerates_nulls_and_unknown_fields() {
        let raw = json!({
            "violation": false,
            "type": "正常",
            "confidence": 0.95,
            "features": {"text_embed": null, "alignment_score": 0.31, "semantic_gap": 0.69},
            "frames": null,
            "speech_speed": "fast"
        });
        let r: ModerationResult = serde_json::from_value(raw).unwrap();
        assert_eq!(r.alignment_score(), Some(0.31));
        assert!(r.frames().is_empty());
        assert_eq!(r.extra.get("speech_speed"), Some(&json!("fast")));
        assert!(r.features.unwrap().extra.contains_key("text_embed"));
    }

    #[test]
    fn envelope_error_message() {
        let resp: ModerateResponse = serde_json::from_value(json!({
            "error": "审核异常: boom",
            "detail": "请检查文件格式或稍后重试"
        }))
        .unwrap();
        assert!(!resp.success);
        assert_eq!(
            resp.error_message().as_deref(),
            Some("审核异常: boom (请检查文件格式或稍后重试)")
        );
    }
}
