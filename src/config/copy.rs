//! User-visible strings
//!
//! The service answers in Chinese, so both English and Chinese copy ship with
//! the client. Templates use `{name}` placeholders filled by [`fill`].

use serde::{Deserialize, Serialize};

/// UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// BCP 47 tag used in the report page.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    pub fn copy(self) -> UiCopy {
        match self {
            Self::En => UiCopy::english(),
            Self::Zh => UiCopy::chinese(),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "zh" | "cn" | "chinese" => Ok(Self::Zh),
            other => Err(format!("Unknown language: {other}. Valid options: en, zh")),
        }
    }
}

/// Every string the view layer and the error panel show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiCopy {
    pub title: String,
    pub tab_text: String,
    pub tab_image: String,
    pub tab_audio: String,
    pub tab_video: String,
    pub submit: String,
    pub processing: String,

    pub prompt_text: String,
    pub prompt_file: String,
    pub text_too_short: String,
    pub file_too_large: String,
    pub unsupported_file: String,
    pub busy: String,
    pub timeout: String,
    pub network_error: String,

    pub result_title: String,
    pub error_title: String,
    pub risk_safe: String,
    pub risk_warning: String,
    pub risk_danger: String,
    pub label_modality: String,
    pub label_type: String,
    pub label_confidence: String,
    pub label_violation: String,
    pub label_method: String,
    pub label_ocr: String,
    pub label_transcript: String,
    pub label_keyword: String,
    pub yes: String,
    pub no: String,
    pub alignment_title: String,
    pub alignment_gap: String,
    pub frames_title: String,
    pub frame_at: String,
    pub frame_failed: String,
    pub mock_note: String,

    pub health_title: String,
    pub health_unreachable: String,

    pub loading_captions: Vec<String>,
}

impl Default for UiCopy {
    fn default() -> Self {
        Self::english()
    }
}

impl UiCopy {
    pub fn english() -> Self {
        Self {
            title: "Cross-modal Content Moderation".into(),
            tab_text: "Text".into(),
            tab_image: "Image".into(),
            tab_audio: "Audio".into(),
            tab_video: "Video".into(),
            submit: "Start moderation".into(),
            processing: "Processing...".into(),

            prompt_text: "Please enter the text to moderate".into(),
            prompt_file: "Please choose a file to upload first".into(),
            text_too_short: "Text must be at least {min} characters long".into(),
            file_too_large: "Video files must not exceed {limit_mb}MB".into(),
            unsupported_file: "Files of type {mime} cannot be checked here".into(),
            busy: "A request is already being processed".into(),
            timeout: "The request timed out, please try again later".into(),
            network_error: "Could not reach the moderation service ({detail})".into(),

            result_title: "Moderation result".into(),
            error_title: "Moderation failed".into(),
            risk_safe: "SAFE".into(),
            risk_warning: "WARNING".into(),
            risk_danger: "DANGER".into(),
            label_modality: "Modality".into(),
            label_type: "Category".into(),
            label_confidence: "Confidence".into(),
            label_violation: "Violation".into(),
            label_method: "Method".into(),
            label_ocr: "Recognized text".into(),
            label_transcript: "Transcript".into(),
            label_keyword: "Matched keyword".into(),
            yes: "Yes".into(),
            no: "No".into(),
            alignment_title: "Cross-modal alignment".into(),
            alignment_gap: "Semantic gap".into(),
            frames_title: "Frame timeline".into(),
            frame_at: "{t}s".into(),
            frame_failed: "analysis failed".into(),
            mock_note: "Models unavailable: this is a simulated result".into(),

            health_title: "Service status".into(),
            health_unreachable: "Service unreachable".into(),

            loading_captions: vec![
                "Uploading content...".into(),
                "Extracting cross-modal features...".into(),
                "Aligning text and visual semantics...".into(),
                "Compiling the moderation report...".into(),
            ],
        }
    }

    pub fn chinese() -> Self {
        Self {
            title: "跨模态UGC智能审核系统".into(),
            tab_text: "文本".into(),
            tab_image: "图像".into(),
            tab_audio: "音频".into(),
            tab_video: "视频".into(),
            submit: "开始审核".into(),
            processing: "审核中...".into(),

            prompt_text: "请输入要审核的文本内容".into(),
            prompt_file: "请先选择要上传的文件".into(),
            text_too_short: "文本内容长度必须至少{min}个字符".into(),
            file_too_large: "视频文件不能超过{limit_mb}MB".into(),
            unsupported_file: "不支持的文件类型: {mime}".into(),
            busy: "正在处理上一个请求，请稍候".into(),
            timeout: "请求超时，请稍后重试".into(),
            network_error: "无法连接审核服务 ({detail})".into(),

            result_title: "审核结果".into(),
            error_title: "审核失败".into(),
            risk_safe: "安全".into(),
            risk_warning: "警告".into(),
            risk_danger: "危险".into(),
            label_modality: "模态".into(),
            label_type: "类型".into(),
            label_confidence: "置信度".into(),
            label_violation: "是否违规".into(),
            label_method: "检测方法".into(),
            label_ocr: "OCR文本".into(),
            label_transcript: "语音转录".into(),
            label_keyword: "命中关键词".into(),
            yes: "是".into(),
            no: "否".into(),
            alignment_title: "跨模态对齐分数".into(),
            alignment_gap: "语义差距".into(),
            frames_title: "关键帧时间轴".into(),
            frame_at: "{t}秒".into(),
            frame_failed: "分析失败".into(),
            mock_note: "模型不可用，当前为模拟结果".into(),

            health_title: "服务状态".into(),
            health_unreachable: "服务不可达".into(),

            loading_captions: vec![
                "正在上传内容...".into(),
                "正在提取跨模态特征...".into(),
                "正在进行语义对齐分析...".into(),
                "正在生成审核报告...".into(),
            ],
        }
    }
}

/// Replace `{key}` placeholders in `template`.
pub fn fill(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}
