//! analysis.rs
//!
//! Image "intelligence" behind the analyze page. The analyzer is injected
//! through [`ImageAnalyzer`]; the only implementation shipped here is
//! [`SimulatedAnalyzer`], which waits out a fake network delay and answers
//! from a fixed table keyed on the file name. No model is ever contacted.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::time::sleep;
use tracing::info;

use crate::ui::{Tone, Widget};

pub const TITLE: &str = "Image Intelligence Assistant";
pub const INTRO: &str =
    "Upload an image below to receive a detailed, AI-generated analysis and description.";
pub const EMPTY_HINT: &str = "Upload an image and run analyze to begin the process.";
pub const SPINNER_MESSAGE: &str = "Analyzing image with AI... This may take a moment.";
pub const FOOTER: &str = "This is a demo application. The analysis is simulated.";

pub const MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const IMAGE_DATA_PLACEHOLDER: &str = "BASE64_IMAGE_DATA_HERE...";
const SYSTEM_INSTRUCTION: &str = "You are a professional image analysis assistant. Provide a highly detailed description and analysis of the uploaded image.";

pub const DEFAULT_LATENCY: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unsupported image type '{extension}' for {} (expected png, jpg or jpeg)", path.display())]
    UnsupportedType { path: PathBuf, extension: String },

    #[error("failed to read image {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the analyzer gets to see of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl ImageMetadata {
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let mime_type = match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => {
                return Err(AnalysisError::UnsupportedType {
                    path: path.to_path_buf(),
                    extension,
                });
            }
        };

        let meta = std::fs::metadata(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            size_bytes: meta.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub analysis_summary: String,
    pub model_confidence: f64,
    pub keywords: Vec<String>,
    pub mock_api_call_details: Value,
}

pub trait ImageAnalyzer {
    async fn analyze(&self, image: &ImageMetadata) -> Result<AnalysisResult, AnalysisError>;
}

struct CannedAnswer {
    keyword: &'static str,
    summary: &'static str,
    confidence: f64,
    tags: [&'static str; 4],
}

static CANNED: [CannedAnswer; 2] = [
    CannedAnswer {
        keyword: "dog",
        summary: "This appears to be a high-quality photograph of a golden retriever sitting patiently in a sunlit park. The background is slightly blurred (bokeh effect), suggesting a professional camera and shallow depth of field, which effectively highlights the subject. The dog's expression is curious and gentle.",
        confidence: 0.98,
        tags: ["Golden Retriever", "Park", "Pet Photography", "Sunny"],
    },
    CannedAnswer {
        keyword: "cat",
        summary: "The image captures a tabby cat curled up on a velvet armchair. The lighting is soft and warm, indicating an indoor setting. The color palette is rich and cozy, suggesting a focus on comfort and domestic life. The cat is relaxed and potentially sleeping.",
        confidence: 0.95,
        tags: ["Tabby Cat", "Indoor", "Cozy", "Animal"],
    },
];

static FALLBACK: CannedAnswer = CannedAnswer {
    keyword: "",
    summary: "The image shows a vast, sweeping landscape, possibly a mountain range or a coast. The colors are dominated by cool blues and greens. The composition uses the rule of thirds effectively, placing the horizon line low to emphasize the dramatic sky. Further details are needed for a precise analysis.",
    confidence: 0.85,
    tags: ["Landscape", "Unknown", "Artistic", "Outdoors"],
};

/// Stand-in analyzer: fixed delay, then a canned answer picked by the first
/// keyword found in the lowercased file name.
#[derive(Debug, Clone)]
pub struct SimulatedAnalyzer {
    latency: Duration,
}

impl SimulatedAnalyzer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl ImageAnalyzer for SimulatedAnalyzer {
    async fn analyze(&self, image: &ImageMetadata) -> Result<AnalysisResult, AnalysisError> {
        let payload = request_payload(image);

        info!(file = %image.file_name, latency_ms = self.latency.as_millis() as u64, "simulating model call");
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        let name = image.file_name.to_lowercase();
        let answer = CANNED
            .iter()
            .find(|c| name.contains(c.keyword))
            .unwrap_or(&FALLBACK);

        info!(file = %image.file_name, confidence = answer.confidence, "analysis complete");

        Ok(AnalysisResult {
            analysis_summary: answer.summary.to_string(),
            model_confidence: answer.confidence,
            keywords: answer.tags.iter().map(|t| t.to_string()).collect(),
            mock_api_call_details: payload,
        })
    }
}

/// The request body a real model call would carry for `image`.
pub fn request_payload(image: &ImageMetadata) -> Value {
    json!({
        "model": MODEL,
        "systemInstruction": SYSTEM_INSTRUCTION,
        "contents": [
            {
                "parts": [
                    {
                        "text": format!(
                            "Analyze this image named {}. What do you see? Provide a structured JSON output.",
                            image.file_name
                        )
                    },
                    {
                        "inlineData": {
                            "mimeType": image.mime_type,
                            "data": IMAGE_DATA_PLACEHOLDER
                        }
                    }
                ]
            }
        ]
    })
}

/// Page shown before any image is chosen.
pub fn render_empty() -> Vec<Widget> {
    vec![Widget::Callout {
        tone: Tone::Info,
        text: EMPTY_HINT.to_string(),
    }]
}

pub fn render_preview(image: &ImageMetadata) -> Vec<Widget> {
    vec![
        Widget::Subheader("Image Preview".to_string()),
        Widget::Caption(format!(
            "{} ({}, {} bytes)",
            image.file_name, image.mime_type, image.size_bytes
        )),
    ]
}

pub fn render_result(result: &AnalysisResult, show_raw: bool) -> Vec<Widget> {
    let mut page = vec![
        Widget::Callout {
            tone: Tone::Success,
            text: "Analysis Complete!".to_string(),
        },
        Widget::Subheader("AI-Generated Summary".to_string()),
        Widget::Callout {
            tone: Tone::Info,
            text: result.analysis_summary.clone(),
        },
        Widget::Divider,
        Widget::Metric {
            label: "Model Confidence".to_string(),
            value: format!("{:.1}%", result.model_confidence * 100.0),
            delta: Some("High Accuracy".to_string()),
        },
        Widget::Subheader("Keywords".to_string()),
        Widget::Code(result.keywords.join(", ")),
    ];

    if show_raw {
        // Serializing plain strings, floats and a Value cannot fail.
        if let Ok(raw) = serde_json::to_value(result) {
            page.push(Widget::Subheader("Raw JSON Output".to_string()));
            page.push(Widget::Json(raw));
        }
    }

    page
}
