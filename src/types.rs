use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One transcription response from the backend. `entities` and `soap_note`
/// arrive in several shapes depending on the backend version, so they are
/// kept as raw JSON and interpreted on display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub transcription: String,
    #[serde(default)]
    pub entities: Value,
    #[serde(default)]
    pub soap_note: Value,
    #[serde(default)]
    pub validation: Option<Validation>,
}

/// Content-validation block attached by the backend. The confidence score
/// may be on a 0-1 or a 0-100 scale depending on backend version.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Validation {
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

/// The closed set of medical entity categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Symptom,
    Medication,
    Condition,
    Procedure,
    Test,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 5] = [
        EntityCategory::Symptom,
        EntityCategory::Medication,
        EntityCategory::Condition,
        EntityCategory::Procedure,
        EntityCategory::Test,
    ];

    /// Key used by the backend for this category's section.
    pub fn plural_key(self) -> &'static str {
        match self {
            EntityCategory::Symptom => "symptoms",
            EntityCategory::Medication => "medications",
            EntityCategory::Condition => "conditions",
            EntityCategory::Procedure => "procedures",
            EntityCategory::Test => "tests",
        }
    }

    pub fn singular_key(self) -> &'static str {
        match self {
            EntityCategory::Symptom => "symptom",
            EntityCategory::Medication => "medication",
            EntityCategory::Condition => "condition",
            EntityCategory::Procedure => "procedure",
            EntityCategory::Test => "test",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityCategory::Symptom => "Symptoms",
            EntityCategory::Medication => "Medications",
            EntityCategory::Condition => "Conditions",
            EntityCategory::Procedure => "Procedures",
            EntityCategory::Test => "Tests",
        }
    }
}

/// A medical entity in the uniform shape produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEntity {
    pub text: String,
    pub category: EntityCategory,
    /// 0-100, defaulted to 85 when the backend reports nothing.
    pub confidence: u8,
}

/// A persisted history record. Field names stay camelCase on disk so stored
/// payloads match the format the original web client wrote to localStorage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(default)]
    pub filename: String,
    /// RFC 3339 timestamp of when the result was recorded.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub file_size: u64,
    /// Upload round-trip time in seconds.
    #[serde(default)]
    pub processing_time: f64,
    #[serde(default)]
    pub entity_count: usize,
    #[serde(default)]
    pub confidence: Option<u8>,
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub entities: Value,
    #[serde(default)]
    pub soap_note: Value,
    #[serde(default)]
    pub validation: Option<Validation>,
}

/// Backend health probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: String,
}
