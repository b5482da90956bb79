use chrono::{DateTime, Utc};

use crate::core::entities::{category_counts, normalize_entities};
use crate::core::format::{confidence_bar, confidence_percentage, format_file_size, format_relative_time};
use crate::core::soap::format_soap_note;
use crate::types::{HistoryEntry, TranscriptionResult};

/// Render a full transcription result for the terminal.
pub fn render_result(result: &TranscriptionResult) -> String {
    let mut out = String::new();

    out.push_str("Transcription\n");
    let transcription = result.transcription.trim();
    if transcription.is_empty() {
        out.push_str("  (empty)\n");
    } else {
        for line in transcription.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out.push('\n');

    let entities = normalize_entities(&result.entities);
    out.push_str(&format!("Medical Entities ({})\n", entities.len()));
    for (category, count) in category_counts(&entities) {
        let items: Vec<String> = entities
            .iter()
            .filter(|entity| entity.category == category)
            .map(|entity| format!("{} ({}%)", entity.text, entity.confidence))
            .collect();
        out.push_str(&format!(
            "  {} ({count}): {}\n",
            category.label(),
            items.join(", ")
        ));
    }
    out.push('\n');

    out.push_str("SOAP Note\n");
    out.push_str(&format_soap_note(&result.soap_note));

    if let Some(score) = result
        .validation
        .as_ref()
        .and_then(|validation| validation.confidence_score)
    {
        let percentage = confidence_percentage(score);
        out.push_str(&format!(
            "\nValidation Confidence: {}\n",
            confidence_bar(percentage)
        ));
        if let Some(reason) = result
            .validation
            .as_ref()
            .and_then(|validation| validation.reason.as_deref())
        {
            out.push_str(&format!("  {reason}\n"));
        }
    }

    out
}

/// Render the history listing, most recent first.
pub fn render_history(entries: &[HistoryEntry], now: DateTime<Utc>) -> String {
    if entries.is_empty() {
        return "No stored transcriptions.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Recent transcriptions ({})\n\n", entries.len()));
    for entry in entries {
        out.push_str(&format!("{}  {}\n", entry.id, entry.filename));
        out.push_str(&format!(
            "    {}  {}  {} entities  {:.1}s",
            format_relative_time(&entry.timestamp, now),
            format_file_size(entry.file_size),
            entry.entity_count,
            entry.processing_time,
        ));
        if let Some(confidence) = entry.confidence {
            out.push_str(&format!("  {}", confidence_bar(confidence)));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Validation;
    use serde_json::json;

    fn sample_result() -> TranscriptionResult {
        TranscriptionResult {
            transcription: "Patient reports fever and cough.".to_string(),
            entities: json!({
                "symptoms": ["fever", "cough"],
                "medications": {"items": [{"text": "aspirin", "confidence": 92}]}
            }),
            soap_note: json!({"subjective": "fever and cough"}),
            validation: Some(Validation {
                confidence_score: Some(0.85),
                reason: Some("Medical content detected".to_string()),
                details: None,
            }),
        }
    }

    #[test]
    fn result_rendering_covers_all_sections() {
        let rendered = render_result(&sample_result());

        assert!(rendered.contains("Transcription\n  Patient reports fever and cough."));
        assert!(rendered.contains("Medical Entities (3)"));
        assert!(rendered.contains("Symptoms (2): fever (85%), cough (85%)"));
        assert!(rendered.contains("Medications (1): aspirin (92%)"));
        assert!(rendered.contains("SOAP Note\nSubjective\n  fever and cough"));
        assert!(rendered.contains("Validation Confidence: [#################---] 85%"));
        assert!(rendered.contains("Medical content detected"));
    }

    #[test]
    fn empty_history_renders_placeholder() {
        assert_eq!(render_history(&[], Utc::now()), "No stored transcriptions.\n");
    }

    #[test]
    fn history_rows_show_metadata() {
        let entry = HistoryEntry {
            id: "1756-abc".to_string(),
            filename: "visit.mp3".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            file_size: 2048,
            processing_time: 3.25,
            entity_count: 4,
            confidence: Some(85),
            transcription: String::new(),
            entities: serde_json::Value::Null,
            soap_note: serde_json::Value::Null,
            validation: None,
        };

        let rendered = render_history(&[entry], Utc::now());
        assert!(rendered.contains("1756-abc  visit.mp3"));
        assert!(rendered.contains("just now  2.00 KB  4 entities  3.2s"));
        assert!(rendered.contains("85%"));
    }
}
