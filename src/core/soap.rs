use serde_json::Value;

/// SOAP sections in clinical order, with display headings.
const SECTIONS: [(&str, &str); 4] = [
    ("subjective", "Subjective"),
    ("objective", "Objective"),
    ("assessment", "Assessment"),
    ("plan", "Plan"),
];

const EMPTY_SECTION: &str = "No information available";

/// Render a SOAP note payload as plain text. Sections may be plain strings
/// or structured objects of sub-fields; anything absent renders as a
/// placeholder rather than failing.
pub fn format_soap_note(note: &Value) -> String {
    let mut out = String::new();

    for (key, heading) in SECTIONS {
        out.push_str(heading);
        out.push('\n');
        out.push_str(&format_section(note.get(key)));
        out.push('\n');
    }

    if let Some(generated_at) = note.get("generated_at").and_then(Value::as_str) {
        out.push_str(&format!("Generated: {generated_at}\n"));
    }

    out
}

fn format_section(content: Option<&Value>) -> String {
    let Some(content) = content else {
        return format!("  {EMPTY_SECTION}\n");
    };

    match content {
        Value::Null => format!("  {EMPTY_SECTION}\n"),
        Value::String(text) if text.trim().is_empty() => format!("  {EMPTY_SECTION}\n"),
        Value::String(text) => format!("  {text}\n"),
        Value::Object(fields) => {
            let mut out = String::new();
            for (key, value) in fields {
                out.push_str(&format!("  {}:\n", title_case(key)));
                match value {
                    Value::Array(items) => {
                        for item in items {
                            out.push_str(&format!("    - {}\n", scalar_text(item)));
                        }
                    }
                    other => out.push_str(&format!("    {}\n", scalar_text(other))),
                }
            }
            out
        }
        other => format!("  {}\n", scalar_text(other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// `chief_complaint` -> `Chief Complaint`.
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_sections_render_verbatim() {
        let rendered = format_soap_note(&json!({
            "subjective": "Patient reports a dry cough for three days.",
            "objective": "Afebrile. Lungs clear.",
            "assessment": "Likely viral URI.",
            "plan": "Supportive care."
        }));

        assert!(rendered.contains("Subjective\n  Patient reports a dry cough"));
        assert!(rendered.contains("Plan\n  Supportive care."));
        assert!(!rendered.contains(EMPTY_SECTION));
    }

    #[test]
    fn missing_sections_get_placeholder() {
        let rendered = format_soap_note(&json!({"subjective": "ok"}));
        assert_eq!(rendered.matches(EMPTY_SECTION).count(), 3);
    }

    #[test]
    fn structured_sections_render_subfields_and_lists() {
        let rendered = format_soap_note(&json!({
            "subjective": {
                "chief_complaint": "cough",
                "associated_symptoms": ["fever", "fatigue"]
            }
        }));

        assert!(rendered.contains("  Chief Complaint:\n    cough"));
        assert!(rendered.contains("  Associated Symptoms:\n    - fever\n    - fatigue"));
    }

    #[test]
    fn generated_timestamp_is_appended() {
        let rendered = format_soap_note(&json!({
            "plan": "rest",
            "generated_at": "2026-01-05T10:00:00Z"
        }));
        assert!(rendered.ends_with("Generated: 2026-01-05T10:00:00Z\n"));
    }

    #[test]
    fn title_case_splits_underscores() {
        assert_eq!(title_case("chief_complaint"), "Chief Complaint");
        assert_eq!(title_case("plan"), "Plan");
    }
}
