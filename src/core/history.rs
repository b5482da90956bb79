use chrono::Utc;
use uuid::Uuid;

use crate::core::audio_file::AudioFileMeta;
use crate::core::entities::normalize_entities;
use crate::core::format::confidence_percentage;
use crate::core::storage::KeyValueStore;
use crate::error::{MediScribeError, Result};
use crate::types::{HistoryEntry, TranscriptionResult};

pub const HISTORY_KEY: &str = "mediscribe.history";
pub const MAX_ENTRIES: usize = 5;

fn new_entry_id() -> String {
    // Epoch millis plus a short random suffix, the id scheme the stored
    // history format has always used.
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Build a history entry for a finished transcription and persist it at the
/// head of the list, evicting anything past the cap.
pub fn record(
    store: &mut dyn KeyValueStore,
    meta: &AudioFileMeta,
    result: &TranscriptionResult,
    processing_secs: f64,
) -> Result<HistoryEntry> {
    let confidence = result
        .validation
        .as_ref()
        .and_then(|validation| validation.confidence_score)
        .map(confidence_percentage);

    let entry = HistoryEntry {
        id: new_entry_id(),
        filename: meta.filename.clone(),
        timestamp: Utc::now().to_rfc3339(),
        file_size: meta.size_bytes,
        processing_time: processing_secs,
        entity_count: normalize_entities(&result.entities).len(),
        confidence,
        transcription: result.transcription.clone(),
        entities: result.entities.clone(),
        soap_note: result.soap_note.clone(),
        validation: result.validation.clone(),
    };

    let mut entries = list(store);
    entries.insert(0, entry.clone());
    entries.truncate(MAX_ENTRIES);
    save(store, &entries)?;

    Ok(entry)
}

/// All stored entries, most recent first. Missing or unparseable stored
/// data degrades to an empty list.
pub fn list(store: &dyn KeyValueStore) -> Vec<HistoryEntry> {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!("could not read history: {err}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("stored history is unreadable, treating as empty: {err}");
            Vec::new()
        }
    }
}

/// Delete one entry by id. Unknown ids are a no-op.
pub fn remove(store: &mut dyn KeyValueStore, id: &str) -> Result<()> {
    let mut entries = list(store);
    entries.retain(|entry| entry.id != id);
    save(store, &entries)
}

pub fn clear(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove(HISTORY_KEY)
}

/// Rebuild a displayable result from a stored entry. Entries missing any
/// core section are reported as incomplete rather than partially rendered.
pub fn load(store: &dyn KeyValueStore, id: &str) -> Result<TranscriptionResult> {
    let entry = list(store)
        .into_iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| MediScribeError::HistoryEntryNotFound(id.to_string()))?;

    let missing = if entry.transcription.trim().is_empty() {
        Some("transcription")
    } else if entry.entities.is_null() {
        Some("entities")
    } else if entry.soap_note.is_null() {
        Some("soapNote")
    } else {
        None
    };

    if let Some(missing) = missing {
        return Err(MediScribeError::HistoryEntryIncomplete {
            id: entry.id,
            missing,
        });
    }

    Ok(TranscriptionResult {
        transcription: entry.transcription,
        entities: entry.entities,
        soap_note: entry.soap_note,
        validation: entry.validation,
    })
}

fn save(store: &mut dyn KeyValueStore, entries: &[HistoryEntry]) -> Result<()> {
    store.set(HISTORY_KEY, &serde_json::to_string(entries)?)
}
