use serde::{Deserialize, Deserializer, Serialize};

/// Inbound webhook body from the voice-capture client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryPayload {
    #[serde(default)]
    pub structured: Option<Structured>,
    #[serde(default)]
    pub transcript_segments: Option<Vec<TranscriptSegment>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Structured {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptSegment {
    #[serde(default)]
    pub text: String,
}

impl MemoryPayload {
    /// The overview wins when present; otherwise the segments are joined
    /// with single spaces. Returns an empty string when neither has text.
    pub fn memory_text(&self) -> String {
        if let Some(overview) = self
            .structured
            .as_ref()
            .and_then(|s| s.overview.as_deref())
            .filter(|o| !o.is_empty())
        {
            return overview.to_string();
        }

        match &self.transcript_segments {
            Some(segments) if !segments.is_empty() => segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        }
    }
}

/// Relationship metadata pulled out of one memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    #[serde(default, deserialize_with = "null_as_default")]
    pub people: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emotions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_intent: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uid: String,
}

/// Current on-disk shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub structured_data: Insight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
}

/// Older on-disk shape: insight fields at the top level, no summary.
/// `people` must be present (it is what marks the shape) but may be null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub people: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emotions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_intent: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
}

/// Model output and old store files may carry explicit nulls.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One element of the store array, resolved at parse time.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StoredEntry {
    Current(Record),
    Legacy(LegacyRecord),
    Unrecognized(serde_json::Value),
}

impl StoredEntry {
    pub fn timestamp(&self) -> &str {
        match self {
            StoredEntry::Current(r) => &r.timestamp,
            StoredEntry::Legacy(r) => &r.timestamp,
            StoredEntry::Unrecognized(v) => v
                .get("timestamp")
                .and_then(|t| t.as_str())
                .unwrap_or(""),
        }
    }
}

/// Canonical display model for both record shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightView {
    pub formatted_time: String,
    pub short_date: String,
    pub summary: String,
    pub people: String,
    pub intent: String,
    pub emoji: &'static str,
    pub is_important: bool,
    pub legacy: bool,
}
