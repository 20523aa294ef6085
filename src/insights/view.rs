use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::insights::{emoji_for, is_important};
use crate::types::{InsightView, StoredEntry};

pub const NO_PEOPLE: &str = "No people mentioned";
const UNKNOWN_INTENT: &str = "unknown";
/// Display format for record times and the dashboard's "last updated".
pub const DISPLAY_TIME_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Normalize either record shape into the display model. Entries of neither
/// shape yield `None`.
pub fn to_view(entry: &StoredEntry) -> Option<InsightView> {
    match entry {
        StoredEntry::Current(record) => {
            let data = &record.structured_data;
            let summary = match &record.human_summary {
                Some(s) => s.clone(),
                None => synthesize_summary(
                    &data.people,
                    &data.locations,
                    &data.emotions,
                    &data.social_intent,
                ),
            };
            // only a stored summary is scanned for intensity words
            let important =
                is_important(&data.emotions, record.human_summary.as_deref().unwrap_or(""));
            Some(build(
                &record.timestamp,
                &data.people,
                &data.emotions,
                &data.social_intent,
                summary,
                important,
                false,
            ))
        }
        StoredEntry::Legacy(record) => {
            let summary = synthesize_summary(
                &record.people,
                &record.locations,
                &record.emotions,
                &record.social_intent,
            );
            // no stored summary to scan, so only the emotion count counts
            Some(build(
                &record.timestamp,
                &record.people,
                &record.emotions,
                &record.social_intent,
                summary,
                is_important(&record.emotions, ""),
                true,
            ))
        }
        StoredEntry::Unrecognized(_) => None,
    }
}

fn build(
    timestamp: &str,
    people: &[String],
    emotions: &[String],
    intent: &str,
    summary: String,
    is_important: bool,
    legacy: bool,
) -> InsightView {
    let parsed = parse_timestamp(timestamp);
    let people = people.join(", ");

    InsightView {
        formatted_time: parsed
            .map(|t| t.format(DISPLAY_TIME_FORMAT).to_string())
            .unwrap_or_else(|| "Unknown time".into()),
        short_date: parsed
            .map(|t| t.format("%b %d").to_string())
            .unwrap_or_else(|| "Unknown".into()),
        summary,
        people: if people.is_empty() { NO_PEOPLE.into() } else { people },
        intent: if intent.is_empty() { UNKNOWN_INTENT.into() } else { intent.to_string() },
        emoji: emoji_for(emotions),
        is_important,
        legacy,
    }
}

fn synthesize_summary(
    people: &[String],
    locations: &[String],
    emotions: &[String],
    intent: &str,
) -> String {
    format!(
        "People: {} | Location: {} | Emotions: {} | Intent: {}",
        people.join(", "),
        locations.join(", "),
        emotions.join(", "),
        if intent.is_empty() { UNKNOWN_INTENT } else { intent },
    )
}

/// Accepts offset-qualified RFC 3339 as well as naive ISO-8601 date-times
/// and bare dates. Offset times keep their own wall-clock fields.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0));
    if parsed.is_none() {
        tracing::warn!(timestamp = raw, "unparseable record timestamp");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::{Insight, LegacyRecord, Record};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn current_record_view() {
        let entry = StoredEntry::Current(Record {
            structured_data: Insight {
                people: strings(&["Sarah", "Tom"]),
                locations: strings(&["Brooklyn"]),
                emotions: strings(&["excited"]),
                social_intent: "reconnect".into(),
                uid: "u1".into(),
            },
            human_summary: Some("A deeply warm catch-up".into()),
            timestamp: "2024-07-22T23:59:45.910559".into(),
        });

        let view = to_view(&entry).unwrap();
        assert_eq!(view.formatted_time, "Jul 22, 2024 11:59 PM");
        assert_eq!(view.short_date, "Jul 22");
        assert_eq!(view.people, "Sarah, Tom");
        assert_eq!(view.intent, "reconnect");
        assert_eq!(view.emoji, "😄");
        assert!(view.is_important);
        assert!(!view.legacy);
    }

    #[test]
    fn legacy_record_view_synthesizes_summary() {
        let entry = StoredEntry::Legacy(LegacyRecord {
            people: vec![],
            locations: strings(&["Paris"]),
            emotions: strings(&["very sad"]),
            social_intent: String::new(),
            timestamp: String::new(),
        });

        let view = to_view(&entry).unwrap();
        assert_eq!(
            view.summary,
            "People:  | Location: Paris | Emotions: very sad | Intent: unknown"
        );
        assert_eq!(view.people, NO_PEOPLE);
        assert_eq!(view.intent, "unknown");
        assert_eq!(view.formatted_time, "Unknown time");
        assert_eq!(view.emoji, "😢");
        assert!(!view.is_important, "legacy importance ignores summary words");
        assert!(view.legacy);
    }

    #[test]
    fn current_record_without_summary_gets_one() {
        let entry: StoredEntry = serde_json::from_value(serde_json::json!({
            "structured_data": {"people": ["Ana"], "emotions": ["curious"], "social_intent": "bonding"},
            "timestamp": "2024-03-01T09:05:00"
        }))
        .unwrap();

        let view = to_view(&entry).unwrap();
        assert!(view.summary.starts_with("People: Ana |"));
        assert_eq!(view.formatted_time, "Mar 01, 2024 09:05 AM");
    }

    #[test]
    fn synthesized_summary_does_not_count_toward_importance() {
        let entry: StoredEntry = serde_json::from_value(serde_json::json!({
            "structured_data": {"emotions": ["very happy"]},
            "timestamp": "2024-03-01T09:05:00"
        }))
        .unwrap();

        let view = to_view(&entry).unwrap();
        assert!(view.summary.contains("very happy"));
        assert!(!view.is_important);
    }

    #[test]
    fn current_record_with_null_intent_still_renders() {
        let entries: Vec<StoredEntry> = serde_json::from_value(serde_json::json!([
            {"structured_data": {"people": ["Ana"], "social_intent": null}, "human_summary": "s"}
        ]))
        .unwrap();

        let view = to_view(&entries[0]).expect("view");
        assert_eq!(view.intent, "unknown");
        assert_eq!(view.people, "Ana");
    }

    #[test]
    fn unrecognized_entries_have_no_view() {
        let entry = StoredEntry::Unrecognized(serde_json::json!({"x": 1}));
        assert!(to_view(&entry).is_none());
    }

    #[test]
    fn timestamp_formats() {
        assert!(parse_timestamp("2024-07-22T23:59:45.910559+00:00").is_some());
        assert!(parse_timestamp("2024-07-22T23:59:45").is_some());
        assert!(parse_timestamp("2024-07-22 23:59:45").is_some());
        assert!(parse_timestamp("2024-07-22").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn invalid_timestamp_is_unknown_time() {
        let entry = StoredEntry::Legacy(LegacyRecord {
            people: strings(&["Tom"]),
            locations: vec![],
            emotions: vec![],
            social_intent: "argument".into(),
            timestamp: "last tuesday".into(),
        });
        let view = to_view(&entry).unwrap();
        assert_eq!(view.formatted_time, "Unknown time");
        assert_eq!(view.short_date, "Unknown");
    }
}
