use crate::insights;
use crate::types::StoredEntry;

/// How many store entries the voice-app view looks at.
pub const RECENT_LIMIT: usize = 5;

/// Plain-text digest for callers that can only display text. Only the
/// `RECENT_LIMIT` newest entries are considered; legacy and unrecognized
/// ones among them are skipped rather than replaced by older records.
pub fn render(entries: &[StoredEntry], base_url: &str) -> String {
    let mut lines = String::new();
    let recent = entries
        .iter()
        .take(RECENT_LIMIT)
        .filter_map(insights::to_view)
        .filter(|view| !view.legacy);

    for view in recent {
        let marker = if view.is_important { "🔥 " } else { "" };
        lines.push_str(&format!(
            "{}{} {}: {}\n\n",
            marker, view.emoji, view.short_date, view.summary
        ));
    }

    format!(
        "📊 Social Intelligence Dashboard\n\nRecent Insights:\n\n{}\n\nView full dashboard: {}/dashboard\n",
        lines, base_url
    )
}
