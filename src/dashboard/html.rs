use tera::{Context, Tera};

use crate::dashboard::DashboardStats;
use crate::types::InsightView;

const TEMPLATE_NAME: &str = "dashboard.html";

// The `.html` name turns on tera's autoescaping for every `{{ }}` below.
const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Social Intelligence Dashboard</title>
<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; background-color: #f5f5f7; }
h1 { color: #1d1d1f; font-size: 28px; margin-bottom: 20px; text-align: center; }
.header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; }
.logo { font-size: 24px; font-weight: bold; }
.last-updated, .timestamp, .stat-label { font-size: 14px; color: #666; }
.stats { display: flex; justify-content: space-around; margin-bottom: 20px; text-align: center; }
.stat-box { background-color: white; border-radius: 8px; padding: 15px; width: 30%; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1); }
.stat-number { font-size: 24px; font-weight: bold; color: #1d1d1f; margin-bottom: 5px; }
.insights-container { background-color: white; border-radius: 12px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); padding: 20px; margin-bottom: 30px; }
ul { list-style-type: none; padding: 0; margin: 0; }
li { border-bottom: 1px solid #e1e1e1; padding: 15px 0; position: relative; }
li:last-child { border-bottom: none; }
.summary { margin-bottom: 8px; font-size: 16px; }
.emoji { font-size: 24px; margin-right: 10px; }
.meta { display: flex; align-items: center; font-size: 14px; color: #666; }
.important { background-color: #fff9e6; border-left: 4px solid #ffcc00; padding-left: 15px; }
.tag { display: inline-block; background-color: #e1e1e1; border-radius: 12px; padding: 3px 8px; margin-right: 8px; font-size: 12px; }
.intent-tag { background-color: #e8f0fe; color: #1a73e8; }
.fire-icon { position: absolute; top: 15px; right: 15px; font-size: 20px; }
</style>
</head>
<body>
<div class="header">
  <div class="logo">📊 Social Intelligence</div>
  <div class="last-updated">Last updated: {{ last_updated }}</div>
</div>
<div class="stats">
  <div class="stat-box"><div class="stat-number">{{ stats.total }}</div><div class="stat-label">Total Memories</div></div>
  <div class="stat-box"><div class="stat-number">{{ stats.important }}</div><div class="stat-label">Important</div></div>
  <div class="stat-box"><div class="stat-number">{{ stats.unique_people }}</div><div class="stat-label">People</div></div>
</div>
<div class="insights-container">
  <h1>Recent Social Insights</h1>
  <ul>
{% for view in insights %}    <li class="{% if view.is_important %}important{% endif %}">
{% if view.is_important %}      <div class="fire-icon">🔥</div>
{% endif %}      <div class="timestamp">{{ view.formatted_time }}</div>
      <div class="summary"><span class="emoji">{{ view.emoji }}</span>{{ view.summary }}</div>
      <div class="meta"><span class="tag">👤 {{ view.people }}</span><span class="tag intent-tag">🎯 {{ view.intent }}</span></div>
    </li>
{% endfor %}  </ul>
</div>
</body>
</html>
"#;

/// Full dashboard page. Views are rendered in the order given.
pub fn render(
    views: &[InsightView],
    stats: &DashboardStats,
    last_updated: &str,
) -> Result<String, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;

    let mut context = Context::new();
    context.insert("insights", views);
    context.insert("stats", stats);
    context.insert("last_updated", last_updated);

    tera.render(TEMPLATE_NAME, &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(summary: &str, important: bool) -> InsightView {
        InsightView {
            formatted_time: "Jul 22, 2024 10:00 AM".into(),
            short_date: "Jul 22".into(),
            summary: summary.into(),
            people: "Sarah, Tom".into(),
            intent: "reconnect".into(),
            emoji: "😄",
            is_important: important,
            legacy: false,
        }
    }

    #[test]
    fn page_embeds_stats_and_items_in_order() {
        let views = vec![view("newest", true), view("older", false)];
        let stats = DashboardStats { total: 2, important: 1, unique_people: 2 };
        let page = render(&views, &stats, "Oct 18, 2026 09:00 AM").unwrap();

        assert!(page.contains(r#"<div class="stat-number">2</div><div class="stat-label">Total Memories</div>"#));
        assert!(page.contains(r#"<div class="stat-number">1</div><div class="stat-label">Important</div>"#));
        assert!(page.contains("Last updated: Oct 18, 2026 09:00 AM"));
        assert!(page.contains("👤 Sarah, Tom"));
        assert!(page.contains("🎯 reconnect"));
        assert!(page.contains(r#"<span class="emoji">😄</span>newest"#));
        assert!(page.find("newest").unwrap() < page.find("older").unwrap());
        assert_eq!(page.matches("fire-icon\">🔥").count(), 1);
        assert_eq!(page.matches(r#"<li class="important">"#).count(), 1);
    }

    #[test]
    fn model_text_is_escaped() {
        let mut hostile = view("<script>alert(1)</script> & more", false);
        hostile.people = "<b>Eve</b>".into();
        hostile.intent = "\"quoted\"".into();
        let stats = DashboardStats { total: 1, important: 0, unique_people: 1 };
        let page = render(&[hostile], &stats, "<now>").unwrap();

        assert!(!page.contains("<script>"));
        assert!(!page.contains("<b>Eve"));
        assert!(page.contains("&lt;script&gt;alert(1)"));
        assert!(page.contains("&amp; more"));
        assert!(page.contains("👤 &lt;b&gt;Eve"));
        assert!(page.contains("🎯 &quot;quoted&quot;"));
        assert!(page.contains("Last updated: &lt;now&gt;"));
    }

    #[test]
    fn empty_store_renders_zero_stats() {
        let stats = DashboardStats { total: 0, important: 0, unique_people: 0 };
        let page = render(&[], &stats, "now").unwrap();

        assert!(page.contains(r#"<div class="stat-number">0</div><div class="stat-label">People</div>"#));
        assert!(!page.contains("<li"));
    }
}
