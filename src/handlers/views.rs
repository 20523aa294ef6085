use chrono::Local;

use crate::dashboard::{self, condensed, html};
use crate::error::AppError;
use crate::insights::view::DISPLAY_TIME_FORMAT;
use crate::server::MemoryServer;
use crate::types::InsightView;

impl MemoryServer {
    async fn load_views(&self) -> Result<Vec<InsightView>, AppError> {
        let entries = self.store.lock().await.load_all()?;
        Ok(dashboard::build_views(&entries))
    }

    pub async fn do_dashboard(&self) -> Result<String, AppError> {
        let views = self.load_views().await?;
        let stats = dashboard::compute_stats(&views);
        let last_updated = Local::now().format(DISPLAY_TIME_FORMAT).to_string();
        Ok(html::render(&views, &stats, &last_updated)?)
    }

    pub async fn do_condensed(&self, base_url: &str) -> Result<String, AppError> {
        let entries = self.store.lock().await.load_all()?;
        Ok(condensed::render(&entries, base_url))
    }
}
