use serde::Serialize;

use crate::error::AppError;
use crate::extract;
use crate::server::MemoryServer;
use crate::types::{Insight, MemoryPayload};

pub const NO_MEMORY_TEXT: &str = "No memory text found";

#[derive(Debug, Serialize)]
pub struct IngestOutcome {
    pub status: &'static str,
    pub extracted: Insight,
    pub summary: String,
}

impl MemoryServer {
    /// Extract, summarize and persist one memory. A failure before the
    /// append leaves the store untouched; the append itself is not undone.
    pub async fn do_ingest(
        &self,
        uid: &str,
        payload: &MemoryPayload,
        base_url: &str,
    ) -> Result<IngestOutcome, AppError> {
        let memory_text = payload.memory_text();
        if memory_text.trim().is_empty() {
            return Err(AppError::Validation(NO_MEMORY_TEXT.into()));
        }

        let mut extracted = extract::extract_insights(self.llm.as_ref(), &memory_text).await?;
        extracted.uid = uid.to_string();

        let summary = extract::generate_summary(self.llm.as_ref(), &extracted, &memory_text).await?;
        let flattened = summary.replace(['\r', '\n'], " ").trim().to_string();
        let with_link = format!(
            "{}\n\n👉 [View Social Intelligence Dashboard]({}/dashboard)",
            flattened, base_url
        );

        self.store.lock().await.append(extracted.clone(), flattened)?;
        tracing::info!(
            people = extracted.people.len(),
            emotions = extracted.emotions.len(),
            "memory stored"
        );

        Ok(IngestOutcome {
            status: "ok",
            extracted,
            summary: with_link,
        })
    }
}
