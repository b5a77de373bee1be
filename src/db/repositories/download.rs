use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::UserDownload;

/// Per-user download history, newest first.
#[derive(Clone, Default)]
pub struct DownloadRepository {
    history: Arc<RwLock<HashMap<String, Vec<UserDownload>>>>,
}

impl DownloadRepository {
    /// Counts the user's completed downloads on or after `since`, hands the
    /// count to `decide`, and stores whatever record it resolves to. The
    /// count, the decision and the insert all happen under one write lock, so
    /// concurrent attempts cannot both take the last slot.
    pub async fn record_if<E, F, Fut>(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
        decide: F,
    ) -> Result<UserDownload, E>
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<UserDownload, E>>,
    {
        let mut history = self.history.write().await;
        let entries = history.entry(user_id.to_string()).or_default();

        let used = count_since(entries, since);
        let record = decide(used).await?;
        entries.insert(0, record.clone());

        Ok(record)
    }

    pub async fn insert(&self, record: UserDownload) {
        let mut history = self.history.write().await;
        let entries = history.entry(record.user_id.clone()).or_default();
        let pos = entries
            .iter()
            .position(|d| d.download_date <= record.download_date)
            .unwrap_or(entries.len());
        entries.insert(pos, record);
    }

    pub async fn list(&self, user_id: &str) -> Vec<UserDownload> {
        self.history
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn count_since(&self, user_id: &str, since: DateTime<Utc>) -> u32 {
        self.history
            .read()
            .await
            .get(user_id)
            .map_or(0, |entries| count_since(entries, since))
    }

    /// Every user's history, flattened. Order across users is unspecified.
    pub async fn all(&self) -> Vec<UserDownload> {
        self.history
            .read()
            .await
            .values()
            .flat_map(|entries| entries.iter().cloned())
            .collect()
    }

    /// Removes a record. Returns `false` if the user has no such download.
    pub async fn remove(&self, user_id: &str, download_id: &str) -> bool {
        let mut history = self.history.write().await;
        let Some(entries) = history.get_mut(user_id) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|d| d.id != download_id);
        entries.len() != before
    }
}

fn count_since(entries: &[UserDownload], since: DateTime<Utc>) -> u32 {
    let count = entries.iter().filter(|d| d.counts_toward_quota(since)).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
