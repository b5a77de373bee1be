//! In-memory implementation of the `DownloadService` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::db::Store;
use crate::models::UserDownload;
use crate::policy::{self, DownloadDecision};
use crate::services::download_service::{
    DownloadError, DownloadFilter, DownloadPage, DownloadService, QuotaUsage,
};

const MAX_PAGE_SIZE: usize = 100;

/// Start of the current quota period: midnight UTC today.
#[must_use]
pub fn quota_period_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |midnight| midnight.and_utc())
}

pub struct MemoryDownloadService {
    store: Store,
}

impl MemoryDownloadService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn record_decision(decision: DownloadDecision) {
    let (outcome, reason) = match decision {
        DownloadDecision::Allowed => ("allowed", "none"),
        DownloadDecision::Denied(reason) => ("denied", reason.as_str()),
    };
    metrics::counter!(
        "download_decisions_total",
        "decision" => outcome,
        "reason" => reason
    )
    .increment(1);
}

#[async_trait]
impl DownloadService for MemoryDownloadService {
    async fn download(
        &self,
        user_id: &str,
        video_id: &str,
        format_id: &str,
    ) -> Result<UserDownload, DownloadError> {
        if self.store.users().get_by_id(user_id).await.is_none() {
            return Err(DownloadError::UserNotFound);
        }

        let video = self
            .store
            .videos()
            .get(video_id)
            .await
            .ok_or_else(|| DownloadError::VideoNotFound(video_id.to_string()))?;

        let format = video
            .find_format(format_id)
            .cloned()
            .ok_or_else(|| DownloadError::FormatNotFound(format_id.to_string()))?;

        let since = quota_period_start(Utc::now());
        let users = self.store.users();

        // The plan is read after the history lock is taken, so a concurrent
        // plan change is seen by whichever attempt decides next.
        let record = self
            .store
            .downloads()
            .record_if(user_id, since, |used| async move {
                let tier = users
                    .get_by_id(user_id)
                    .await
                    .ok_or(DownloadError::UserNotFound)?
                    .plan;

                let decision = policy::evaluate(tier, used, format.quality);
                record_decision(decision);

                match decision {
                    DownloadDecision::Allowed => {
                        Ok(UserDownload::completed(user_id, video, format))
                    }
                    DownloadDecision::Denied(reason) => {
                        debug!(
                            user_id,
                            plan = %tier,
                            used,
                            quality = %format.quality,
                            reason = reason.as_str(),
                            "Download denied"
                        );
                        Err(DownloadError::Denied { tier, reason })
                    }
                }
            })
            .await?;

        self.store.users().increment_download_count(user_id).await;

        info!(
            user_id,
            download_id = %record.id,
            video_id,
            quality = %record.format.quality,
            "Download recorded"
        );

        Ok(record)
    }

    async fn list(
        &self,
        user_id: &str,
        filter: DownloadFilter,
    ) -> Result<DownloadPage, DownloadError> {
        if filter.page == 0 {
            return Err(DownloadError::Validation(
                "Page must be a positive integer".to_string(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&filter.limit) {
            return Err(DownloadError::Validation(format!(
                "Limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let matching: Vec<UserDownload> = self
            .store
            .downloads()
            .list(user_id)
            .await
            .into_iter()
            .filter(|d| filter.platform.is_none_or(|p| d.video.platform == p))
            .filter(|d| filter.status.is_none_or(|s| d.status == s))
            .collect();

        let total = matching.len();
        let downloads = matching
            .into_iter()
            .skip((filter.page - 1).saturating_mul(filter.limit))
            .take(filter.limit)
            .collect();

        Ok(DownloadPage {
            downloads,
            total,
            page: filter.page,
            limit: filter.limit,
        })
    }

    async fn delete(&self, user_id: &str, download_id: &str) -> Result<(), DownloadError> {
        if self.store.downloads().remove(user_id, download_id).await {
            info!(user_id, download_id, "Download record deleted");
            Ok(())
        } else {
            Err(DownloadError::NotFound(download_id.to_string()))
        }
    }

    async fn usage(&self, user_id: &str) -> Result<QuotaUsage, DownloadError> {
        let user = self
            .store
            .users()
            .get_by_id(user_id)
            .await
            .ok_or(DownloadError::UserNotFound)?;

        let used = self
            .store
            .downloads()
            .count_since(user_id, quota_period_start(Utc::now()))
            .await;
        let limits = user.plan.limits();

        Ok(QuotaUsage {
            plan: user.plan,
            downloads_today: used,
            limit: limits.download_limit,
            remaining: limits.download_limit.remaining(used),
            quality_ceiling: limits.quality_ceiling,
        })
    }
}
