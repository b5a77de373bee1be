//! In-memory implementation of the `AdminService` trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::db::Store;
use crate::models::platform::PLATFORMS;
use crate::models::{DownloadStatus, User, UserDownload};
use crate::plans::PlanTier;
use crate::services::admin_service::{
    AdminError, AdminService, AdminStats, DailyCount, UserPage,
};

const MAX_PAGE_SIZE: usize = 100;
const ACTIVE_WINDOW_DAYS: i64 = 30;
const DAILY_WINDOW_DAYS: i64 = 7;

pub struct MemoryAdminService {
    store: Store,
}

impl MemoryAdminService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn compute_stats(users: &[User], downloads: &[UserDownload], now: DateTime<Utc>) -> AdminStats {
    let active_since = now - Duration::days(ACTIVE_WINDOW_DAYS);
    let active: HashSet<&str> = downloads
        .iter()
        .filter(|d| d.download_date >= active_since)
        .map(|d| d.user_id.as_str())
        .collect();

    let mut by_platform: BTreeMap<&'static str, usize> =
        PLATFORMS.iter().map(|p| (p.as_str(), 0)).collect();
    let mut by_status: BTreeMap<&'static str, usize> =
        [DownloadStatus::Completed, DownloadStatus::Failed]
            .iter()
            .map(|s| (s.as_str(), 0))
            .collect();
    for d in downloads {
        *by_platform.entry(d.video.platform.as_str()).or_default() += 1;
        *by_status.entry(d.status.as_str()).or_default() += 1;
    }

    let today = now.date_naive();
    let downloads_by_day = (0..DAILY_WINDOW_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let count = downloads
                .iter()
                .filter(|d| d.download_date.date_naive() == date)
                .count();
            DailyCount { date, count }
        })
        .collect();

    AdminStats {
        total_users: users.len(),
        total_downloads: downloads.len(),
        active_users: users.iter().filter(|u| active.contains(u.id.as_str())).count(),
        premium_users: users.iter().filter(|u| u.plan != PlanTier::Free).count(),
        downloads_by_platform: by_platform,
        downloads_by_status: by_status,
        downloads_by_day,
    }
}

#[async_trait]
impl AdminService for MemoryAdminService {
    async fn stats(&self) -> AdminStats {
        let users = self.store.users().list().await;
        let downloads = self.store.downloads().all().await;
        compute_stats(&users, &downloads, Utc::now())
    }

    async fn list_users(&self, page: usize, limit: usize) -> Result<UserPage, AdminError> {
        if page == 0 {
            return Err(AdminError::Validation(
                "Page must be a positive integer".to_string(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AdminError::Validation(format!(
                "Limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let all = self.store.users().list().await;
        let total_count = all.len();
        let users = all
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        debug!(page, limit, total_count, "Listed users");

        Ok(UserPage {
            users,
            total_count,
            page,
            limit,
            total_pages: total_count.div_ceil(limit),
        })
    }

    async fn get_user(&self, id: &str) -> Result<User, AdminError> {
        self.store
            .users()
            .get_by_id(id)
            .await
            .ok_or_else(|| AdminError::UserNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::models::VideoInfo;
    use chrono::TimeZone;

    fn test_store() -> Store {
        Store::new(SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        })
    }

    async fn add_user(store: &Store, email: &str, plan: PlanTier) -> User {
        store
            .users()
            .create(email, "Admin Test", "password", plan)
            .await
            .unwrap()
            .unwrap()
    }

    fn download_at(
        user: &User,
        url: &str,
        at: DateTime<Utc>,
        status: DownloadStatus,
    ) -> UserDownload {
        let video = VideoInfo::from_url(url);
        let format = video.available_formats[0].clone();
        let mut d = UserDownload::completed(&user.id, video, format);
        d.download_date = at;
        d.status = status;
        d
    }

    #[tokio::test]
    async fn test_stats_counts_users_and_downloads() {
        let store = test_store();
        let free = add_user(&store, "free@example.com", PlanTier::Free).await;
        let pro = add_user(&store, "pro@example.com", PlanTier::Pro).await;
        add_user(&store, "idle@example.com", PlanTier::Unlimited).await;

        let now = Utc::now();
        for d in [
            download_at(&free, "https://youtube.com/watch?v=1", now, DownloadStatus::Completed),
            download_at(&free, "https://youtube.com/watch?v=2", now, DownloadStatus::Failed),
            download_at(&pro, "https://tiktok.com/@a/video/3", now, DownloadStatus::Completed),
        ] {
            store.downloads().insert(d).await;
        }

        let stats = MemoryAdminService::new(store).stats().await;
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_downloads, 3);
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.premium_users, 2);
        assert_eq!(stats.downloads_by_platform["YouTube"], 2);
        assert_eq!(stats.downloads_by_platform["TikTok"], 1);
        assert_eq!(stats.downloads_by_platform["Vimeo"], 0);
        assert_eq!(stats.downloads_by_platform.len(), PLATFORMS.len());
        assert_eq!(stats.downloads_by_status["completed"], 2);
        assert_eq!(stats.downloads_by_status["failed"], 1);
    }

    #[test]
    fn test_daily_window_and_activity() {
        let now = Utc.with_ymd_and_hms(2025, 4, 5, 12, 0, 0).unwrap();
        let user = User {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            name: "U1".to_string(),
            plan: PlanTier::Free,
            download_count: 0,
            registration_date: now,
        };
        let downloads = [
            download_at(&user, "https://vimeo.com/1", now, DownloadStatus::Completed),
            download_at(
                &user,
                "https://vimeo.com/2",
                now - Duration::days(6),
                DownloadStatus::Completed,
            ),
            download_at(
                &user,
                "https://vimeo.com/3",
                now - Duration::days(7),
                DownloadStatus::Completed,
            ),
        ];

        let stats = compute_stats(std::slice::from_ref(&user), &downloads, now);
        assert_eq!(stats.downloads_by_day.len(), 7);
        assert_eq!(
            stats.downloads_by_day[0].date,
            now.date_naive() - Duration::days(6)
        );
        assert_eq!(stats.downloads_by_day[0].count, 1);
        assert_eq!(stats.downloads_by_day[6].date, now.date_naive());
        assert_eq!(stats.downloads_by_day[6].count, 1);
        assert_eq!(stats.active_users, 1);

        let stale = compute_stats(
            std::slice::from_ref(&user),
            &downloads[2..],
            now + Duration::days(30),
        );
        assert_eq!(stale.active_users, 0);
    }

    #[tokio::test]
    async fn test_list_users_paginates() {
        let store = test_store();
        for n in 0..5 {
            add_user(&store, &format!("user{n}@example.com"), PlanTier::Free).await;
        }
        let service = MemoryAdminService::new(store);

        let first = service.list_users(1, 2).await.unwrap();
        assert_eq!(first.total_count, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.users.len(), 2);
        assert_eq!(first.users[0].email, "user0@example.com");

        let last = service.list_users(3, 2).await.unwrap();
        assert_eq!(last.users.len(), 1);
        assert_eq!(last.users[0].email, "user4@example.com");

        let past_end = service.list_users(9, 2).await.unwrap();
        assert!(past_end.users.is_empty());

        assert!(matches!(
            service.list_users(0, 10).await,
            Err(AdminError::Validation(_))
        ));
        assert!(matches!(
            service.list_users(1, 0).await,
            Err(AdminError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user() {
        let store = test_store();
        let user = add_user(&store, "find@example.com", PlanTier::Pro).await;
        let service = MemoryAdminService::new(store);

        assert_eq!(
            service.get_user(&user.id).await.unwrap().email,
            "find@example.com"
        );
        assert!(matches!(
            service.get_user("missing").await,
            Err(AdminError::UserNotFound(_))
        ));
    }
}
