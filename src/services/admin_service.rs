//! Domain service for the admin dashboard: aggregate counts and a
//! paginated view of every account.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::User;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    pub total_users: usize,

    pub total_downloads: usize,

    /// Users with at least one download in the last 30 days.
    pub active_users: usize,

    /// Users on any plan other than Free.
    pub premium_users: usize,

    /// Every known platform, zero counts included.
    pub downloads_by_platform: BTreeMap<&'static str, usize>,

    pub downloads_by_status: BTreeMap<&'static str, usize>,

    /// The last seven UTC days, oldest first, ending today.
    pub downloads_by_day: Vec<DailyCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total_count: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

#[async_trait::async_trait]
pub trait AdminService: Send + Sync {
    async fn stats(&self) -> AdminStats;

    /// Users in registration order. `page` starts at 1.
    async fn list_users(&self, page: usize, limit: usize) -> Result<UserPage, AdminError>;

    async fn get_user(&self, id: &str) -> Result<User, AdminError>;
}
