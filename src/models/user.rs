use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plans::PlanTier;

/// Account data safe to hand to clients. Credentials stay in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    pub email: String,

    pub name: String,

    pub plan: PlanTier,

    /// Lifetime count of completed downloads.
    pub download_count: u64,

    pub registration_date: DateTime<Utc>,
}
