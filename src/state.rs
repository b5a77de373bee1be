use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AdminService, AuthService, DownloadService, MemoryAdminService, MemoryAuthService,
    MemoryDownloadService, MemoryVideoService, VideoService,
};

/// Services shared by the HTTP layer and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub video_service: Arc<dyn VideoService>,

    pub download_service: Arc<dyn DownloadService>,

    pub admin_service: Arc<dyn AdminService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store =
            Store::new(config.security.clone()).with_video_capacity(config.cache.video_capacity);

        let auth_service: Arc<dyn AuthService> = Arc::new(MemoryAuthService::new(
            store.clone(),
            config.security.min_password_length,
        ));
        let video_service: Arc<dyn VideoService> =
            Arc::new(MemoryVideoService::new(store.clone()));
        let download_service: Arc<dyn DownloadService> =
            Arc::new(MemoryDownloadService::new(store.clone()));
        let admin_service: Arc<dyn AdminService> =
            Arc::new(MemoryAdminService::new(store.clone()));

        if config.demo.enabled {
            let demo = &config.demo;
            let user = auth_service
                .ensure_user(&demo.email, &demo.name, &demo.password, demo.plan)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create demo user: {e}"))?;
            info!(email = %user.email, plan = %user.plan, "Demo user ready");
        }

        Ok(Self {
            config: Arc::new(config),
            store,
            auth_service,
            video_service,
            download_service,
            admin_service,
        })
    }
}
