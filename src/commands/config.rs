//! 配置管理命令
//!
//! 定位与数据库配置在下次启动时生效

use crate::models::{AppConfig, PersistedAppConfig};
use crate::AppState;
use tracing::info;

/// 获取应用配置
pub async fn get_app_config(state: &AppState) -> Result<PersistedAppConfig, String> {
    Ok(state.storage_domain.get_settings().get().await)
}

/// 更新配置
pub async fn update_config(
    state: &AppState,
    config: AppConfig,
) -> Result<PersistedAppConfig, String> {
    let updated_config = state
        .storage_domain
        .get_settings()
        .update(config.clone())
        .await
        .map_err(|e| e.to_string())?;

    if let Some(location) = config.location {
        info!(
            "定位配置已更新: {:?}, 超时 {} 秒（重启后生效）",
            location.source, location.fix_timeout_secs
        );
    }

    if let Some(database) = config.database {
        info!("数据库配置已更新: {:?}（重启后生效）", database);
    }

    Ok(updated_config)
}
