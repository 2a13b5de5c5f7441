// 定位权限闸门
//
// 首次申请时询问用户一次，结果写入设置存储，之后直接返回已保存的决定

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::models::{PermissionStatus, LOCATION_PERMISSION_KEY};
use crate::settings::SettingsStore;

/// 权限询问接口
#[async_trait]
pub trait PermissionPrompt: Send + Sync {
    /// 询问用户是否允许访问位置，返回是否允许
    async fn ask(&self) -> Result<bool>;
}

/// 固定回答的询问器
pub struct FixedPrompt(pub bool);

#[async_trait]
impl PermissionPrompt for FixedPrompt {
    async fn ask(&self) -> Result<bool> {
        Ok(self.0)
    }
}

/// 权限闸门
pub struct PermissionGate {
    settings: Arc<dyn SettingsStore>,
    prompt: Arc<dyn PermissionPrompt>,
}

impl PermissionGate {
    pub fn new(settings: Arc<dyn SettingsStore>, prompt: Arc<dyn PermissionPrompt>) -> Self {
        Self { settings, prompt }
    }

    /// 当前保存的权限状态，不会触发询问
    pub async fn status(&self) -> Result<PermissionStatus> {
        Ok(self
            .settings
            .get_item(LOCATION_PERMISSION_KEY)
            .await?
            .map(|value| PermissionStatus::parse(&value))
            .unwrap_or(PermissionStatus::Undetermined))
    }

    /// 申请权限
    pub async fn request(&self) -> Result<PermissionStatus> {
        let current = self.status().await?;
        if current != PermissionStatus::Undetermined {
            return Ok(current);
        }

        let status = if self.prompt.ask().await? {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        info!("定位权限: {}", status.as_str());

        self.settings
            .set_item(LOCATION_PERMISSION_KEY, status.as_str())
            .await?;
        Ok(status)
    }
}
