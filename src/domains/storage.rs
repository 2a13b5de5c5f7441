// 存储领域管理器
//
// 负责位置记录库和设置管理

use std::sync::Arc;
use crate::settings::SettingsManager;
use crate::storage::LocationRepository;

/// 存储领域管理器 - 负责记录库和设置
#[derive(Clone)]
pub struct StorageDomain {
    repository: Arc<dyn LocationRepository>,
    settings: Arc<SettingsManager>,
}

impl StorageDomain {
    /// 创建新的存储领域管理器
    pub fn new(repository: Arc<dyn LocationRepository>, settings: Arc<SettingsManager>) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// 获取位置记录库
    pub fn get_repository(&self) -> &Arc<dyn LocationRepository> {
        &self.repository
    }

    /// 获取设置管理器
    pub fn get_settings(&self) -> &Arc<SettingsManager> {
        &self.settings
    }
}
