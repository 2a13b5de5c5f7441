// 外观领域管理器

use std::sync::Arc;
use crate::theme::ThemeController;

/// 外观领域管理器 - 负责深色模式
#[derive(Clone)]
pub struct AppearanceDomain {
    theme: Arc<ThemeController>,
}

impl AppearanceDomain {
    pub fn new(theme: Arc<ThemeController>) -> Self {
        Self { theme }
    }

    /// 获取主题控制器
    pub fn get_theme(&self) -> &Arc<ThemeController> {
        &self.theme
    }
}
