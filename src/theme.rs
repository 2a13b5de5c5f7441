// 主题模块 - 深色模式开关与两套固定配色
//
// 界面主题只由内存中的开关决定，设置存储只是它的后写缓存

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::event_bus::{AppEvent, EventBus};
use crate::models::DARK_MODE_KEY;
use crate::settings::SettingsStore;

/// 配色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: &'static str,
    pub on_primary: &'static str,
    pub primary_container: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub on_background: &'static str,
    pub surface: &'static str,
    pub on_surface: &'static str,
    pub error: &'static str,
    pub outline: &'static str,
}

impl Palette {
    /// 浅色配色（Material 3 基线）
    pub const LIGHT: Palette = Palette {
        primary: "#6750A4",
        on_primary: "#FFFFFF",
        primary_container: "#EADDFF",
        secondary: "#625B71",
        background: "#FFFBFE",
        on_background: "#1C1B1F",
        surface: "#FFFBFE",
        on_surface: "#1C1B1F",
        error: "#B3261E",
        outline: "#79747E",
    };

    /// 深色配色（Material 3 基线）
    pub const DARK: Palette = Palette {
        primary: "#D0BCFF",
        on_primary: "#381E72",
        primary_container: "#4F378B",
        secondary: "#CCC2DC",
        background: "#1C1B1F",
        on_background: "#E6E1E5",
        surface: "#1C1B1F",
        on_surface: "#E6E1E5",
        error: "#F2B8B5",
        outline: "#938F99",
    };
}

/// 当前主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub dark: bool,
    pub colors: Palette,
}

impl Theme {
    pub fn for_mode(dark: bool) -> Self {
        Self {
            dark,
            colors: if dark { Palette::DARK } else { Palette::LIGHT },
        }
    }
}

/// 切换结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub theme: Theme,
    /// 新值是否已写入设置存储
    pub persisted: bool,
}

/// 主题控制器
pub struct ThemeController {
    settings: Arc<dyn SettingsStore>,
    event_bus: Arc<EventBus>,
    dark_mode: RwLock<bool>,
    /// 串行化设置写入
    write_order: Mutex<()>,
}

impl ThemeController {
    pub fn new(settings: Arc<dyn SettingsStore>, event_bus: Arc<EventBus>) -> Self {
        Self {
            settings,
            event_bus,
            dark_mode: RwLock::new(false),
            write_order: Mutex::new(()),
        }
    }

    /// 从设置存储读取深色模式
    ///
    /// 读取失败只记录日志，保持默认的浅色
    pub async fn load_dark_mode(&self) -> bool {
        match self.settings.get_item(DARK_MODE_KEY).await {
            Ok(Some(value)) => {
                let dark = value == "true";
                *self.dark_mode.write().await = dark;
                info!("已加载深色模式设置: {}", dark);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("加载深色模式失败: {}", e);
            }
        }
        self.is_dark_mode().await
    }

    pub async fn is_dark_mode(&self) -> bool {
        *self.dark_mode.read().await
    }

    pub async fn current_theme(&self) -> Theme {
        Theme::for_mode(self.is_dark_mode().await)
    }

    /// 切换深色模式
    ///
    /// 先更新内存并通知界面，再写入设置；写入失败只告警，内存中的值不回滚
    ///
    /// 写入逐个进行，每次写入的是拿到写锁时内存中的值，
    /// 连续切换时最后完成的写入总是与内存一致
    pub async fn toggle_dark_mode(&self) -> ToggleOutcome {
        let dark = {
            let mut flag = self.dark_mode.write().await;
            *flag = !*flag;
            *flag
        };
        self.event_bus.publish(AppEvent::ThemeChanged { dark_mode: dark });

        let _order = self.write_order.lock().await;
        let current = *self.dark_mode.read().await;
        let persisted = match self
            .settings
            .set_item(DARK_MODE_KEY, if current { "true" } else { "false" })
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!("保存深色模式失败: {}", e);
                false
            }
        };

        ToggleOutcome {
            theme: Theme::for_mode(dark),
            persisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsManager;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;
    use tempfile::tempdir;

    /// 读写都失败的设置存储
    struct UnavailableStore;

    #[async_trait]
    impl SettingsStore for UnavailableStore {
        async fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("storage offline"))
        }

        async fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("storage offline"))
        }
    }

    /// 写入 "true" 较慢的内存存储
    #[derive(Default)]
    struct SlowDarkWrites {
        items: std::sync::Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl SettingsStore for SlowDarkWrites {
        async fn get_item(&self, key: &str) -> Result<Option<String>> {
            Ok(self.items.lock().unwrap().get(key).cloned())
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<()> {
            if value == "true" {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.items
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_theme_is_pure_function_of_flag() {
        assert_eq!(Theme::for_mode(true).colors, Palette::DARK);
        assert_eq!(Theme::for_mode(false).colors, Palette::LIGHT);
        assert_ne!(Palette::DARK, Palette::LIGHT);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_and_persists() {
        let dir = tempdir().unwrap();
        let settings = Arc::new(
            SettingsManager::new(dir.path().join("settings.json"))
                .await
                .unwrap(),
        );
        let controller = ThemeController::new(settings.clone(), Arc::new(EventBus::new(8)));
        let original = controller.load_dark_mode().await;
        assert!(!original, "未保存时默认浅色");

        let first = controller.toggle_dark_mode().await;
        assert!(first.persisted);
        assert!(first.theme.dark);
        assert_eq!(
            settings.get_item(DARK_MODE_KEY).await.unwrap().as_deref(),
            Some("true")
        );

        let second = controller.toggle_dark_mode().await;
        assert_eq!(second.theme.dark, original);
        assert_eq!(
            settings.get_item(DARK_MODE_KEY).await.unwrap().as_deref(),
            Some("false")
        );
    }

    #[tokio::test]
    async fn test_load_persisted_dark_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        {
            let settings = SettingsManager::new(path.clone()).await.unwrap();
            settings.set_item(DARK_MODE_KEY, "true").await.unwrap();
        }

        let settings = Arc::new(SettingsManager::new(path).await.unwrap());
        let controller = ThemeController::new(settings, Arc::new(EventBus::new(8)));
        assert!(controller.load_dark_mode().await);
        assert_eq!(controller.current_theme().await.colors, Palette::DARK);
    }

    #[tokio::test]
    async fn test_store_failures_are_not_fatal() {
        let bus = Arc::new(EventBus::new(8));
        let mut events = bus.subscribe();
        let controller = ThemeController::new(Arc::new(UnavailableStore), bus);

        assert!(!controller.load_dark_mode().await);

        let outcome = controller.toggle_dark_mode().await;
        assert!(!outcome.persisted, "写入失败应能被观察到");
        assert!(controller.is_dark_mode().await, "内存中的值不回滚");

        match events.try_recv() {
            Ok(AppEvent::ThemeChanged { dark_mode }) => assert!(dark_mode),
            other => panic!("未收到主题事件: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overlapping_toggles_store_final_value() {
        let settings = Arc::new(SlowDarkWrites::default());
        let controller = Arc::new(ThemeController::new(
            settings.clone(),
            Arc::new(EventBus::new(8)),
        ));

        // 第一次切换的写入还没完成时再切换一次
        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.toggle_dark_mode().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = controller.toggle_dark_mode().await;
        let first = first.await.unwrap();

        assert!(first.theme.dark);
        assert!(!second.theme.dark);
        assert!(first.persisted && second.persisted);
        assert!(!controller.is_dark_mode().await);
        assert_eq!(
            settings.get_item(DARK_MODE_KEY).await.unwrap().as_deref(),
            Some("false"),
            "存储中的值应与内存一致"
        );
    }
}
