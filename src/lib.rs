// 位置记录应用 - 主库

// 声明模块
pub mod actors;
pub mod app;
pub mod capture;
pub mod commands;
pub mod domains;
pub mod error;
pub mod event_bus;
pub mod location;
pub mod logger;
pub mod models;
pub mod settings;
pub mod storage;
pub mod theme;
pub mod utils;

use std::sync::Arc;

use domains::{AppearanceDomain, CaptureDomain, StorageDomain};
use event_bus::EventBus;

pub use app::run;
pub use error::{CaptureError, CaptureResult};

/// 应用状态（按领域分组）
///
/// - 采集领域：负责位置采集流程
/// - 存储领域：负责记录库和设置
/// - 外观领域：负责深色模式
/// - 事件总线：用于领域与界面间通知
#[derive(Clone)]
pub struct AppState {
    /// 采集领域管理器
    pub capture_domain: Arc<CaptureDomain>,
    /// 存储领域管理器
    pub storage_domain: Arc<StorageDomain>,
    /// 外观领域管理器
    pub appearance_domain: Arc<AppearanceDomain>,
    /// 事件总线
    pub event_bus: Arc<EventBus>,
}
