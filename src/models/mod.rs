// 数据模型模块 - 定义配置与共享的数据结构

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// 重新导出其他模块的类型
pub use crate::storage::{DatabaseConfig, LocationRecord, NewLocation};

/// 深色模式偏好的存储键
pub const DARK_MODE_KEY: &str = "@darkMode";

/// 定位权限决定的存储键
pub const LOCATION_PERMISSION_KEY: &str = "@locationPermission";

/// 默认定位超时（秒）
pub const DEFAULT_FIX_TIMEOUT_SECS: u64 = 15;

/// 配置更新（仅包含需要修改的字段）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 定位配置
    pub location: Option<LocationSettings>,
    /// 数据库配置
    pub database: Option<DatabaseConfig>,
}

/// 持久化的应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedAppConfig {
    /// 键值偏好（深色模式、权限决定等）
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
    /// 定位配置
    #[serde(default)]
    pub location: LocationSettings,
    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// 定位设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSettings {
    /// 定位来源
    #[serde(default)]
    pub source: FixSourceConfig,
    /// 单次定位超时（秒）
    #[serde(default = "default_fix_timeout_secs")]
    pub fix_timeout_secs: u64,
}

fn default_fix_timeout_secs() -> u64 {
    DEFAULT_FIX_TIMEOUT_SECS
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            source: FixSourceConfig::default(),
            fix_timeout_secs: DEFAULT_FIX_TIMEOUT_SECS,
        }
    }
}

/// 定位来源配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FixSourceConfig {
    /// 固定坐标（开发调试用）
    #[serde(rename = "static")]
    Static { latitude: f64, longitude: f64 },
    /// gpsd 守护进程
    #[serde(rename = "gpsd")]
    Gpsd {
        host: String,
        #[serde(default = "default_gpsd_port")]
        port: u16,
    },
}

fn default_gpsd_port() -> u16 {
    crate::location::gpsd::GPSD_DEFAULT_PORT
}

impl Default for FixSourceConfig {
    fn default() -> Self {
        FixSourceConfig::Static {
            latitude: 37.0,
            longitude: -122.0,
        }
    }
}

/// 定位权限状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Undetermined => "undetermined",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Undetermined,
        }
    }
}
