//! 文件系统路径工具
//!
//! 提供跨平台的应用数据目录与日志目录

use std::path::PathBuf;

/// 应用目录名
pub const APP_DIR_NAME: &str = "location-base";

/// 覆盖数据目录的环境变量
pub const APP_HOME_ENV: &str = "LOCATION_BASE_HOME";

/// 获取应用数据目录（跨平台）
///
/// - 设置了 `LOCATION_BASE_HOME` 时直接使用
/// - macOS: ~/Library/Application Support/location-base
/// - Windows: %APPDATA%/location-base
/// - Linux: ~/.local/share/location-base
pub fn get_app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(APP_HOME_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_DIR_NAME)
    } else if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join(APP_DIR_NAME)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".local/share").join(APP_DIR_NAME)
    }
}

/// 获取日志目录路径
pub fn get_log_dir() -> PathBuf {
    get_app_data_dir().join("logs")
}

