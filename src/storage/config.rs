// 存储配置定义

use serde::{Deserialize, Serialize};

/// 数据库配置类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DatabaseConfig {
    /// SQLite 配置
    #[serde(rename = "sqlite")]
    SQLite {
        /// 数据库文件路径
        db_path: String,
    },
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig::SQLite {
            db_path: "data/location-base.db".to_string(),
        }
    }
}
