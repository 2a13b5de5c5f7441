// 存储模块 - 位置记录的持久化抽象层

// 子模块
pub mod config;
pub mod models;
pub mod repository;

// 重新导出主要类型
pub use config::DatabaseConfig;
pub use models::*;
pub use repository::LocationRepository;

// 重新导出具体实现
pub use repository::sqlite::SqliteRepository;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// 按配置打开位置记录库
///
/// 相对路径以应用数据目录为基准
pub async fn open_repository(
    config: &DatabaseConfig,
    app_dir: &Path,
) -> Result<Arc<dyn LocationRepository>> {
    match config {
        DatabaseConfig::SQLite { db_path } => {
            let path = app_dir.join(db_path);
            let repo: Arc<dyn LocationRepository> =
                Arc::new(SqliteRepository::new(&path.to_string_lossy()).await?);
            Ok(repo)
        }
    }
}
