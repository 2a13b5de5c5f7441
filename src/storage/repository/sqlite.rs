// SQLite 数据库实现

use super::LocationRepository;
use crate::storage::models::*;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

/// SQLite 数据库实现
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// 创建新的 SQLite 数据库连接
    pub async fn new(db_path: &str) -> Result<Self> {
        info!("初始化 SQLite 数据库: {}", db_path);

        // 确保数据库文件的目录存在
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        // ?mode=rwc 确保数据库文件不存在时自动创建
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .idle_timeout(std::time::Duration::from_secs(300))
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await?;

        let repo = Self { pool };

        // 初始化表结构
        repo.initialize_tables().await?;

        Ok(repo)
    }

    /// 获取连接池引用
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LocationRepository for SqliteRepository {
    async fn insert_location(&self, location: &NewLocation) -> Result<i64> {
        let result = sqlx::query("INSERT INTO locations (latitude, longitude) VALUES (?1, ?2)")
            .bind(location.latitude)
            .bind(location.longitude)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!("插入位置记录: id={}", id);
        Ok(id)
    }

    async fn get_all_locations(&self) -> Result<Vec<LocationRecord>> {
        let locations = sqlx::query_as::<_, LocationRecord>(
            r#"
            SELECT id, latitude, longitude
            FROM locations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    async fn count_locations(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn initialize_tables(&self) -> Result<()> {
        // AUTOINCREMENT 保证 id 不会被复用
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS locations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn db_type(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn open_temp_repo(dir: &tempfile::TempDir) -> SqliteRepository {
        let path = dir.path().join("nested").join("locations.db");
        SqliteRepository::new(&path.to_string_lossy()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_store() {
        let dir = tempdir().unwrap();
        let repo = open_temp_repo(&dir).await;

        assert!(repo.get_all_locations().await.unwrap().is_empty());
        assert_eq!(repo.count_locations().await.unwrap(), 0);
        assert_eq!(repo.db_type(), "sqlite");
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let dir = tempdir().unwrap();
        let repo = open_temp_repo(&dir).await;

        let first = repo
            .insert_location(&NewLocation {
                latitude: 37.0,
                longitude: -122.0,
            })
            .await
            .unwrap();
        let second = repo
            .insert_location(&NewLocation {
                latitude: -23.55,
                longitude: -46.63,
            })
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let all = repo.get_all_locations().await.unwrap();
        assert_eq!(
            all,
            vec![
                LocationRecord {
                    id: 1,
                    latitude: 37.0,
                    longitude: -122.0
                },
                LocationRecord {
                    id: 2,
                    latitude: -23.55,
                    longitude: -46.63
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let repo = open_temp_repo(&dir).await;
            repo.insert_location(&NewLocation {
                latitude: 1.5,
                longitude: 2.5,
            })
            .await
            .unwrap();
            repo.get_pool().close().await;
        }

        let repo = open_temp_repo(&dir).await;
        assert_eq!(repo.count_locations().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_coordinates_stored_verbatim() {
        let dir = tempdir().unwrap();
        let repo = open_temp_repo(&dir).await;

        // 超出常规范围的值也原样保存
        repo.insert_location(&NewLocation {
            latitude: 123.456789,
            longitude: -500.25,
        })
        .await
        .unwrap();

        let all = repo.get_all_locations().await.unwrap();
        assert_eq!(all[0].latitude, 123.456789);
        assert_eq!(all[0].longitude, -500.25);
    }

    #[tokio::test]
    async fn test_nan_coordinate_is_rejected() {
        let dir = tempdir().unwrap();
        let repo = open_temp_repo(&dir).await;

        // SQLite 把 NaN 绑定为 NULL，违反 NOT NULL 约束
        let result = repo
            .insert_location(&NewLocation {
                latitude: f64::NAN,
                longitude: 0.0,
            })
            .await;
        assert!(result.is_err());
        assert_eq!(repo.count_locations().await.unwrap(), 0);
    }
}
