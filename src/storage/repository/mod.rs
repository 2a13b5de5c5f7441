// Repository 抽象层 - 定义位置记录的数据库操作接口

pub mod sqlite;

use super::models::*;
use anyhow::Result;
use async_trait::async_trait;

/// 数据库操作接口 - 所有数据库实现必须实现此 trait
///
/// 记录只追加，不提供更新或删除
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// 插入一条位置记录，返回分配的 id
    async fn insert_location(&self, location: &NewLocation) -> Result<i64>;

    /// 按插入顺序获取全部位置记录
    async fn get_all_locations(&self) -> Result<Vec<LocationRecord>>;

    /// 统计位置记录数量
    async fn count_locations(&self) -> Result<i64>;

    /// 初始化数据库表结构
    async fn initialize_tables(&self) -> Result<()>;

    /// 获取数据库类型标识
    fn db_type(&self) -> &str;
}
