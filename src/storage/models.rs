// 数据模型定义 - 数据库实体结构

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// 获取当前本地时间（以 DateTime<Utc> 类型表示，但值为本地时间）
pub fn local_now() -> DateTime<Utc> {
    Local::now().naive_local().and_utc()
}

/// 位置记录
///
/// id 由数据库分配，单调递增且不会复用；记录写入后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LocationRecord {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// 待写入的位置
///
/// 坐标按定位结果原样保存，不做校验
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    /// 结合数据库分配的 id 生成完整记录
    pub fn with_id(self, id: i64) -> LocationRecord {
        LocationRecord {
            id,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
