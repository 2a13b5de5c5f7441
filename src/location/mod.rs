// 定位模块 - 权限申请与单次定位
//
// Geolocator 由权限闸门和定位来源组合而成，对采集流程只暴露 LocationProvider

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{FixSourceConfig, PermissionStatus};

pub mod gpsd;
pub mod permission;

pub use gpsd::GpsdFixSource;
pub use permission::{FixedPrompt, PermissionGate, PermissionPrompt};

/// 一次定位结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
}

/// 定位服务接口
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// 申请前台定位权限
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// 获取一次定位，调用方负责超时
    async fn get_fix(&self) -> Result<Fix>;
}

/// 定位来源接口
#[async_trait]
pub trait FixSource: Send + Sync {
    async fn current_fix(&self) -> Result<Fix>;
}

/// 固定坐标来源
pub struct StaticFixSource {
    fix: Fix,
}

impl StaticFixSource {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            fix: Fix {
                latitude,
                longitude,
            },
        }
    }
}

#[async_trait]
impl FixSource for StaticFixSource {
    async fn current_fix(&self) -> Result<Fix> {
        Ok(self.fix)
    }
}

/// 根据配置创建定位来源
pub fn fix_source_from_config(config: &FixSourceConfig) -> Arc<dyn FixSource> {
    match config {
        FixSourceConfig::Static {
            latitude,
            longitude,
        } => {
            info!("使用固定坐标定位: ({}, {})", latitude, longitude);
            Arc::new(StaticFixSource::new(*latitude, *longitude))
        }
        FixSourceConfig::Gpsd { host, port } => {
            info!("使用 gpsd 定位: {}:{}", host, port);
            Arc::new(GpsdFixSource::new(host.clone(), *port))
        }
    }
}

/// 定位器 - 权限闸门 + 定位来源
pub struct Geolocator {
    permission: PermissionGate,
    source: Arc<dyn FixSource>,
}

impl Geolocator {
    pub fn new(permission: PermissionGate, source: Arc<dyn FixSource>) -> Self {
        Self { permission, source }
    }
}

#[async_trait]
impl LocationProvider for Geolocator {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        self.permission.request().await
    }

    async fn get_fix(&self) -> Result<Fix> {
        self.source.current_fix().await
    }
}
