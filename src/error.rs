// 错误类型 - 位置采集流程对外暴露的错误分类
//
// 各协作组件内部使用 anyhow，只在流程边界翻译成这里的类型

use serde::Serialize;

/// 位置采集错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaptureError {
    /// 用户拒绝了定位权限
    #[error("Permission to access location was denied")]
    PermissionDenied,

    /// 获取定位失败或超时
    #[error("Location provider unavailable: {message}")]
    ProviderUnavailable { message: String },

    /// 写入位置记录失败
    #[error("Failed to save location: {message}")]
    StoreWriteFailure { message: String },

    /// 读取位置记录失败
    #[error("Failed to load locations: {message}")]
    StoreReadFailure { message: String },

    /// 已有采集正在进行
    #[error("A location capture is already in progress")]
    Busy,
}

/// 流程结果类型
pub type CaptureResult<T> = Result<T, CaptureError>;

impl CaptureError {
    pub fn provider_unavailable(msg: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            message: msg.into(),
        }
    }

    pub fn store_write(msg: impl Into<String>) -> Self {
        Self::StoreWriteFailure {
            message: msg.into(),
        }
    }

    pub fn store_read(msg: impl Into<String>) -> Self {
        Self::StoreReadFailure {
            message: msg.into(),
        }
    }
}
