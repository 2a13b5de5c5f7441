// 采集状态 - 界面可见的单一状态

use serde::Serialize;

use crate::error::CaptureError;
use crate::storage::LocationRecord;

/// 采集流程状态
///
/// 除 Idle 外每个状态都带着当前展示的列表，失败不会清空已有列表
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaptureState {
    #[default]
    Idle,
    Loading {
        locations: Vec<LocationRecord>,
    },
    Ready {
        locations: Vec<LocationRecord>,
    },
    Error {
        error: CaptureError,
        locations: Vec<LocationRecord>,
    },
}

impl CaptureState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// 当前列表
    pub fn locations(&self) -> &[LocationRecord] {
        match self {
            Self::Idle => &[],
            Self::Loading { locations }
            | Self::Ready { locations }
            | Self::Error { locations, .. } => locations,
        }
    }

    pub fn error(&self) -> Option<&CaptureError> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// 需要展示给用户的错误信息
    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }

    /// 进入加载状态，保留当前列表
    pub(crate) fn into_loading(self) -> Self {
        match self {
            Self::Idle => Self::Loading {
                locations: Vec::new(),
            },
            Self::Loading { locations }
            | Self::Ready { locations }
            | Self::Error { locations, .. } => Self::Loading { locations },
        }
    }

    /// 进入失败状态，保留当前列表
    pub(crate) fn into_error(self, error: CaptureError) -> Self {
        match self {
            Self::Idle => Self::Error {
                error,
                locations: Vec::new(),
            },
            Self::Loading { locations }
            | Self::Ready { locations }
            | Self::Error { locations, .. } => Self::Error { error, locations },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> LocationRecord {
        LocationRecord {
            id,
            latitude: id as f64,
            longitude: -(id as f64),
        }
    }

    #[test]
    fn test_transitions_keep_list() {
        let ready = CaptureState::Ready {
            locations: vec![record(1), record(2)],
        };

        let loading = ready.into_loading();
        assert!(loading.is_loading());
        assert_eq!(loading.locations().len(), 2);

        let failed = loading.into_error(CaptureError::PermissionDenied);
        assert!(!failed.is_loading());
        assert_eq!(failed.locations().len(), 2);
        assert_eq!(
            failed.error_message().as_deref(),
            Some("Permission to access location was denied")
        );

        // 重试会清除错误
        let retry = failed.into_loading();
        assert_eq!(retry.error(), None);
    }

    #[test]
    fn test_idle_is_empty() {
        let state = CaptureState::default();
        assert!(state.locations().is_empty());
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), None);
    }
}
