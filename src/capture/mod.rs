// 采集模块 - 位置采集流程
//
// 一次采集：申请权限 -> 单次定位 -> 写入记录 -> 重新读取全部记录
// 加载中再次触发直接返回 Busy，不排队

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::actors::CaptureStateHandle;
use crate::error::{CaptureError, CaptureResult};
use crate::event_bus::{AppEvent, EventBus};
use crate::location::LocationProvider;
use crate::models::PermissionStatus;
use crate::storage::{local_now, LocationRecord, LocationRepository, NewLocation};

pub mod state;

pub use state::CaptureState;

/// 位置采集流程
pub struct CaptureFlow {
    provider: Arc<dyn LocationProvider>,
    repository: Arc<dyn LocationRepository>,
    state: CaptureStateHandle,
    event_bus: Arc<EventBus>,
    fix_timeout: Duration,
}

impl CaptureFlow {
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        repository: Arc<dyn LocationRepository>,
        state: CaptureStateHandle,
        event_bus: Arc<EventBus>,
        fix_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            repository,
            state,
            event_bus,
            fix_timeout,
        }
    }

    /// 当前状态快照
    pub async fn snapshot(&self) -> CaptureState {
        self.state.get().await
    }

    /// 采集一次当前位置并保存
    ///
    /// 成功时返回新记录，状态中的列表已整体刷新
    pub async fn capture_location(&self) -> CaptureResult<LocationRecord> {
        if !self.state.begin().await {
            return Err(CaptureError::Busy);
        }
        let guard = LoadingGuard::new(&self.state);
        self.event_bus.publish(AppEvent::CaptureStarted);

        let result = match self.run_capture().await {
            Ok((record, locations)) => {
                let count = locations.len();
                self.state.complete(locations).await;
                self.event_bus.publish(AppEvent::LocationCaptured {
                    record: record.clone(),
                    timestamp: local_now(),
                });
                self.event_bus.publish(AppEvent::LocationsLoaded { count });
                Ok(record)
            }
            Err(error) => {
                warn!("位置采集失败: {}", error);
                self.state.fail(error.clone()).await;
                self.event_bus.publish(AppEvent::CaptureFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        };
        guard.finish();
        result
    }

    async fn run_capture(&self) -> CaptureResult<(LocationRecord, Vec<LocationRecord>)> {
        let status = self
            .provider
            .request_permission()
            .await
            .map_err(|e| CaptureError::provider_unavailable(e.to_string()))?;
        if status != PermissionStatus::Granted {
            return Err(CaptureError::PermissionDenied);
        }

        let fix = match tokio::time::timeout(self.fix_timeout, self.provider.get_fix()).await {
            Ok(Ok(fix)) => fix,
            Ok(Err(e)) => return Err(CaptureError::provider_unavailable(e.to_string())),
            Err(_) => {
                return Err(CaptureError::provider_unavailable(format!(
                    "定位超时 ({:?})",
                    self.fix_timeout
                )))
            }
        };

        let location = NewLocation {
            latitude: fix.latitude,
            longitude: fix.longitude,
        };
        let id = self
            .repository
            .insert_location(&location)
            .await
            .map_err(|e| CaptureError::store_write(e.to_string()))?;
        info!("位置已保存: id={}", id);

        let locations = self
            .repository
            .get_all_locations()
            .await
            .map_err(|e| CaptureError::store_read(e.to_string()))?;

        Ok((location.with_id(id), locations))
    }

    /// 重新读取全部位置记录
    pub async fn load_locations(&self) -> CaptureResult<Vec<LocationRecord>> {
        if !self.state.begin().await {
            return Err(CaptureError::Busy);
        }
        let guard = LoadingGuard::new(&self.state);

        let result = match self.repository.get_all_locations().await {
            Ok(locations) => {
                let count = locations.len();
                self.state.complete(locations.clone()).await;
                self.event_bus.publish(AppEvent::LocationsLoaded { count });
                info!("已加载 {} 条位置记录", count);
                Ok(locations)
            }
            Err(e) => {
                let error = CaptureError::store_read(e.to_string());
                warn!("读取位置记录失败: {}", error);
                self.state.fail(error.clone()).await;
                self.event_bus.publish(AppEvent::CaptureFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        };
        guard.finish();
        result
    }
}

/// 加载状态守卫
///
/// 流程的 future 在结束前被丢弃时，把状态从 Loading 复位，避免之后一直返回 Busy
struct LoadingGuard<'a> {
    state: &'a CaptureStateHandle,
    finished: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a CaptureStateHandle) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    /// 流程已把最终状态交给 Actor
    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("采集流程被取消，复位加载状态");
            self.state.abort();
        }
    }
}
