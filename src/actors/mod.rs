// Actor模块 - 使用Actor模式管理并发状态
//
// 用消息传递替代Arc<Mutex<T>>，状态只由 Actor 自己修改

pub mod capture_state;

pub use capture_state::{CaptureStateActor, CaptureStateCommand, CaptureStateHandle};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaptureError;
    use crate::storage::LocationRecord;

    fn spawn_actor() -> CaptureStateHandle {
        let (actor, handle) = CaptureStateActor::new();

        // 在后台运行Actor
        tokio::spawn(async move {
            actor.run().await;
        });

        handle
    }

    #[tokio::test]
    async fn test_begin_rejects_second_caller() {
        let handle = spawn_actor();

        assert!(handle.begin().await, "第一次进入加载应成功");
        assert!(!handle.begin().await, "加载中再次进入应被拒绝");

        handle.complete(Vec::new()).await;
        assert!(handle.begin().await, "完成后可以再次进入");
    }

    #[tokio::test]
    async fn test_fail_keeps_previous_list() {
        let handle = spawn_actor();
        let record = LocationRecord {
            id: 1,
            latitude: 37.0,
            longitude: -122.0,
        };

        assert!(handle.begin().await);
        handle.complete(vec![record.clone()]).await;

        assert!(handle.begin().await);
        handle.fail(CaptureError::PermissionDenied).await;

        let state = handle.get().await;
        assert!(!state.is_loading());
        assert_eq!(state.locations(), &[record]);
        assert_eq!(state.error(), Some(&CaptureError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_abort_leaves_loading_only() {
        let handle = spawn_actor();
        let record = LocationRecord {
            id: 7,
            latitude: 1.0,
            longitude: 2.0,
        };

        assert!(handle.begin().await);
        handle.complete(vec![record.clone()]).await;

        // 非加载状态下取消不改变状态
        handle.abort();
        assert_eq!(
            handle.get().await,
            crate::capture::CaptureState::Ready {
                locations: vec![record.clone()]
            }
        );

        assert!(handle.begin().await);
        handle.abort();
        let state = handle.get().await;
        assert!(!state.is_loading(), "取消后应退出加载状态");
        assert_eq!(state.locations(), &[record]);
        assert!(handle.begin().await, "取消后可以再次进入");
    }

    #[tokio::test]
    async fn test_stopped_actor() {
        // 创建Actor但不运行，模拟Actor无响应
        let (actor, handle) = CaptureStateActor::new();
        drop(actor);

        assert!(!handle.begin().await, "停止的Actor不应允许进入加载");
        assert_eq!(handle.get().await, crate::capture::CaptureState::Idle);
    }
}
