// 事件总线 - 采集流程与界面之间的通知通道
//
// 每次状态转换后发布事件，界面只读取，不回写状态

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use crate::error::CaptureError;
use crate::storage::LocationRecord;

/// 应用事件枚举 - 定义所有可能的系统事件
#[derive(Debug, Clone)]
pub enum AppEvent {
    // --- 采集事件 ---

    /// 采集开始事件
    CaptureStarted,

    /// 位置已保存事件
    LocationCaptured {
        record: LocationRecord,
        timestamp: DateTime<Utc>,
    },

    /// 采集失败事件
    CaptureFailed {
        error: CaptureError,
    },

    /// 位置列表已刷新事件
    LocationsLoaded {
        count: usize,
    },

    // --- 外观事件 ---

    /// 深色模式切换事件
    ThemeChanged {
        dark_mode: bool,
    },
}

/// 事件总线 - 用于模块间解耦通信
///
/// 使用 broadcast channel 实现发布/订阅模式
/// 支持多个订阅者同时接收事件
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// 创建新的事件总线
    ///
    /// # 参数
    /// - `capacity`: 事件缓冲区大小,建议 100-1000
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// 发布事件
    ///
    /// 如果没有订阅者,事件会被丢弃(这是正常的)
    pub fn publish(&self, event: AppEvent) {
        match self.sender.send(event) {
            Ok(receiver_count) => {
                tracing::trace!("事件已发布，订阅者数量: {}", receiver_count);
            }
            Err(_) => {
                // 没有订阅者,忽略错误
                tracing::trace!("事件已发布但无订阅者");
            }
        }
    }

    /// 订阅事件
    ///
    /// 返回一个接收器,可以用 `.recv().await` 接收事件
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// 获取当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_basic() {
        let bus = EventBus::new(100);

        // 订阅事件
        let mut receiver = bus.subscribe();

        // 发布事件
        bus.publish(AppEvent::LocationsLoaded { count: 3 });

        // 接收事件
        match receiver.recv().await {
            Ok(AppEvent::LocationsLoaded { count }) => {
                assert_eq!(count, 3);
            }
            _ => panic!("未收到预期事件"),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new(100);

        // 创建多个订阅者
        let mut receiver1 = bus.subscribe();
        let mut receiver2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        // 发布事件
        bus.publish(AppEvent::LocationCaptured {
            record: LocationRecord {
                id: 1,
                latitude: 37.0,
                longitude: -122.0,
            },
            timestamp: crate::storage::local_now(),
        });

        // 两个订阅者都应该收到事件
        assert!(receiver1.try_recv().is_ok());
        assert!(receiver2.try_recv().is_ok());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(8);
        bus.publish(AppEvent::ThemeChanged { dark_mode: true });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
