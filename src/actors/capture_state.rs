// Capture State Actor - 使用Actor模式管理采集状态
//
// 所有状态转换都在 Actor 内串行执行，"检查是否忙碌并进入加载" 是一条原子命令

use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::capture::CaptureState;
use crate::error::CaptureError;
use crate::storage::LocationRecord;

/// 采集状态命令
pub enum CaptureStateCommand {
    /// 尝试进入加载状态，已在加载时回复 false
    Begin {
        reply: oneshot::Sender<bool>,
    },

    /// 加载完成，整体替换列表
    Complete {
        locations: Vec<LocationRecord>,
    },

    /// 加载失败，保留原列表
    Fail {
        error: CaptureError,
    },

    /// 流程被取消，退出加载状态并保留原列表
    Abort,

    /// 获取状态快照
    Get {
        reply: oneshot::Sender<CaptureState>,
    },
}

/// 采集状态Actor
pub struct CaptureStateActor {
    receiver: mpsc::Receiver<CaptureStateCommand>,
    state: CaptureState,
}

impl CaptureStateActor {
    /// 创建新的Actor
    pub fn new() -> (Self, CaptureStateHandle) {
        let (sender, receiver) = mpsc::channel(32);
        let actor = Self {
            receiver,
            state: CaptureState::Idle,
        };
        let handle = CaptureStateHandle { sender };
        (actor, handle)
    }

    /// 运行Actor
    pub async fn run(mut self) {
        tracing::info!("Capture State Actor 已启动");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                CaptureStateCommand::Begin { reply } => {
                    if self.state.is_loading() {
                        let _ = reply.send(false);
                    } else {
                        self.state = std::mem::take(&mut self.state).into_loading();
                        // 调用方在收到回复前已取消
                        if reply.send(true).is_err() {
                            self.leave_loading();
                        }
                    }
                }

                CaptureStateCommand::Complete { locations } => {
                    self.state = CaptureState::Ready { locations };
                }

                CaptureStateCommand::Fail { error } => {
                    self.state = std::mem::take(&mut self.state).into_error(error);
                }

                CaptureStateCommand::Abort => {
                    self.leave_loading();
                }

                CaptureStateCommand::Get { reply } => {
                    let _ = reply.send(self.state.clone());
                }
            }
        }

        tracing::info!("Capture State Actor 已停止");
    }

    /// 退出加载状态并保留列表，已经结束的流程不受影响
    fn leave_loading(&mut self) {
        if let CaptureState::Loading { locations } = &mut self.state {
            let locations = std::mem::take(locations);
            self.state = CaptureState::Ready { locations };
        }
    }
}

/// 采集状态Handle
#[derive(Clone)]
pub struct CaptureStateHandle {
    sender: mpsc::Sender<CaptureStateCommand>,
}

impl CaptureStateHandle {
    /// 尝试进入加载状态
    ///
    /// Actor 已停止时同样返回 false
    pub async fn begin(&self) -> bool {
        let (reply, rx) = oneshot::channel();
        if self
            .sender
            .send(CaptureStateCommand::Begin { reply })
            .await
            .is_err()
        {
            warn!("采集状态 Actor 不可用");
            return false;
        }
        rx.await.unwrap_or(false)
    }

    /// 标记加载完成
    pub async fn complete(&self, locations: Vec<LocationRecord>) {
        let _ = self
            .sender
            .send(CaptureStateCommand::Complete { locations })
            .await;
    }

    /// 标记加载失败
    pub async fn fail(&self, error: CaptureError) {
        let _ = self.sender.send(CaptureStateCommand::Fail { error }).await;
    }

    /// 取消加载（同步发送，可在 Drop 中调用）
    pub fn abort(&self) {
        if let Err(e) = self.sender.try_send(CaptureStateCommand::Abort) {
            warn!("无法复位采集状态: {}", e);
        }
    }

    /// 获取状态快照
    pub async fn get(&self) -> CaptureState {
        let (reply, rx) = oneshot::channel();
        self.sender.send(CaptureStateCommand::Get { reply }).await.ok();
        rx.await.unwrap_or_default()
    }
}
