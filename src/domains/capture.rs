// 采集领域管理器
//
// 负责位置采集流程

use std::sync::Arc;
use crate::capture::CaptureFlow;

/// 采集领域管理器 - 负责采集流程
#[derive(Clone)]
pub struct CaptureDomain {
    flow: Arc<CaptureFlow>,
}

impl CaptureDomain {
    /// 创建新的采集领域管理器
    pub fn new(flow: Arc<CaptureFlow>) -> Self {
        Self { flow }
    }

    /// 获取采集流程
    pub fn get_flow(&self) -> &Arc<CaptureFlow> {
        &self.flow
    }
}
