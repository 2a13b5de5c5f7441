//! 位置命令
//!
//! 采集失败以错误信息返回给界面，不会以异常形式传出

use crate::capture::CaptureState;
use crate::models::LocationRecord;
use crate::AppState;

/// 采集当前位置
pub async fn capture_location(state: &AppState) -> Result<LocationRecord, String> {
    state
        .capture_domain
        .get_flow()
        .capture_location()
        .await
        .map_err(|e| e.to_string())
}

/// 获取当前展示的位置列表
pub async fn get_locations(state: &AppState) -> Result<Vec<LocationRecord>, String> {
    Ok(state
        .capture_domain
        .get_flow()
        .snapshot()
        .await
        .locations()
        .to_vec())
}

/// 获取采集状态
pub async fn get_capture_state(state: &AppState) -> Result<CaptureState, String> {
    Ok(state.capture_domain.get_flow().snapshot().await)
}

/// 从记录库重新加载位置列表
pub async fn reload_locations(state: &AppState) -> Result<Vec<LocationRecord>, String> {
    state
        .capture_domain
        .get_flow()
        .load_locations()
        .await
        .map_err(|e| e.to_string())
}
