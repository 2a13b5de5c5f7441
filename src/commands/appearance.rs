//! 外观命令

use crate::theme::{Theme, ToggleOutcome};
use crate::AppState;

/// 获取当前主题
pub async fn get_theme(state: &AppState) -> Result<Theme, String> {
    Ok(state.appearance_domain.get_theme().current_theme().await)
}

/// 切换深色模式
pub async fn toggle_dark_mode(state: &AppState) -> Result<ToggleOutcome, String> {
    Ok(state.appearance_domain.get_theme().toggle_dark_mode().await)
}
