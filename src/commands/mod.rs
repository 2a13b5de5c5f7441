//! 命令模块
//!
//! 提供界面调用的全部命令接口，按功能分组：
//! - location: 位置采集与列表
//! - appearance: 深色模式
//! - config: 配置管理

pub mod appearance;
pub mod config;
pub mod location;

// 重新导出所有命令
pub use appearance::*;
pub use config::*;
pub use location::*;
