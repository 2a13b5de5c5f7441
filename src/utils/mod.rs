//! 工具函数模块
//!
//! - 文件系统路径（应用数据目录、日志目录）

pub mod file_system;

// 重新导出常用函数
pub use file_system::*;
