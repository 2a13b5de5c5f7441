// 领域模块 - 用于组织应用的业务逻辑
//
// 按业务领域分组：采集、存储、外观

pub mod appearance;
pub mod capture;
pub mod storage;

pub use appearance::AppearanceDomain;
pub use capture::CaptureDomain;
pub use storage::StorageDomain;
