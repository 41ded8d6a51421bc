pub mod batches;
pub mod common;
pub mod courses;
pub mod fees;
pub mod progression;
pub mod students;

pub use common::{ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery};

// 程序启动时间，用于启动耗时统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
