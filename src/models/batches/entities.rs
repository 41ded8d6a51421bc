use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct Batch {
    // 批次ID
    pub id: i64,
    // 批次名称，入学周期编码，如 "2024-25"
    pub name: String,
    // 所属课程ID
    pub course_id: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
