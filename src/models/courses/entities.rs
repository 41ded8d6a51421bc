use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程名称，如 "B.Com."，同时作为学制查询键
    pub name: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
