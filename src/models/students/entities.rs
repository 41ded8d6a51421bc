use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub father_name: Option<String>,
    pub dob: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub admission_date: Option<String>,
    // 年级标签，如 "2nd Year"；不在词表中的值允许存在，但批量升级会跳过
    pub year: Option<String>,
    // 学期标签，如 "3rd Semester"
    pub semester: Option<String>,
    pub course_id: i64,
    pub batch_id: i64,
    // 应缴总额，缺省视为 0
    pub fees_total: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
