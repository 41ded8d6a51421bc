use crate::models::common::PaginatedResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生列表项（附带课程与批次名称）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListItem {
    pub id: i64,
    pub name: String,
    pub father_name: Option<String>,
    pub dob: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub admission_date: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub course_id: i64,
    pub batch_id: i64,
    pub fees_total: Option<f64>,
    pub course: Option<String>,
    pub batch: Option<String>,
}

// 学生列表响应
pub type StudentListResponse = PaginatedResponse<StudentListItem>;
