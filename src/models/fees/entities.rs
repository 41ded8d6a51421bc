use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 缴费流水（只追加）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeePayment {
    pub id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub mode: String,
    pub date: String,
    pub note: Option<String>,
}
