use serde::Serialize;
use ts_rs::TS;

// 指定班组升级成功
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progression.ts")]
pub struct PromoteCohortResponse {
    pub promoted_count: u64,
}

// 未结清学生列表（升级被拒绝时返回）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progression.ts")]
pub struct FeesUnpaidResponse {
    pub blocking_ids: Vec<i64>,
}

// 班组毕业
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progression.ts")]
pub struct PassoutResponse {
    pub deleted_count: u64,
}

// 缴费校验预览
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progression.ts")]
pub struct ClearanceResponse {
    pub cleared: bool,
    pub blocking_ids: Vec<i64>,
}
