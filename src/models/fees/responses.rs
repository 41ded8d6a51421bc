use serde::Serialize;
use ts_rs::TS;

// 收费汇总项：按 (日期, 方式) 分组
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeeSummaryItem {
    pub date: String,
    pub mode: String,
    pub total: f64,
}
