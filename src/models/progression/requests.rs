use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::progression::CohortSelector;

// 指定班组升级请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "progression.ts")]
pub struct PromoteCohortRequest {
    pub from_batch_id: Option<i64>,
    pub from_year: Option<String>,
    pub from_semester: Option<String>,
    pub to_batch_id: Option<i64>,
    pub to_year: Option<String>,
    pub to_semester: Option<String>,
}

impl PromoteCohortRequest {
    /// 校验并拆分为 (源班组, 目标班组)
    pub fn into_selectors(self) -> Result<(CohortSelector, CohortSelector)> {
        let from = CohortSelector::from_fields(
            "from_",
            self.from_batch_id,
            self.from_year.as_deref(),
            self.from_semester.as_deref(),
        )?;
        let to = CohortSelector::from_fields(
            "to_",
            self.to_batch_id,
            self.to_year.as_deref(),
            self.to_semester.as_deref(),
        )?;
        Ok((from, to))
    }
}

// 班组请求（毕业、缴费校验）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "progression.ts")]
pub struct CohortRequest {
    pub batch_id: Option<i64>,
    pub year: Option<String>,
    pub semester: Option<String>,
}

impl CohortRequest {
    pub fn into_selector(self) -> Result<CohortSelector> {
        CohortSelector::from_fields(
            "",
            self.batch_id,
            self.year.as_deref(),
            self.semester.as_deref(),
        )
    }
}
