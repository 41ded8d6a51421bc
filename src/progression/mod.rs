//! 学业进度与缴费门控升级引擎
//!
//! - `rules`: 学制、年级/学期词表及后继查找
//! - `batch_cohort`: 入学周期批次名称推导与查找
//! - `guard`: 升级前的缴费校验
//! - `sweep`: 全体学年切换的逐条决策
//! - `locks`: 班组级互斥
//!
//! 本模块不做 I/O；事务执行由 `storage` 层负责。

pub mod batch_cohort;
pub mod guard;
pub mod locks;
pub mod rules;
pub mod sweep;

pub use batch_cohort::{BatchIndex, BatchLookup, next_batch_name, resolve_next_batch};
pub use guard::{Clearance, FeeStanding};
pub use locks::ProgressionLocks;
pub use rules::{ProgressionRules, Resolution};
pub use sweep::{SweepAction, SweepRecord, SweepSummary};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{Result, SMSError};

/// 班组：(批次, 年级, 学期) 三元组
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export, export_to = "progression.ts")]
pub struct CohortSelector {
    pub batch_id: i64,
    pub year: String,
    pub semester: String,
}

impl CohortSelector {
    /// 由请求字段构造，缺失或空白字段返回校验错误
    ///
    /// `prefix` 用于错误信息中的字段名，如 "from_"。
    pub fn from_fields(
        prefix: &str,
        batch_id: Option<i64>,
        year: Option<&str>,
        semester: Option<&str>,
    ) -> Result<Self> {
        let mut missing = Vec::new();

        let batch_id = batch_id.filter(|id| *id > 0);
        if batch_id.is_none() {
            missing.push(format!("{prefix}batch_id"));
        }
        let year = year.map(str::trim).filter(|y| !y.is_empty());
        if year.is_none() {
            missing.push(format!("{prefix}year"));
        }
        let semester = semester.map(str::trim).filter(|s| !s.is_empty());
        if semester.is_none() {
            missing.push(format!("{prefix}semester"));
        }

        match (batch_id, year, semester) {
            (Some(batch_id), Some(year), Some(semester)) => Ok(Self {
                batch_id,
                year: year.to_string(),
                semester: semester.to_string(),
            }),
            _ => Err(SMSError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for CohortSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "batch {} / {} / {}", self.batch_id, self.year, self.semester)
    }
}

/// 指定班组升级的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoteCohortOutcome {
    /// 全部结清，已整体迁移
    Promoted { promoted_count: u64 },
    /// 存在未结清学生，未做任何修改
    Blocked { blocking_ids: Vec<i64> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_from_fields() {
        let cohort =
            CohortSelector::from_fields("", Some(3), Some(" 2nd Year "), Some("3rd Semester"))
                .unwrap();
        assert_eq!(cohort.batch_id, 3);
        assert_eq!(cohort.year, "2nd Year");
        assert_eq!(cohort.to_string(), "batch 3 / 2nd Year / 3rd Semester");
    }

    #[test]
    fn test_selector_reports_every_missing_field() {
        let err = CohortSelector::from_fields("from_", Some(0), Some(""), None).unwrap_err();
        assert_eq!(err.code(), "E004");
        assert_eq!(
            err.message(),
            "Missing required fields: from_batch_id, from_year, from_semester"
        );
    }
}
