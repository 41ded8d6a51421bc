//! 全体学生学年切换
//!
//! 对每条学生记录独立决策：跳过、毕业删除或升级。这里只做决策，
//! 执行（更新/删除）由存储层在同一个事务里完成。

use serde::Serialize;
use ts_rs::TS;

use super::batch_cohort::{BatchLookup, resolve_next_batch};
use super::rules::{ProgressionRules, Resolution};

/// 决策所需的学生快照
#[derive(Debug, Clone, Copy)]
pub struct SweepRecord<'a> {
    pub student_id: i64,
    pub course_id: i64,
    pub batch_id: i64,
    pub year: Option<&'a str>,
    pub semester: Option<&'a str>,
    /// 课程名称；课程记录缺失时为 None
    pub course_name: Option<&'a str>,
}

/// 跳过原因，跳过的记录不计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingYear,
    UnknownCourse,
    YearOutsideVocabulary,
}

/// 升级后的目标值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advancement {
    pub year: Resolution<String>,
    pub semester: Resolution<String>,
    pub batch: Resolution<i64>,
}

/// 单条记录的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepAction {
    Skip(SkipReason),
    /// 刚读完最后一年，删除
    Passout,
    Advance(Advancement),
}

/// 批量升级统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "progression.ts")]
pub struct SweepSummary {
    pub promoted_count: u64,
    pub passout_count: u64,
}

impl SweepSummary {
    pub fn record(&mut self, action: &SweepAction) {
        match action {
            SweepAction::Skip(_) => {}
            SweepAction::Passout => self.passout_count += 1,
            SweepAction::Advance(_) => self.promoted_count += 1,
        }
    }
}

/// 为单个学生决定本次学年切换的处理方式
///
/// 毕业判定不检查缴费。年级已是词表最后一项但未达到学制时，年级保持不变，
/// 学期和批次照常推进，仍计为升级。
pub fn plan<L: BatchLookup + ?Sized>(
    rules: &ProgressionRules,
    batches: &L,
    record: &SweepRecord<'_>,
) -> SweepAction {
    let Some(year) = record.year.filter(|y| !y.trim().is_empty()) else {
        return SweepAction::Skip(SkipReason::MissingYear);
    };
    let Some(course_name) = record.course_name.filter(|c| !c.trim().is_empty()) else {
        return SweepAction::Skip(SkipReason::UnknownCourse);
    };
    let Some(idx) = rules.year_index(year) else {
        return SweepAction::Skip(SkipReason::YearOutsideVocabulary);
    };

    let duration = rules.duration(course_name) as usize;
    if idx + 1 == duration {
        return SweepAction::Passout;
    }

    let semester = match record.semester {
        Some(s) => rules.next_semester(s).map(str::to_string),
        None => Resolution::NotApplicable,
    };

    SweepAction::Advance(Advancement {
        year: rules.next_year(year).map(str::to_string),
        semester,
        batch: resolve_next_batch(batches, record.batch_id, record.course_id),
    })
}
