//! 学业进度规则
//!
//! 课程学制表与有序的年级/学期词表。规则在启动时由配置构造一次，之后只读，
//! 通过参数注入到升级引擎中，测试可以替换为其他策略。

use std::collections::HashMap;

use crate::errors::{Result, SMSError};

/// 未登记课程使用的默认学制（年）
pub const DEFAULT_COURSE_DURATION: u32 = 3;

/// 内置课程学制表
pub const DEFAULT_COURSE_DURATIONS: &[(&str, u32)] =
    &[("B.A.", 3), ("B.Sc.", 3), ("B.Com.", 3), ("B.Tech.", 4)];

/// 查找结果的三态表示
///
/// 区分"确实前进了"与"查不到而保持原值"，避免调用方把原样返回误判为升级。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<T> {
    /// 找到了后继值
    Resolved(T),
    /// 查找命中但没有后继（如已是最后一项、目标批次不存在），保持原值
    UnchangedFallback(T),
    /// 输入不在词表内或格式不匹配，规则不适用
    NotApplicable,
}

impl<T> Resolution<T> {
    /// 是否真正前进到了新值
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// 取最终值；规则不适用时回退到调用方给出的原值
    pub fn value_or(self, original: T) -> T {
        match self {
            Resolution::Resolved(v) | Resolution::UnchangedFallback(v) => v,
            Resolution::NotApplicable => original,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolution<U> {
        match self {
            Resolution::Resolved(v) => Resolution::Resolved(f(v)),
            Resolution::UnchangedFallback(v) => Resolution::UnchangedFallback(f(v)),
            Resolution::NotApplicable => Resolution::NotApplicable,
        }
    }
}

/// 学业进度策略
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionRules {
    course_durations: HashMap<String, u32>,
    default_duration: u32,
    year_order: Vec<String>,
    semester_order: Vec<String>,
}

impl ProgressionRules {
    /// 构造并校验规则
    ///
    /// 词表不能为空且不能有重复标签，学制必须大于 0。
    pub fn new(
        course_durations: HashMap<String, u32>,
        default_duration: u32,
        year_order: Vec<String>,
        semester_order: Vec<String>,
    ) -> Result<Self> {
        if default_duration == 0 {
            return Err(SMSError::validation("default course duration must be positive"));
        }
        if let Some((course, _)) = course_durations.iter().find(|(_, d)| **d == 0) {
            return Err(SMSError::validation(format!(
                "duration of course '{course}' must be positive"
            )));
        }
        check_vocabulary("year", &year_order)?;
        check_vocabulary("semester", &semester_order)?;

        Ok(Self {
            course_durations,
            default_duration,
            year_order,
            semester_order,
        })
    }

    /// 课程学制（年），未登记的课程使用默认学制
    pub fn duration(&self, course_name: &str) -> u32 {
        self.course_durations
            .get(course_name)
            .copied()
            .unwrap_or(self.default_duration)
    }

    /// 年级标签在词表中的位置
    pub fn year_index(&self, year: &str) -> Option<usize> {
        self.year_order.iter().position(|y| y == year)
    }

    /// 下一个年级
    pub fn next_year<'a>(&'a self, year: &'a str) -> Resolution<&'a str> {
        successor(&self.year_order, year)
    }

    /// 下一个学期
    pub fn next_semester<'a>(&'a self, semester: &'a str) -> Resolution<&'a str> {
        successor(&self.semester_order, semester)
    }

    pub fn year_order(&self) -> &[String] {
        &self.year_order
    }

    pub fn semester_order(&self) -> &[String] {
        &self.semester_order
    }
}

impl Default for ProgressionRules {
    fn default() -> Self {
        let course_durations = DEFAULT_COURSE_DURATIONS
            .iter()
            .map(|(name, years)| (name.to_string(), *years))
            .collect();

        Self {
            course_durations,
            default_duration: DEFAULT_COURSE_DURATION,
            year_order: default_year_order(),
            semester_order: default_semester_order(),
        }
    }
}

pub fn default_year_order() -> Vec<String> {
    ["1st Year", "2nd Year", "3rd Year", "4th Year"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_semester_order() -> Vec<String> {
    [
        "1st Semester",
        "2nd Semester",
        "3rd Semester",
        "4th Semester",
        "5th Semester",
        "6th Semester",
        "7th Semester",
        "8th Semester",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn successor<'a>(order: &'a [String], label: &'a str) -> Resolution<&'a str> {
    match order.iter().position(|l| l == label) {
        Some(idx) => match order.get(idx + 1) {
            Some(next) => Resolution::Resolved(next.as_str()),
            None => Resolution::UnchangedFallback(label),
        },
        None => Resolution::NotApplicable,
    }
}

fn check_vocabulary(kind: &str, labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(SMSError::validation(format!("{kind} vocabulary must not be empty")));
    }
    for (i, label) in labels.iter().enumerate() {
        if label.trim().is_empty() {
            return Err(SMSError::validation(format!("{kind} labels must not be blank")));
        }
        if labels[..i].contains(label) {
            return Err(SMSError::validation(format!(
                "duplicate {kind} label '{label}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_course_durations() {
        let rules = ProgressionRules::default();
        assert_eq!(rules.duration("B.Com."), 3);
        assert_eq!(rules.duration("B.Tech."), 4);
    }

    #[test]
    fn test_unknown_course_uses_default_duration() {
        let rules = ProgressionRules::default();
        assert_eq!(rules.duration("M.B.A."), DEFAULT_COURSE_DURATION);
        assert_eq!(rules.duration(""), DEFAULT_COURSE_DURATION);
    }

    #[test]
    fn test_next_year() {
        let rules = ProgressionRules::default();
        assert_eq!(rules.next_year("1st Year"), Resolution::Resolved("2nd Year"));
        assert_eq!(
            rules.next_year("4th Year"),
            Resolution::UnchangedFallback("4th Year")
        );
        assert_eq!(rules.next_year("Final Year"), Resolution::NotApplicable);
    }

    #[test]
    fn test_next_semester() {
        let rules = ProgressionRules::default();
        assert_eq!(
            rules.next_semester("3rd Semester"),
            Resolution::Resolved("4th Semester")
        );
        assert_eq!(
            rules.next_semester("8th Semester"),
            Resolution::UnchangedFallback("8th Semester")
        );
        assert_eq!(rules.next_semester("Sem III"), Resolution::NotApplicable);
    }

    #[test]
    fn test_resolution_value_or() {
        assert_eq!(Resolution::Resolved(2).value_or(1), 2);
        assert_eq!(Resolution::UnchangedFallback(1).value_or(9), 1);
        assert_eq!(Resolution::<i32>::NotApplicable.value_or(7), 7);
        assert!(!Resolution::UnchangedFallback(1).is_resolved());
    }

    #[test]
    fn test_custom_rules() {
        let rules = ProgressionRules::new(
            HashMap::from([("Diploma".to_string(), 2)]),
            1,
            vec!["Y1".into(), "Y2".into()],
            vec!["S1".into(), "S2".into()],
        )
        .unwrap();
        assert_eq!(rules.duration("Diploma"), 2);
        assert_eq!(rules.duration("B.Com."), 1);
        assert_eq!(rules.next_year("Y1"), Resolution::Resolved("Y2"));
        assert_eq!(rules.year_index("Y2"), Some(1));
    }

    #[test]
    fn test_rejects_invalid_rules() {
        let years = default_year_order();
        let sems = default_semester_order();

        assert!(ProgressionRules::new(HashMap::new(), 0, years.clone(), sems.clone()).is_err());
        assert!(
            ProgressionRules::new(
                HashMap::from([("B.A.".to_string(), 0)]),
                3,
                years.clone(),
                sems.clone()
            )
            .is_err()
        );
        assert!(ProgressionRules::new(HashMap::new(), 3, vec![], sems.clone()).is_err());

        let err = ProgressionRules::new(
            HashMap::new(),
            3,
            vec!["1st Year".into(), "1st Year".into()],
            sems,
        )
        .unwrap_err();
        assert_eq!(err.code(), "E004");
    }
}
