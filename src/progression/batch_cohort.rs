//! 批次周期解析
//!
//! 批次名称编码两年制入学周期（如 "2024-25"），升级时推导下一个周期的名称，
//! 并在同一课程下查找对应的批次记录。找不到时保留原批次，从不自动创建批次。

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::Resolution;

// 仅匹配名称开头的 "YYYY-YY"
static BATCH_CYCLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})").expect("Invalid batch cycle regex"));

/// 批次查询接口
pub trait BatchLookup {
    /// 批次名称
    fn batch_name(&self, batch_id: i64) -> Option<&str>;
    /// 按名称在指定课程下查找批次
    fn find_batch(&self, name: &str, course_id: i64) -> Option<i64>;
}

/// 计算下一个周期的批次名称
///
/// "2024-25" -> "2025-26"；后缀按 100 取模回绕，"2099-99" -> "2100-00"。
pub fn next_batch_name(name: &str) -> Option<String> {
    let caps = BATCH_CYCLE_RE.captures(name)?;
    let start: u32 = caps[1].parse().ok()?;
    let end: u32 = caps[2].parse().ok()?;
    Some(format!("{}-{:02}", start + 1, (end + 1) % 100))
}

/// 解析学生升级后应归属的批次
///
/// - 当前批次记录不存在或名称不符合周期格式：`NotApplicable`
/// - 下一周期的批次在该课程下不存在：`UnchangedFallback(原批次)`
pub fn resolve_next_batch<L: BatchLookup + ?Sized>(
    lookup: &L,
    batch_id: i64,
    course_id: i64,
) -> Resolution<i64> {
    let Some(next_name) = lookup.batch_name(batch_id).and_then(next_batch_name) else {
        return Resolution::NotApplicable;
    };

    match lookup.find_batch(&next_name, course_id) {
        Some(next_id) => Resolution::Resolved(next_id),
        None => Resolution::UnchangedFallback(batch_id),
    }
}

/// 批次内存索引，在一次批量升级开始时加载
#[derive(Debug, Default, Clone)]
pub struct BatchIndex {
    names: HashMap<i64, String>,
    by_course_and_name: HashMap<(i64, String), i64>,
}

impl BatchIndex {
    /// 由 (批次ID, 课程ID, 名称) 构造；同课程同名的批次取 ID 最小者
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64, String)>,
    {
        let mut index = Self::default();
        for (id, course_id, name) in batches {
            index
                .by_course_and_name
                .entry((course_id, name.clone()))
                .and_modify(|existing| *existing = (*existing).min(id))
                .or_insert(id);
            index.names.insert(id, name);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl BatchLookup for BatchIndex {
    fn batch_name(&self, batch_id: i64) -> Option<&str> {
        self.names.get(&batch_id).map(String::as_str)
    }

    fn find_batch(&self, name: &str, course_id: i64) -> Option<i64> {
        self.by_course_and_name
            .get(&(course_id, name.to_string()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> BatchIndex {
        BatchIndex::new([
            (1, 10, "2024-25".to_string()),
            (2, 10, "2025-26".to_string()),
            (3, 20, "2025-26".to_string()),
            (4, 10, "Evening".to_string()),
            (5, 10, "2099-99".to_string()),
        ])
    }

    #[test]
    fn test_next_batch_name() {
        assert_eq!(next_batch_name("2024-25").as_deref(), Some("2025-26"));
        assert_eq!(next_batch_name("2023-99").as_deref(), Some("2024-00"));
        assert_eq!(next_batch_name("2099-99").as_deref(), Some("2100-00"));
        assert_eq!(next_batch_name("2008-09").as_deref(), Some("2009-10"));
    }

    #[test]
    fn test_next_batch_name_only_checks_prefix() {
        assert_eq!(next_batch_name("2024-25 (A)").as_deref(), Some("2025-26"));
        assert_eq!(next_batch_name("Batch 2024-25"), None);
        assert_eq!(next_batch_name("24-25"), None);
        assert_eq!(next_batch_name(""), None);
    }

    #[test]
    fn test_resolves_batch_under_same_course() {
        let idx = index();
        assert_eq!(resolve_next_batch(&idx, 1, 10), Resolution::Resolved(2));
        // 同名批次属于其他课程时不会被选中
        assert_eq!(resolve_next_batch(&idx, 1, 20), Resolution::Resolved(3));
    }

    #[test]
    fn test_missing_next_batch_keeps_original() {
        let idx = index();
        assert_eq!(resolve_next_batch(&idx, 2, 10), Resolution::UnchangedFallback(2));
        assert_eq!(resolve_next_batch(&idx, 5, 10), Resolution::UnchangedFallback(5));
    }

    #[test]
    fn test_unparseable_or_unknown_batch() {
        let idx = index();
        assert_eq!(resolve_next_batch(&idx, 4, 10), Resolution::NotApplicable);
        assert_eq!(resolve_next_batch(&idx, 99, 10), Resolution::NotApplicable);
        assert_eq!(resolve_next_batch(&idx, 99, 10).value_or(99), 99);
    }

    #[test]
    fn test_duplicate_names_pick_lowest_id() {
        let idx = BatchIndex::new([
            (7, 1, "2025-26".to_string()),
            (6, 1, "2025-26".to_string()),
        ]);
        assert_eq!(idx.find_batch("2025-26", 1), Some(6));
        assert_eq!(idx.len(), 2);
    }
}
