//! 升级缴费校验
//!
//! 对某个班组的全部学生核对缴费流水合计与应缴总额，只做判断，不做任何修改。

/// 单个学生的缴费状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeStanding {
    pub student_id: i64,
    /// 应缴总额，缺省视为 0
    pub fees_total: Option<f64>,
    /// 已缴合计
    pub paid: f64,
}

impl FeeStanding {
    /// 已缴合计不低于应缴总额即视为结清
    pub fn is_cleared(&self) -> bool {
        self.paid >= self.fees_total.unwrap_or(0.0)
    }
}

/// 校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clearance {
    Cleared,
    /// 所有未结清的学生ID，按输入顺序排列
    Blocked(Vec<i64>),
}

impl Clearance {
    /// 汇总整个班组的缴费状态；会列出全部未结清学生，而不是遇到第一个就停止
    pub fn evaluate<I>(standings: I) -> Self
    where
        I: IntoIterator<Item = FeeStanding>,
    {
        let blocking: Vec<i64> = standings
            .into_iter()
            .filter(|s| !s.is_cleared())
            .map(|s| s.student_id)
            .collect();

        if blocking.is_empty() {
            Clearance::Cleared
        } else {
            Clearance::Blocked(blocking)
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, Clearance::Cleared)
    }

    pub fn blocking_ids(&self) -> &[i64] {
        match self {
            Clearance::Cleared => &[],
            Clearance::Blocked(ids) => ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(student_id: i64, fees_total: Option<f64>, paid: f64) -> FeeStanding {
        FeeStanding {
            student_id,
            fees_total,
            paid,
        }
    }

    #[test]
    fn test_exact_payment_is_cleared() {
        assert!(standing(1, Some(10000.0), 10000.0).is_cleared());
        assert!(standing(1, Some(10000.0), 12000.0).is_cleared());
        assert!(!standing(1, Some(10000.0), 9999.0).is_cleared());
    }

    #[test]
    fn test_missing_total_is_trivially_cleared() {
        assert!(standing(1, None, 0.0).is_cleared());
        assert!(standing(1, Some(0.0), 0.0).is_cleared());
    }

    #[test]
    fn test_empty_cohort_is_cleared() {
        let clearance = Clearance::evaluate(Vec::new());
        assert!(clearance.is_cleared());
        assert!(clearance.blocking_ids().is_empty());
    }

    #[test]
    fn test_lists_every_blocking_student() {
        let clearance = Clearance::evaluate([
            standing(1, Some(500.0), 100.0),
            standing(2, Some(500.0), 500.0),
            standing(3, Some(500.0), 0.0),
            standing(4, None, 0.0),
        ]);
        assert_eq!(clearance, Clearance::Blocked(vec![1, 3]));
        assert_eq!(clearance.blocking_ids(), &[1, 3]);
    }
}
