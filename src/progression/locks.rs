//! 升级操作互斥
//!
//! 班组级操作（指定班组升级、班组毕业）持有全体花名册的读锁和所涉班组的互斥锁；
//! 全体学年切换持有花名册写锁。这样同一进程内不会在重叠班组的变更进行中读取缴费合计。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::CohortSelector;

/// 班组锁持有凭证
///
/// drop 时逐个释放班组锁，并移除已无人等待的条目。
pub struct CohortLockGuard<'a> {
    registry: &'a DashMap<CohortSelector, Arc<Mutex<()>>>,
    held: Vec<(CohortSelector, OwnedMutexGuard<()>)>,
    _roster: RwLockReadGuard<'a, ()>,
}

impl Drop for CohortLockGuard<'_> {
    fn drop(&mut self) {
        for (key, guard) in self.held.drain(..) {
            drop(guard);
            // 等待者持有克隆的 Arc，计数大于 1 时条目保留
            self.registry
                .remove_if(&key, |_, mutex| Arc::strong_count(mutex) == 1);
        }
    }
}

#[derive(Default)]
pub struct ProgressionLocks {
    roster: RwLock<()>,
    cohorts: DashMap<CohortSelector, Arc<Mutex<()>>>,
}

impl ProgressionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 锁定若干班组
    ///
    /// 按排序后的顺序加锁并去重，多个调用方同时锁定重叠班组时不会死锁。
    pub async fn lock_cohorts(&self, cohorts: &[&CohortSelector]) -> CohortLockGuard<'_> {
        let roster = self.roster.read().await;

        let mut keys: Vec<&CohortSelector> = cohorts.to_vec();
        keys.sort();
        keys.dedup();

        let mut guards = Vec::with_capacity(keys.len());
        for key in keys {
            // 先克隆出 Arc，避免在 await 期间持有 DashMap 的分片锁
            let mutex = self
                .cohorts
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone();
            guards.push((key.clone(), mutex.lock_owned().await));
        }

        CohortLockGuard {
            registry: &self.cohorts,
            held: guards,
            _roster: roster,
        }
    }

    /// 锁定全体花名册
    pub async fn lock_roster(&self) -> RwLockWriteGuard<'_, ()> {
        self.roster.write().await
    }

    /// 清理当前无人持有的班组锁条目
    ///
    /// 正常释放路径已经逐条清理，这里兜底处理被取消的加锁调用留下的条目。
    pub fn prune(&self) {
        self.cohorts.retain(|_, mutex| Arc::strong_count(mutex) > 1);
    }

    pub fn tracked_cohorts(&self) -> usize {
        self.cohorts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cohort(batch_id: i64, year: &str) -> CohortSelector {
        CohortSelector {
            batch_id,
            year: year.to_string(),
            semester: "1st Semester".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cohort_lock_blocks_roster_sweep() {
        let locks = ProgressionLocks::new();
        let a = cohort(1, "1st Year");

        let guard = locks.lock_cohorts(&[&a]).await;
        assert!(locks.roster.try_write().is_err());
        drop(guard);
        assert!(locks.roster.try_write().is_ok());
    }

    #[tokio::test]
    async fn test_overlapping_selectors_are_deduplicated() {
        let locks = ProgressionLocks::new();
        let a = cohort(1, "1st Year");
        let b = cohort(2, "2nd Year");

        // 源与目标相同也不会自锁
        let guard = locks.lock_cohorts(&[&b, &a, &a]).await;
        assert_eq!(locks.tracked_cohorts(), 2);
        drop(guard);

        let again = locks.lock_cohorts(&[&a]).await;
        drop(again);
    }

    #[tokio::test]
    async fn test_released_locks_leave_no_entries() {
        let locks = ProgressionLocks::new();

        for i in 0..500 {
            let selector = cohort(1, &format!("junk-{i}"));
            drop(locks.lock_cohorts(&[&selector]).await);
        }
        assert_eq!(locks.tracked_cohorts(), 0);
    }

    #[tokio::test]
    async fn test_waiting_caller_keeps_entry_alive() {
        let locks = Arc::new(ProgressionLocks::new());
        let a = cohort(1, "1st Year");

        let held = locks.lock_cohorts(&[&a]).await;
        let waiter = {
            let locks = locks.clone();
            let a = a.clone();
            tokio::spawn(async move {
                let _guard = locks.lock_cohorts(&[&a]).await;
            })
        };
        tokio::task::yield_now().await;
        drop(held);

        waiter.await.unwrap();
        assert_eq!(locks.tracked_cohorts(), 0);
    }

    #[tokio::test]
    async fn test_prune_drops_idle_entries() {
        let locks = ProgressionLocks::new();
        let a = cohort(1, "1st Year");
        let b = cohort(2, "1st Year");

        let _held = locks.lock_cohorts(&[&a]).await;
        drop(locks.lock_cohorts(&[&b]).await);
        locks.prune();
        assert_eq!(locks.tracked_cohorts(), 1);
    }
}
