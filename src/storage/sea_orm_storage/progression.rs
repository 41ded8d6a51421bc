//! 升级与毕业存储操作
//!
//! 每个变更操作都在单个事务内完成读取、校验与写入；事务内的查询一律走 `txn`，
//! 不能再借用连接池中的其他连接。

use std::collections::HashMap;

use super::SeaOrmStorage;
use super::fees::paid_totals;
use super::students::cohort_condition;
use crate::entity::batches::{Column as BatchColumn, Entity as Batches};
use crate::entity::courses::Entity as Courses;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SMSError};
use crate::progression::{
    BatchIndex, Clearance, CohortSelector, FeeStanding, ProgressionRules, PromoteCohortOutcome,
    Resolution, SweepAction, SweepRecord, SweepSummary, sweep,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info};

/// 读取班组内每个学生的缴费状态，按学生 ID 升序
async fn cohort_standings<C: ConnectionTrait>(
    conn: &C,
    cohort: &CohortSelector,
) -> Result<Vec<FeeStanding>> {
    let students: Vec<(i64, Option<f64>)> = Students::find()
        .select_only()
        .column(Column::Id)
        .column(Column::FeesTotal)
        .filter(cohort_condition(cohort))
        .order_by_asc(Column::Id)
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| SMSError::database_operation(format!("查询班组学生失败: {e}")))?;

    let ids = students.iter().map(|(id, _)| *id).collect();
    let paid: HashMap<i64, f64> = paid_totals(conn, ids).await?.into_iter().collect();

    Ok(students
        .into_iter()
        .map(|(student_id, fees_total)| FeeStanding {
            student_id,
            fees_total,
            paid: paid.get(&student_id).copied().unwrap_or(0.0),
        })
        .collect())
}

impl SeaOrmStorage {
    /// 班组缴费校验（只读）
    pub async fn check_cohort_clearance_impl(&self, cohort: &CohortSelector) -> Result<Clearance> {
        let standings = cohort_standings(&self.db, cohort).await?;
        Ok(Clearance::evaluate(standings))
    }

    /// 指定班组整体升级
    ///
    /// 只有班组内全部学生结清才会写入；被拒绝时不做任何修改。更新范围限定为
    /// 校验过的学生，校验之后才进入班组的记录不会被带走。
    pub async fn promote_cohort_impl(
        &self,
        from: &CohortSelector,
        to: &CohortSelector,
    ) -> Result<PromoteCohortOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SMSError::database_operation(format!("开启事务失败: {e}")))?;

        let standings = cohort_standings(&txn, from).await?;
        let checked: Vec<i64> = standings.iter().map(|s| s.student_id).collect();

        if let Clearance::Blocked(blocking_ids) = Clearance::evaluate(standings) {
            txn.rollback()
                .await
                .map_err(|e| SMSError::database_operation(format!("回滚事务失败: {e}")))?;
            return Ok(PromoteCohortOutcome::Blocked { blocking_ids });
        }

        let promoted_count = if checked.is_empty() {
            0
        } else {
            Students::update_many()
                .col_expr(Column::BatchId, Expr::value(to.batch_id))
                .col_expr(Column::Year, Expr::value(to.year.clone()))
                .col_expr(Column::Semester, Expr::value(to.semester.clone()))
                .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
                .filter(cohort_condition(from))
                .filter(Column::Id.is_in(checked))
                .exec(&txn)
                .await
                .map_err(|e| SMSError::database_operation(format!("班组升级失败: {e}")))?
                .rows_affected
        };

        txn.commit()
            .await
            .map_err(|e| SMSError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(PromoteCohortOutcome::Promoted { promoted_count })
    }

    /// 班组毕业：删除班组内全部学生，缴费流水保留
    pub async fn passout_cohort_impl(&self, cohort: &CohortSelector) -> Result<u64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SMSError::database_operation(format!("开启事务失败: {e}")))?;

        let result = Students::delete_many()
            .filter(cohort_condition(cohort))
            .exec(&txn)
            .await
            .map_err(|e| SMSError::database_operation(format!("班组毕业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SMSError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 全体学年切换
    ///
    /// 逐条决策后在同一个事务中执行；任何一条写入失败都会整体回滚。
    pub async fn promote_all_impl(&self, rules: &ProgressionRules) -> Result<SweepSummary> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SMSError::database_operation(format!("开启事务失败: {e}")))?;

        let course_names: HashMap<i64, String> = Courses::find()
            .all(&txn)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let batches = BatchIndex::new(
            Batches::find()
                .order_by_asc(BatchColumn::Id)
                .all(&txn)
                .await
                .map_err(|e| SMSError::database_operation(format!("查询批次失败: {e}")))?
                .into_iter()
                .map(|b| (b.id, b.course_id, b.name)),
        );

        debug!("学年切换载入 {} 个批次", batches.len());

        let students = Students::find()
            .order_by_asc(Column::Id)
            .all(&txn)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询学生失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let mut summary = SweepSummary::default();

        for student in students {
            let record = SweepRecord {
                student_id: student.id,
                course_id: student.course_id,
                batch_id: student.batch_id,
                year: student.year.as_deref(),
                semester: student.semester.as_deref(),
                course_name: course_names.get(&student.course_id).map(String::as_str),
            };
            let action = sweep::plan(rules, &batches, &record);
            summary.record(&action);

            match action {
                SweepAction::Skip(reason) => {
                    debug!("学年切换跳过学生 {}: {:?}", student.id, reason);
                }
                SweepAction::Passout => {
                    Students::delete_by_id(student.id)
                        .exec(&txn)
                        .await
                        .map_err(|e| {
                            SMSError::database_operation(format!("删除毕业学生失败: {e}"))
                        })?;
                }
                SweepAction::Advance(next) => {
                    let semester = match next.semester {
                        Resolution::Resolved(s) | Resolution::UnchangedFallback(s) => Some(s),
                        Resolution::NotApplicable => student.semester.clone(),
                    };
                    let year = next.year.value_or(student.year.clone().unwrap_or_default());

                    let model = ActiveModel {
                        id: Set(student.id),
                        year: Set(Some(year)),
                        semester: Set(semester),
                        batch_id: Set(next.batch.value_or(student.batch_id)),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    model.update(&txn).await.map_err(|e| {
                        SMSError::database_operation(format!("更新学生 {} 失败: {e}", student.id))
                    })?;
                }
            }
        }

        txn.commit()
            .await
            .map_err(|e| SMSError::database_operation(format!("提交事务失败: {e}")))?;

        info!(
            "学年切换完成: 升级 {} 人, 毕业 {} 人",
            summary.promoted_count, summary.passout_count
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::models::batches::entities::Batch;
    use crate::models::students::requests::StudentForm;

    async fn storage() -> SeaOrmStorage {
        let config = DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        SeaOrmStorage::connect(&config).await.unwrap()
    }

    async fn enroll(
        storage: &SeaOrmStorage,
        name: &str,
        batch: &Batch,
        year: &str,
        semester: &str,
    ) -> i64 {
        let form = StudentForm {
            name: name.to_string(),
            father_name: format!("{name} Sr."),
            dob: "2005-01-01".to_string(),
            mobile: "9000000000".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            gender: "Male".to_string(),
            admission_date: "2024-07-01".to_string(),
            year: year.to_string(),
            semester: semester.to_string(),
            course_id: batch.course_id,
            batch_id: batch.id,
            fees_total: Some(0.0),
        };
        storage.create_student_impl(form).await.unwrap().id
    }

    /// 让指定学生的任何更新都在数据库层失败
    async fn reject_updates_of(storage: &SeaOrmStorage, student_id: i64) {
        storage
            .db
            .execute_unprepared(&format!(
                "CREATE TRIGGER reject_update BEFORE UPDATE ON students \
                 WHEN OLD.id = {student_id} \
                 BEGIN SELECT RAISE(ABORT, 'update rejected'); END;"
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back_whole_sweep() {
        let storage = storage().await;
        let course = storage.create_course_impl("B.Com.").await.unwrap();
        let batch = storage.create_batch_impl("2024-25", course.id).await.unwrap();

        // 毕业学生 ID 较小，先于失败的升级被处理
        let graduate = enroll(&storage, "Ravi", &batch, "3rd Year", "6th Semester").await;
        let fresher = enroll(&storage, "Asha", &batch, "1st Year", "2nd Semester").await;
        reject_updates_of(&storage, fresher).await;

        let result = storage.promote_all_impl(&ProgressionRules::default()).await;
        assert!(result.is_err());

        let graduate = storage.get_student_by_id_impl(graduate).await.unwrap();
        assert!(graduate.is_some());

        let fresher = storage
            .get_student_by_id_impl(fresher)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresher.year.as_deref(), Some("1st Year"));
        assert_eq!(fresher.semester.as_deref(), Some("2nd Semester"));
        assert_eq!(fresher.batch_id, batch.id);
    }

    #[tokio::test]
    async fn test_failed_cohort_update_moves_nobody() {
        let storage = storage().await;
        let course = storage.create_course_impl("B.Sc.").await.unwrap();
        let from_batch = storage.create_batch_impl("2024-25", course.id).await.unwrap();
        let to_batch = storage.create_batch_impl("2025-26", course.id).await.unwrap();

        let first = enroll(&storage, "Asha", &from_batch, "1st Year", "2nd Semester").await;
        let second = enroll(&storage, "Kiran", &from_batch, "1st Year", "2nd Semester").await;
        reject_updates_of(&storage, second).await;

        let from = CohortSelector {
            batch_id: from_batch.id,
            year: "1st Year".to_string(),
            semester: "2nd Semester".to_string(),
        };
        let to = CohortSelector {
            batch_id: to_batch.id,
            year: "2nd Year".to_string(),
            semester: "3rd Semester".to_string(),
        };

        assert!(storage.promote_cohort_impl(&from, &to).await.is_err());

        let first = storage
            .get_student_by_id_impl(first)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.batch_id, from_batch.id);
        assert_eq!(first.year.as_deref(), Some("1st Year"));
    }
}
