//! 缴费流水存储操作

use super::SeaOrmStorage;
use crate::entity::fee_payments::{ActiveModel, Column, Entity as FeePayments};
use crate::errors::{Result, SMSError};
use crate::models::fees::{
    entities::FeePayment,
    requests::{FeeSummaryQuery, NewFeePayment},
    responses::FeeSummaryItem,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// 按学生汇总已缴金额
///
/// 返回 (student_id, 已缴合计)，没有流水的学生不出现在结果中。
pub(super) async fn paid_totals<C: ConnectionTrait>(
    conn: &C,
    student_ids: Vec<i64>,
) -> Result<Vec<(i64, f64)>> {
    if student_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<(i64, Option<f64>)> = FeePayments::find()
        .select_only()
        .column(Column::StudentId)
        .column_as(Column::Amount.sum(), "paid")
        .filter(Column::StudentId.is_in(student_ids))
        .group_by(Column::StudentId)
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| SMSError::database_operation(format!("汇总缴费金额失败: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|(id, paid)| (id, paid.unwrap_or(0.0)))
        .collect())
}

impl SeaOrmStorage {
    /// 登记缴费
    pub async fn add_fee_payment_impl(
        &self,
        student_id: i64,
        payment: NewFeePayment,
    ) -> Result<FeePayment> {
        let model = ActiveModel {
            student_id: Set(student_id),
            amount: Set(payment.amount),
            mode: Set(payment.mode),
            date: Set(payment.date),
            note: Set(payment.note),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("登记缴费失败: {e}")))?;

        Ok(result.into_fee_payment())
    }

    /// 缴费历史，日期倒序，同日按登记顺序倒序
    pub async fn list_fee_payments_impl(&self, student_id: i64) -> Result<Vec<FeePayment>> {
        let results = FeePayments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询缴费历史失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_fee_payment()).collect())
    }

    /// 学生已缴合计，没有流水时为 0
    pub async fn sum_payments_for_impl(&self, student_id: i64) -> Result<f64> {
        let totals = paid_totals(&self.db, vec![student_id]).await?;
        Ok(totals.first().map(|(_, paid)| *paid).unwrap_or(0.0))
    }

    /// 收费汇总：按 (日期, 方式) 分组，日期倒序
    pub async fn fee_collection_summary_impl(
        &self,
        query: FeeSummaryQuery,
    ) -> Result<Vec<FeeSummaryItem>> {
        let mut select = FeePayments::find()
            .select_only()
            .column(Column::Date)
            .column(Column::Mode)
            .column_as(Column::Amount.sum(), "total");

        if let Some(from) = query.from.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(Column::Date.gte(from));
        }
        if let Some(to) = query.to.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(Column::Date.lte(to));
        }
        if let Some(mode) = query.mode.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(Column::Mode.eq(mode));
        }

        let rows: Vec<(String, String, Option<f64>)> = select
            .group_by(Column::Date)
            .group_by(Column::Mode)
            .order_by_desc(Column::Date)
            .order_by_asc(Column::Mode)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询收费汇总失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(date, mode, total)| FeeSummaryItem {
                date,
                mode,
                total: total.unwrap_or(0.0),
            })
            .collect())
    }
}
