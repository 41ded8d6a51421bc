//! 缴费流水实体
//!
//! 只追加，不更新不删除。student_id 没有外键约束，学生删除后流水仍然保留。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub mode: String,
    pub date: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_payment(self) -> crate::models::fees::entities::FeePayment {
        use crate::models::fees::entities::FeePayment;

        FeePayment {
            id: self.id,
            student_id: self.student_id,
            amount: self.amount,
            mode: self.mode,
            date: self.date,
            note: self.note,
        }
    }
}
