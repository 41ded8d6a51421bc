//! 批次存储操作

use super::SeaOrmStorage;
use crate::entity::batches::{ActiveModel, Column, Entity as Batches};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SMSError};
use crate::models::batches::entities::Batch;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 列出批次，可按课程筛选
    pub async fn list_batches_impl(&self, course_id: Option<i64>) -> Result<Vec<Batch>> {
        let mut select = Batches::find();

        if let Some(course_id) = course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let results = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询批次列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_batch()).collect())
    }

    /// 通过 ID 获取批次
    pub async fn get_batch_by_id_impl(&self, batch_id: i64) -> Result<Option<Batch>> {
        let result = Batches::find_by_id(batch_id)
            .one(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询批次失败: {e}")))?;

        Ok(result.map(|m| m.into_batch()))
    }

    /// 按名称在课程下查找批次，同名时取 ID 最小者
    pub async fn find_batch_impl(&self, name: &str, course_id: i64) -> Result<Option<Batch>> {
        let result = Batches::find()
            .filter(Column::Name.eq(name))
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询批次失败: {e}")))?;

        Ok(result.map(|m| m.into_batch()))
    }

    /// 创建批次
    pub async fn create_batch_impl(&self, name: &str, course_id: i64) -> Result<Batch> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            course_id: Set(course_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("创建批次失败: {e}")))?;

        Ok(result.into_batch())
    }

    /// 更新批次
    pub async fn update_batch_impl(
        &self,
        batch_id: i64,
        name: &str,
        course_id: i64,
    ) -> Result<Option<Batch>> {
        if self.get_batch_by_id_impl(batch_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(batch_id),
            name: Set(name.to_string()),
            course_id: Set(course_id),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("更新批次失败: {e}")))?;

        Ok(Some(result.into_batch()))
    }

    /// 删除批次
    pub async fn delete_batch_impl(&self, batch_id: i64) -> Result<bool> {
        let result = Batches::delete_by_id(batch_id)
            .exec(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("删除批次失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计批次下的学生数
    pub async fn count_students_by_batch_impl(&self, batch_id: i64) -> Result<u64> {
        Students::find()
            .filter(StudentColumn::BatchId.eq(batch_id))
            .count(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询批次学生数量失败: {e}")))
    }
}
