//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::batches::{Column as BatchColumn, Entity as Batches};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SMSError};
use crate::models::courses::entities::Course;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

/// 唯一约束冲突转换为 Conflict，其余为数据库操作错误
fn map_course_write_err(e: DbErr, action: &str) -> SMSError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => SMSError::conflict("Course already exists"),
        _ => SMSError::database_operation(format!("{action}失败: {e}")),
    }
}

impl SeaOrmStorage {
    /// 列出全部课程
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let results = Courses::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_course()).collect())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 创建课程
    pub async fn create_course_impl(&self, name: &str) -> Result<Course> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_course_write_err(e, "创建课程"))?;

        Ok(result.into_course())
    }

    /// 重命名课程
    pub async fn update_course_impl(&self, course_id: i64, name: &str) -> Result<Option<Course>> {
        // 先检查课程是否存在
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(course_id),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| map_course_write_err(e, "更新课程"))?;

        Ok(Some(result.into_course()))
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计课程下的批次数
    pub async fn count_batches_by_course_impl(&self, course_id: i64) -> Result<u64> {
        Batches::find()
            .filter(BatchColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询课程批次数量失败: {e}")))
    }

    /// 统计课程下的学生数
    pub async fn count_students_by_course_impl(&self, course_id: i64) -> Result<u64> {
        Students::find()
            .filter(StudentColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询课程学生数量失败: {e}")))
    }
}
