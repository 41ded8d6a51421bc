//! 学生档案存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::batches::{Column as BatchColumn, Entity as Batches};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model};
use crate::errors::{Result, SMSError};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{StudentForm, StudentListQuery},
        responses::{StudentListItem, StudentListResponse},
    },
};
use crate::progression::CohortSelector;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

/// 班组筛选条件
pub(super) fn cohort_condition(cohort: &CohortSelector) -> Condition {
    Condition::all()
        .add(Column::BatchId.eq(cohort.batch_id))
        .add(Column::Year.eq(cohort.year.as_str()))
        .add(Column::Semester.eq(cohort.semester.as_str()))
}

impl SeaOrmStorage {
    /// 登记学生
    pub async fn create_student_impl(&self, form: StudentForm) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(form.name),
            father_name: Set(Some(form.father_name)),
            dob: Set(Some(form.dob)),
            mobile: Set(Some(form.mobile)),
            email: Set(Some(form.email)),
            gender: Set(Some(form.gender)),
            admission_date: Set(Some(form.admission_date)),
            year: Set(Some(form.year)),
            semester: Set(Some(form.semester)),
            course_id: Set(form.course_id),
            batch_id: Set(form.batch_id),
            fees_total: Set(Some(form.fees_total.unwrap_or(0.0))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("登记学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生，按登记时间倒序
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Students::find();

        // 课程筛选
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        // 批次筛选
        if let Some(batch_id) = query.batch_id {
            select = select.filter(Column::BatchId.eq(batch_id));
        }

        select = select.order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SMSError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SMSError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询学生列表失败: {e}")))?;

        // 批量查询课程与批次名称
        let course_ids: Vec<i64> = students
            .iter()
            .map(|s| s.course_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let batch_ids: Vec<i64> = students
            .iter()
            .map(|s| s.batch_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let course_names: HashMap<i64, String> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询课程信息失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let batch_names: HashMap<i64, String> = Batches::find()
            .filter(BatchColumn::Id.is_in(batch_ids))
            .all(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询批次信息失败: {e}")))?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect();

        let items = students
            .into_iter()
            .map(|s| {
                let course = course_names.get(&s.course_id).cloned();
                let batch = batch_names.get(&s.batch_id).cloned();
                into_list_item(s, course, batch)
            })
            .collect();

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出班组内的学生
    pub async fn list_students_by_cohort_impl(
        &self,
        cohort: &CohortSelector,
    ) -> Result<Vec<Student>> {
        let results = Students::find()
            .filter(cohort_condition(cohort))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("查询班组学生失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学生档案；未提供应缴总额时保持原值
    pub async fn update_student_impl(
        &self,
        student_id: i64,
        form: StudentForm,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(student_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(student_id),
            name: Set(form.name),
            father_name: Set(Some(form.father_name)),
            dob: Set(Some(form.dob)),
            mobile: Set(Some(form.mobile)),
            email: Set(Some(form.email)),
            gender: Set(Some(form.gender)),
            admission_date: Set(Some(form.admission_date)),
            year: Set(Some(form.year)),
            semester: Set(Some(form.semester)),
            course_id: Set(form.course_id),
            batch_id: Set(form.batch_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(fees_total) = form.fees_total {
            model.fees_total = Set(Some(fees_total));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生（缴费流水保留）
    pub async fn delete_student_impl(&self, student_id: i64) -> Result<bool> {
        let result = Students::delete_by_id(student_id)
            .exec(&self.db)
            .await
            .map_err(|e| SMSError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

fn into_list_item(s: Model, course: Option<String>, batch: Option<String>) -> StudentListItem {
    StudentListItem {
        id: s.id,
        name: s.name,
        father_name: s.father_name,
        dob: s.dob,
        mobile: s.mobile,
        email: s.email,
        gender: s.gender,
        admission_date: s.admission_date,
        year: s.year,
        semester: s.semester,
        course_id: s.course_id,
        batch_id: s.batch_id,
        fees_total: s.fees_total,
        course,
        batch,
    }
}
