use std::sync::Arc;

use crate::models::{
    batches::entities::Batch,
    courses::entities::Course,
    fees::{
        entities::FeePayment,
        requests::{FeeSummaryQuery, NewFeePayment},
        responses::FeeSummaryItem,
    },
    students::{
        entities::Student,
        requests::{StudentForm, StudentListQuery},
        responses::StudentListResponse,
    },
};
use crate::progression::{
    Clearance, CohortSelector, ProgressionRules, PromoteCohortOutcome, SweepSummary,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课程管理方法
    // 列出全部课程
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 创建课程（名称唯一）
    async fn create_course(&self, name: &str) -> Result<Course>;
    // 重命名课程
    async fn update_course(&self, course_id: i64, name: &str) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 统计课程下的批次数
    async fn count_batches_by_course(&self, course_id: i64) -> Result<u64>;
    // 统计课程下的学生数
    async fn count_students_by_course(&self, course_id: i64) -> Result<u64>;

    /// 批次管理方法
    // 列出批次，可按课程筛选
    async fn list_batches(&self, course_id: Option<i64>) -> Result<Vec<Batch>>;
    // 通过ID获取批次
    async fn get_batch_by_id(&self, batch_id: i64) -> Result<Option<Batch>>;
    // 按名称在课程下查找批次
    async fn find_batch(&self, name: &str, course_id: i64) -> Result<Option<Batch>>;
    // 创建批次
    async fn create_batch(&self, name: &str, course_id: i64) -> Result<Batch>;
    // 更新批次
    async fn update_batch(&self, batch_id: i64, name: &str, course_id: i64)
    -> Result<Option<Batch>>;
    // 删除批次
    async fn delete_batch(&self, batch_id: i64) -> Result<bool>;
    // 统计批次下的学生数
    async fn count_students_by_batch(&self, batch_id: i64) -> Result<u64>;

    /// 学生档案方法
    // 登记学生
    async fn create_student(&self, form: StudentForm) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 分页列出学生（附课程、批次名称）
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 列出班组内的学生
    async fn list_students_by_cohort(&self, cohort: &CohortSelector) -> Result<Vec<Student>>;
    // 更新学生档案
    async fn update_student(&self, student_id: i64, form: StudentForm) -> Result<Option<Student>>;
    // 删除学生
    async fn delete_student(&self, student_id: i64) -> Result<bool>;

    /// 缴费流水方法
    // 登记缴费
    async fn add_fee_payment(&self, student_id: i64, payment: NewFeePayment)
    -> Result<FeePayment>;
    // 学生缴费历史
    async fn list_fee_payments(&self, student_id: i64) -> Result<Vec<FeePayment>>;
    // 学生已缴合计
    async fn sum_payments_for(&self, student_id: i64) -> Result<f64>;
    // 按日期与方式汇总
    async fn fee_collection_summary(&self, query: FeeSummaryQuery) -> Result<Vec<FeeSummaryItem>>;

    /// 升级与毕业方法
    // 班组缴费校验（只读）
    async fn check_cohort_clearance(&self, cohort: &CohortSelector) -> Result<Clearance>;
    // 指定班组整体升级，全部结清才执行
    async fn promote_cohort(
        &self,
        from: &CohortSelector,
        to: &CohortSelector,
    ) -> Result<PromoteCohortOutcome>;
    // 班组毕业（删除）
    async fn passout_cohort(&self, cohort: &CohortSelector) -> Result<u64>;
    // 全体学年切换
    async fn promote_all(&self, rules: &ProgressionRules) -> Result<SweepSummary>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
