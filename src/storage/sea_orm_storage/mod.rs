//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod batches;
mod courses;
mod fees;
mod progression;
mod students;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SMSError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 按指定数据库配置连接并运行迁移
    pub async fn connect(database: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, database).await?
        } else {
            Self::connect_generic(&db_url, database).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SMSError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 内存库不支持 WAL
        let journal_mode = if url.contains(":memory:") {
            SqliteJournalMode::Memory
        } else {
            SqliteJournalMode::Wal
        };

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SMSError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(journal_mode)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(database.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SMSError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(database.timeout))
            .acquire_timeout(Duration::from_secs(database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SMSError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SMSError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 课程模块
    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn create_course(&self, name: &str) -> Result<Course> {
        self.create_course_impl(name).await
    }

    async fn update_course(&self, course_id: i64, name: &str) -> Result<Option<Course>> {
        self.update_course_impl(course_id, name).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn count_batches_by_course(&self, course_id: i64) -> Result<u64> {
        self.count_batches_by_course_impl(course_id).await
    }

    async fn count_students_by_course(&self, course_id: i64) -> Result<u64> {
        self.count_students_by_course_impl(course_id).await
    }

    // 批次模块
    async fn list_batches(&self, course_id: Option<i64>) -> Result<Vec<Batch>> {
        self.list_batches_impl(course_id).await
    }

    async fn get_batch_by_id(&self, batch_id: i64) -> Result<Option<Batch>> {
        self.get_batch_by_id_impl(batch_id).await
    }

    async fn find_batch(&self, name: &str, course_id: i64) -> Result<Option<Batch>> {
        self.find_batch_impl(name, course_id).await
    }

    async fn create_batch(&self, name: &str, course_id: i64) -> Result<Batch> {
        self.create_batch_impl(name, course_id).await
    }

    async fn update_batch(
        &self,
        batch_id: i64,
        name: &str,
        course_id: i64,
    ) -> Result<Option<Batch>> {
        self.update_batch_impl(batch_id, name, course_id).await
    }

    async fn delete_batch(&self, batch_id: i64) -> Result<bool> {
        self.delete_batch_impl(batch_id).await
    }

    async fn count_students_by_batch(&self, batch_id: i64) -> Result<u64> {
        self.count_students_by_batch_impl(batch_id).await
    }

    // 学生模块
    async fn create_student(&self, form: StudentForm) -> Result<Student> {
        self.create_student_impl(form).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_by_cohort(&self, cohort: &CohortSelector) -> Result<Vec<Student>> {
        self.list_students_by_cohort_impl(cohort).await
    }

    async fn update_student(&self, student_id: i64, form: StudentForm) -> Result<Option<Student>> {
        self.update_student_impl(student_id, form).await
    }

    async fn delete_student(&self, student_id: i64) -> Result<bool> {
        self.delete_student_impl(student_id).await
    }

    // 缴费模块
    async fn add_fee_payment(
        &self,
        student_id: i64,
        payment: NewFeePayment,
    ) -> Result<FeePayment> {
        self.add_fee_payment_impl(student_id, payment).await
    }

    async fn list_fee_payments(&self, student_id: i64) -> Result<Vec<FeePayment>> {
        self.list_fee_payments_impl(student_id).await
    }

    async fn sum_payments_for(&self, student_id: i64) -> Result<f64> {
        self.sum_payments_for_impl(student_id).await
    }

    async fn fee_collection_summary(&self, query: FeeSummaryQuery) -> Result<Vec<FeeSummaryItem>> {
        self.fee_collection_summary_impl(query).await
    }

    // 升级模块
    async fn check_cohort_clearance(&self, cohort: &CohortSelector) -> Result<Clearance> {
        self.check_cohort_clearance_impl(cohort).await
    }

    async fn promote_cohort(
        &self,
        from: &CohortSelector,
        to: &CohortSelector,
    ) -> Result<PromoteCohortOutcome> {
        self.promote_cohort_impl(from, to).await
    }

    async fn passout_cohort(&self, cohort: &CohortSelector) -> Result<u64> {
        self.passout_cohort_impl(cohort).await
    }

    async fn promote_all(&self, rules: &ProgressionRules) -> Result<SweepSummary> {
        self.promote_all_impl(rules).await
    }
}
