#![allow(dead_code)]

use std::sync::Arc;

use rust_sms_next::config::DatabaseConfig;
use rust_sms_next::models::fees::requests::NewFeePayment;
use rust_sms_next::models::students::requests::StudentForm;
use rust_sms_next::progression::CohortSelector;
use rust_sms_next::storage::Storage;
use rust_sms_next::storage::sea_orm_storage::SeaOrmStorage;

/// 每个测试独立的内存数据库（单连接，迁移已执行）
pub async fn memory_storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage");
    Arc::new(storage)
}

pub fn cohort(batch_id: i64, year: &str, semester: &str) -> CohortSelector {
    CohortSelector {
        batch_id,
        year: year.to_string(),
        semester: semester.to_string(),
    }
}

pub fn student_form(
    name: &str,
    course_id: i64,
    batch_id: i64,
    year: &str,
    semester: &str,
    fees_total: Option<f64>,
) -> StudentForm {
    StudentForm {
        name: name.to_string(),
        father_name: format!("{name} Sr."),
        dob: "2005-01-01".to_string(),
        mobile: "9000000000".to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        gender: "Female".to_string(),
        admission_date: "2024-07-01".to_string(),
        year: year.to_string(),
        semester: semester.to_string(),
        course_id,
        batch_id,
        fees_total,
    }
}

pub async fn enroll(
    storage: &Arc<dyn Storage>,
    name: &str,
    course_id: i64,
    batch_id: i64,
    year: &str,
    semester: &str,
    fees_total: Option<f64>,
) -> i64 {
    storage
        .create_student(student_form(
            name, course_id, batch_id, year, semester, fees_total,
        ))
        .await
        .expect("create student")
        .id
}

pub async fn pay(storage: &Arc<dyn Storage>, student_id: i64, amount: f64, date: &str) {
    storage
        .add_fee_payment(
            student_id,
            NewFeePayment {
                amount,
                mode: "Cash".to_string(),
                date: date.to_string(),
                note: None,
            },
        )
        .await
        .expect("add payment");
}
