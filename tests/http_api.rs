mod common;

use actix_web::{App, test, web};
use serde_json::{Value, json};

use common::{enroll, memory_storage, pay};
use rust_sms_next::progression::ProgressionRules;
use rust_sms_next::routes;
use rust_sms_next::utils::{json_error_handler, query_error_handler};

macro_rules! app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(ProgressionRules::default()))
                .configure(routes::configure_course_routes)
                .configure(routes::configure_batch_routes)
                .configure(routes::configure_student_routes)
                .configure(routes::configure_fee_routes)
                .configure(routes::configure_progression_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_course_crud_over_http() {
    let storage = memory_storage().await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .set_json(json!({ "name": "B.Com." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let course_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .set_json(json!({ "name": "B.Com." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let req = test::TestRequest::post()
        .uri("/api/v1/batches")
        .set_json(json!({ "name": "2024-25", "course_id": course_id }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    // 仍有批次引用，拒绝删除
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/courses/{course_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2003);
}

#[actix_web::test]
async fn test_promote_cohort_requires_all_fields() {
    let storage = memory_storage().await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/progression/promote-cohort")
        .set_json(json!({ "from_batch_id": 1, "from_year": "1st Year" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);
    assert_eq!(
        body["message"],
        "Missing required fields: from_semester"
    );
}

#[actix_web::test]
async fn test_promote_cohort_blocked_then_promoted() {
    let storage = memory_storage().await;
    let course = storage.create_course("B.Com.").await.unwrap();
    let batch = storage.create_batch("2024-25", course.id).await.unwrap();
    let next = storage.create_batch("2025-26", course.id).await.unwrap();
    let student = enroll(
        &storage,
        "Asha",
        course.id,
        batch.id,
        "1st Year",
        "2nd Semester",
        Some(10000.0),
    )
    .await;
    pay(&storage, student, 9999.0, "2025-04-01").await;

    let app = app!(storage);
    let payload = json!({
        "from_batch_id": batch.id,
        "from_year": "1st Year",
        "from_semester": "2nd Semester",
        "to_batch_id": next.id,
        "to_year": "2nd Year",
        "to_semester": "3rd Semester",
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/progression/promote-cohort")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);
    assert_eq!(body["data"]["blocking_ids"], json!([student]));

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/students/{student}/fees"))
        .set_json(json!({ "amount": 1, "mode": "UPI", "date": "2025-04-02" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/progression/clearance?batch_id={}&year=1st%20Year&semester=2nd%20Semester",
            batch.id
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["cleared"], true);

    let req = test::TestRequest::post()
        .uri("/api/v1/progression/promote-cohort")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["promoted_count"], 1);
}

#[actix_web::test]
async fn test_passout_and_promote_all_over_http() {
    let storage = memory_storage().await;
    let course = storage.create_course("B.A.").await.unwrap();
    let batch = storage.create_batch("2023-24", course.id).await.unwrap();
    let next = storage.create_batch("2024-25", course.id).await.unwrap();
    enroll(
        &storage,
        "Asha",
        course.id,
        batch.id,
        "3rd Year",
        "6th Semester",
        Some(5000.0),
    )
    .await;
    let junior = enroll(
        &storage,
        "Ravi",
        course.id,
        batch.id,
        "1st Year",
        "2nd Semester",
        None,
    )
    .await;

    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/progression/passout-cohort")
        .set_json(json!({ "batch_id": batch.id, "year": "3rd Year", "semester": "6th Semester" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["deleted_count"], 1);

    let req = test::TestRequest::post()
        .uri("/api/v1/progression/promote-all")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["promoted_count"], 1);
    assert_eq!(body["data"]["passout_count"], 0);

    let ravi = storage.get_student_by_id(junior).await.unwrap().unwrap();
    assert_eq!(ravi.batch_id, next.id);
    assert_eq!(ravi.year.as_deref(), Some("2nd Year"));
}

#[actix_web::test]
async fn test_malformed_json_uses_envelope() {
    let storage = memory_storage().await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}
