use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::students::requests::{StudentQueryParams, StudentRequest};
use crate::routes::fees;
use crate::services::StudentService;

// 懒加载的全局 STUDENT_SERVICE 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// HTTP处理程序
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentQueryParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(&req, query.into_inner())
        .await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<StudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn get_student(
    req: HttpRequest,
    student_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .get_student(&req, student_id.into_inner())
        .await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: web::Path<i64>,
    student_data: web::Json<StudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, student_id.into_inner(), student_data.into_inner())
        .await
}

pub async fn delete_student(
    req: HttpRequest,
    student_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .delete_student(&req, student_id.into_inner())
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(
                web::resource("/{student_id}")
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(delete_student)),
            )
            .service(
                // 缴费流水挂在学生下
                web::resource("/{student_id}/fees")
                    .route(web::get().to(fees::list_fee_history))
                    .route(web::post().to(fees::add_fee_payment)),
            ),
    );
}
