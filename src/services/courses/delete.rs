use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 仍有批次或学生引用时拒绝删除
    let usage = async {
        let batches = storage.count_batches_by_course(course_id).await?;
        let students = storage.count_students_by_course(course_id).await?;
        Ok::<_, crate::errors::SMSError>((batches, students))
    };

    match usage.await {
        Ok((0, 0)) => {}
        Ok((batches, students)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseInUse,
                format!(
                    "Course is still referenced by {batches} batch(es) and {students} student(s)"
                ),
            )));
        }
        Err(e) => {
            error!("Failed to check course usage: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check course usage: {e}"),
                )),
            );
        }
    }

    match storage.delete_course(course_id).await {
        Ok(true) => {
            info!("Course {} deleted", course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            error!("Course deletion failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Course deletion failed: {e}"),
                )),
            )
        }
    }
}
