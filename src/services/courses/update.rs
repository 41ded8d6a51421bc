use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::errors::SMSError;
use crate::models::courses::requests::CourseRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    course_data: CourseRequest,
) -> ActixResult<HttpResponse> {
    let name = match course_data.into_name() {
        Ok(name) => name,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request);

    match storage.update_course(course_id, &name).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(course, "Course updated successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(SMSError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::CourseAlreadyExists, msg),
        )),
        Err(e) => {
            error!("Course update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Course update failed: {e}"),
                )),
            )
        }
    }
}
