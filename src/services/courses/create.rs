use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::errors::SMSError;
use crate::models::courses::requests::CourseRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
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

    match storage.create_course(&name).await {
        Ok(course) => {
            info!("Course {} created with id {}", course.name, course.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(SMSError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::CourseAlreadyExists, msg),
        )),
        Err(e) => {
            error!("Course creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Course creation failed: {e}"),
                )),
            )
        }
    }
}
