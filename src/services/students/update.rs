use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{StudentService, check_enrollment};
use crate::models::students::requests::StudentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    student_data: StudentRequest,
) -> ActixResult<HttpResponse> {
    let form = match student_data.into_form() {
        Ok(form) => form,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request);

    if let Err(resp) = check_enrollment(&storage, form.course_id, form.batch_id).await {
        return Ok(resp);
    }

    match storage.update_student(student_id, form).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(student, "Student updated successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => {
            error!("Student update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Student update failed: {e}"),
                )),
            )
        }
    }
}
