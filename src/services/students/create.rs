use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, check_enrollment};
use crate::models::students::requests::StudentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
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

    match storage.create_student(form).await {
        Ok(student) => {
            info!("Student {} registered with id {}", student.name, student.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => {
            error!("Student creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentCreationFailed,
                    format!("Student creation failed: {e}"),
                )),
            )
        }
    }
}
