use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::BatchService;
use super::create::ensure_course_exists;
use crate::models::batches::requests::BatchRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_batch(
    service: &BatchService,
    request: &HttpRequest,
    batch_id: i64,
    batch_data: BatchRequest,
) -> ActixResult<HttpResponse> {
    let (name, course_id) = match batch_data.into_parts() {
        Ok(parts) => parts,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request);

    if let Err(resp) = ensure_course_exists(&storage, course_id).await {
        return Ok(resp);
    }

    match storage.update_batch(batch_id, &name, course_id).await {
        Ok(Some(batch)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(batch, "Batch updated successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BatchNotFound,
            "Batch not found",
        ))),
        Err(e) => {
            error!("Batch update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Batch update failed: {e}"),
                )),
            )
        }
    }
}
