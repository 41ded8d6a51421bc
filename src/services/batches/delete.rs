use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::BatchService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_batch(
    service: &BatchService,
    request: &HttpRequest,
    batch_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_students_by_batch(batch_id).await {
        Ok(0) => {}
        Ok(count) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::BatchInUse,
                format!("Batch still has {count} enrolled student(s)"),
            )));
        }
        Err(e) => {
            error!("Failed to count students in batch: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check batch usage: {e}"),
                )),
            );
        }
    }

    match storage.delete_batch(batch_id).await {
        Ok(true) => {
            info!("Batch {} deleted", batch_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Batch deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BatchNotFound,
            "Batch not found",
        ))),
        Err(e) => {
            error!("Batch deletion failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Batch deletion failed: {e}"),
                )),
            )
        }
    }
}
