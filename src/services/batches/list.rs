use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::BatchService;
use crate::models::batches::requests::BatchListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_batches(
    service: &BatchService,
    request: &HttpRequest,
    query: BatchListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_batches(query.course_id).await {
        Ok(batches) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            batches,
            "Batches retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list batches: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list batches: {e}"),
                )),
            )
        }
    }
}
