use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::BatchService;
use crate::models::batches::requests::BatchRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn create_batch(
    service: &BatchService,
    request: &HttpRequest,
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

    match storage.create_batch(&name, course_id).await {
        Ok(batch) => {
            info!("Batch {} created for course {}", batch.name, course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(batch, "Batch created successfully")))
        }
        Err(e) => {
            error!("Batch creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::BatchCreationFailed,
                    format!("Batch creation failed: {e}"),
                )),
            )
        }
    }
}

/// 课程存在性校验
pub(super) async fn ensure_course_exists(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            error!("Failed to get course by id: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching course",
                )),
            )
        }
    }
}
