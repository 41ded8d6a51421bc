use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::FeeService;
use crate::models::{ApiResponse, ErrorCode};

/// 流水在学生删除后仍保留，因此不校验学生是否在册
pub async fn list_history(
    service: &FeeService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_fee_payments(student_id).await {
        Ok(history) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            history,
            "Fee history retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list fee history: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list fee history: {e}"),
                )),
            )
        }
    }
}
