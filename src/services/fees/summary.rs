use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::FeeService;
use crate::models::fees::requests::FeeSummaryQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn collection_summary(
    service: &FeeService,
    request: &HttpRequest,
    query: FeeSummaryQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.fee_collection_summary(query).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Fee collection summary retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to build fee collection summary: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to build fee collection summary: {e}"),
                )),
            )
        }
    }
}
