use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ProgressionService;
use crate::models::progression::requests::CohortRequest;
use crate::models::progression::responses::ClearanceResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 只读预览，不做任何修改
pub async fn check_clearance(
    service: &ProgressionService,
    request: &HttpRequest,
    cohort_data: CohortRequest,
) -> ActixResult<HttpResponse> {
    let cohort = match cohort_data.into_selector() {
        Ok(cohort) => cohort,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request);
    let _guard = service.locks().lock_cohorts(&[&cohort]).await;

    match storage.check_cohort_clearance(&cohort).await {
        Ok(clearance) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClearanceResponse {
                cleared: clearance.is_cleared(),
                blocking_ids: clearance.blocking_ids().to_vec(),
            },
            "Clearance checked successfully",
        ))),
        Err(e) => {
            error!("Clearance check for {} failed: {}", cohort, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Clearance check failed: {e}"),
                )),
            )
        }
    }
}
