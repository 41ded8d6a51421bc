use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ProgressionService;
use crate::models::progression::requests::CohortRequest;
use crate::models::progression::responses::PassoutResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 班组毕业不做缴费校验
pub async fn passout_cohort(
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

    match storage.passout_cohort(&cohort).await {
        Ok(deleted_count) => {
            info!("Passed out {} student(s) from {}", deleted_count, cohort);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PassoutResponse { deleted_count },
                "Cohort passed out successfully",
            )))
        }
        Err(e) => {
            error!("Passout of {} failed: {}", cohort, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::PassoutFailed,
                    format!("Passout failed: {e}"),
                )),
            )
        }
    }
}
