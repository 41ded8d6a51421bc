use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::ProgressionService;
use crate::models::progression::requests::PromoteCohortRequest;
use crate::models::progression::responses::{FeesUnpaidResponse, PromoteCohortResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::progression::PromoteCohortOutcome;

pub async fn promote_cohort(
    service: &ProgressionService,
    request: &HttpRequest,
    promote_data: PromoteCohortRequest,
) -> ActixResult<HttpResponse> {
    // 校验在任何读取之前完成
    let (from, to) = match promote_data.into_selectors() {
        Ok(selectors) => selectors,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request);
    let _guard = service.locks().lock_cohorts(&[&from, &to]).await;

    match storage.promote_cohort(&from, &to).await {
        Ok(PromoteCohortOutcome::Promoted { promoted_count }) => {
            info!("Promoted {} student(s) from {} to {}", promoted_count, from, to);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PromoteCohortResponse { promoted_count },
                "Cohort promoted successfully",
            )))
        }
        Ok(PromoteCohortOutcome::Blocked { blocking_ids }) => {
            warn!(
                "Promotion of {} blocked, fees not cleared for {:?}",
                from, blocking_ids
            );
            let message = format!(
                "Cannot promote. Fees not fully paid for students: {blocking_ids:?}"
            );
            Ok(HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::FeesUnpaid,
                FeesUnpaidResponse { blocking_ids },
                message,
            )))
        }
        Err(e) => {
            error!("Promotion of {} failed: {}", from, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::PromotionFailed,
                    format!("Promotion failed: {e}"),
                )),
            )
        }
    }
}
