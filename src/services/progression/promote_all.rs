use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::ProgressionService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn promote_all(
    service: &ProgressionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let rules = service.get_rules(request);

    let _roster = service.locks().lock_roster().await;
    warn!("Academic-year sweep started");

    let result = storage.promote_all(&rules).await;
    // 此时没有任何班组锁被持有
    service.locks().prune();

    match result {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "All students promoted successfully",
        ))),
        Err(e) => {
            error!("Academic-year sweep failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::SweepFailed,
                    format!("Promote all failed: {e}"),
                )),
            )
        }
    }
}
