use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::progression::requests::{CohortRequest, PromoteCohortRequest};
use crate::services::ProgressionService;

// 懒加载的全局 PROGRESSION_SERVICE 实例，同时持有进程内的班组锁
static PROGRESSION_SERVICE: Lazy<ProgressionService> = Lazy::new(ProgressionService::new_lazy);

// HTTP处理程序
pub async fn promote_cohort(
    req: HttpRequest,
    promote_data: web::Json<PromoteCohortRequest>,
) -> ActixResult<HttpResponse> {
    PROGRESSION_SERVICE
        .promote_cohort(&req, promote_data.into_inner())
        .await
}

pub async fn passout_cohort(
    req: HttpRequest,
    cohort_data: web::Json<CohortRequest>,
) -> ActixResult<HttpResponse> {
    PROGRESSION_SERVICE
        .passout_cohort(&req, cohort_data.into_inner())
        .await
}

pub async fn promote_all(req: HttpRequest) -> ActixResult<HttpResponse> {
    PROGRESSION_SERVICE.promote_all(&req).await
}

pub async fn check_clearance(
    req: HttpRequest,
    query: web::Query<CohortRequest>,
) -> ActixResult<HttpResponse> {
    PROGRESSION_SERVICE
        .check_clearance(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_progression_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/progression")
            .route("/promote-cohort", web::post().to(promote_cohort))
            .route("/passout-cohort", web::post().to(passout_cohort))
            .route("/promote-all", web::post().to(promote_all))
            .route("/clearance", web::get().to(check_clearance)),
    );
}
