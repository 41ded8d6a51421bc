use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::fees::requests::{AddFeePaymentRequest, FeeSummaryQuery};
use crate::services::FeeService;

// 懒加载的全局 FEE_SERVICE 实例
static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

// HTTP处理程序
pub async fn add_fee_payment(
    req: HttpRequest,
    student_id: web::Path<i64>,
    payment: web::Json<AddFeePaymentRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .add_payment(&req, student_id.into_inner(), payment.into_inner())
        .await
}

pub async fn list_fee_history(
    req: HttpRequest,
    student_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .list_history(&req, student_id.into_inner())
        .await
}

pub async fn fee_collection_summary(
    req: HttpRequest,
    query: web::Query<FeeSummaryQuery>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .collection_summary(&req, query.into_inner())
        .await
}

// 配置路由；学生名下的流水路由见 students 模块
pub fn configure_fee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fees")
            .route("/summary", web::get().to(fee_collection_summary)),
    );
}
