use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::batches::requests::{BatchListQuery, BatchRequest};
use crate::services::BatchService;

// 懒加载的全局 BATCH_SERVICE 实例
static BATCH_SERVICE: Lazy<BatchService> = Lazy::new(BatchService::new_lazy);

// HTTP处理程序
pub async fn list_batches(
    req: HttpRequest,
    query: web::Query<BatchListQuery>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.list_batches(&req, query.into_inner()).await
}

pub async fn create_batch(
    req: HttpRequest,
    batch_data: web::Json<BatchRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .create_batch(&req, batch_data.into_inner())
        .await
}

pub async fn update_batch(
    req: HttpRequest,
    batch_id: web::Path<i64>,
    batch_data: web::Json<BatchRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .update_batch(&req, batch_id.into_inner(), batch_data.into_inner())
        .await
}

pub async fn delete_batch(req: HttpRequest, batch_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.delete_batch(&req, batch_id.into_inner()).await
}

// 配置路由
pub fn configure_batch_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/batches")
            .service(
                web::resource("")
                    .route(web::get().to(list_batches))
                    .route(web::post().to(create_batch)),
            )
            .service(
                web::resource("/{batch_id}")
                    .route(web::put().to(update_batch))
                    .route(web::delete().to(delete_batch)),
            ),
    );
}
