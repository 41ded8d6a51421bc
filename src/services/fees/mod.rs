pub mod add;
pub mod history;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::fees::requests::{AddFeePaymentRequest, FeeSummaryQuery};
use crate::storage::Storage;

pub struct FeeService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 登记缴费
    pub async fn add_payment(
        &self,
        request: &HttpRequest,
        student_id: i64,
        payment: AddFeePaymentRequest,
    ) -> ActixResult<HttpResponse> {
        add::add_payment(self, request, student_id, payment).await
    }

    // 缴费历史
    pub async fn list_history(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        history::list_history(self, request, student_id).await
    }

    // 收费汇总
    pub async fn collection_summary(
        &self,
        request: &HttpRequest,
        query: FeeSummaryQuery,
    ) -> ActixResult<HttpResponse> {
        summary::collection_summary(self, request, query).await
    }
}
