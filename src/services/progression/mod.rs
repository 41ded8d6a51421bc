//! 升级与毕业服务
//!
//! 班组级操作在持有班组锁期间执行存储层事务；全体学年切换持有花名册写锁。

pub mod clearance;
pub mod passout;
pub mod promote;
pub mod promote_all;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::progression::requests::{CohortRequest, PromoteCohortRequest};
use crate::progression::{ProgressionLocks, ProgressionRules};
use crate::storage::Storage;

pub struct ProgressionService {
    storage: Option<Arc<dyn Storage>>,
    locks: ProgressionLocks,
}

impl ProgressionService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            locks: ProgressionLocks::new(),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_rules(&self, request: &HttpRequest) -> web::Data<ProgressionRules> {
        request
            .app_data::<web::Data<ProgressionRules>>()
            .expect("Progression rules not found in app data")
            .clone()
    }

    pub(crate) fn locks(&self) -> &ProgressionLocks {
        &self.locks
    }

    // 指定班组整体升级，全部结清才执行
    pub async fn promote_cohort(
        &self,
        request: &HttpRequest,
        promote_data: PromoteCohortRequest,
    ) -> ActixResult<HttpResponse> {
        promote::promote_cohort(self, request, promote_data).await
    }

    // 班组毕业
    pub async fn passout_cohort(
        &self,
        request: &HttpRequest,
        cohort_data: CohortRequest,
    ) -> ActixResult<HttpResponse> {
        passout::passout_cohort(self, request, cohort_data).await
    }

    // 全体学年切换
    pub async fn promote_all(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        promote_all::promote_all(self, request).await
    }

    // 缴费校验预览
    pub async fn check_clearance(
        &self,
        request: &HttpRequest,
        cohort_data: CohortRequest,
    ) -> ActixResult<HttpResponse> {
        clearance::check_clearance(self, request, cohort_data).await
    }
}
