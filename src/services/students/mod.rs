pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::models::students::requests::{StudentQueryParams, StudentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 分页获取学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: StudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    // 整体更新学生档案
    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        student_data: StudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, student_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }
}

/// 课程与批次校验：两者都存在，且批次属于该课程
pub(crate) async fn check_enrollment(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    batch_id: i64,
) -> Result<(), HttpResponse> {
    let lookup = async {
        let course = storage.get_course_by_id(course_id).await?;
        let batch = storage.get_batch_by_id(batch_id).await?;
        Ok::<_, crate::errors::SMSError>((course, batch))
    };

    match lookup.await {
        Ok((None, _)) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Ok((_, None)) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BatchNotFound,
            "Batch not found",
        ))),
        Ok((Some(_), Some(batch))) if batch.course_id != course_id => {
            Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Batch does not belong to the selected course",
            )))
        }
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Failed to check enrollment: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking course and batch",
                )),
            )
        }
    }
}
