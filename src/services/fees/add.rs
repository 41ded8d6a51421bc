use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::FeeService;
use crate::models::fees::requests::AddFeePaymentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn add_payment(
    service: &FeeService,
    request: &HttpRequest,
    student_id: i64,
    payment: AddFeePaymentRequest,
) -> ActixResult<HttpResponse> {
    let payment = match payment.into_payment() {
        Ok(payment) => payment,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request);

    // 只允许给在册学生登记
    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            error!("Failed to get student by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching student",
                )),
            );
        }
    }

    match storage.add_fee_payment(student_id, payment).await {
        Ok(record) => {
            info!(
                "Fee payment of {} ({}) recorded for student {}",
                record.amount, record.mode, student_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(record, "Fee payment recorded successfully")))
        }
        Err(e) => {
            error!("Fee payment failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FeePaymentFailed,
                    format!("Fee payment failed: {e}"),
                )),
            )
        }
    }
}
