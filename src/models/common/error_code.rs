use serde::Serialize;

// 业务错误码
//
// 0 表示成功；1xxx 为通用错误；2xxx 为档案管理错误；3xxx 为升级/毕业流程错误；5xxx 为服务端错误
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,

    // 课程
    CourseNotFound = 2001,
    CourseAlreadyExists = 2002,
    CourseInUse = 2003,

    // 批次
    BatchNotFound = 2101,
    BatchInUse = 2102,
    BatchCreationFailed = 2103,

    // 学生
    StudentNotFound = 2201,
    StudentCreationFailed = 2202,

    // 缴费
    FeePaymentFailed = 2301,

    // 升级 / 毕业
    FeesUnpaid = 3001,
    PromotionFailed = 3002,
    PassoutFailed = 3003,
    SweepFailed = 3004,

    InternalServerError = 5000,
}
