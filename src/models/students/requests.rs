use crate::errors::{Result, SMSError};
use crate::models::common::PaginationQuery;
use crate::utils::RequiredFields;
use crate::utils::validate::{validate_email, validate_fees_total};
use serde::Deserialize;
use ts_rs::TS;

// 创建/更新学生请求（来自HTTP请求，字段在服务层统一校验）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentRequest {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub dob: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub admission_date: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub course_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub fees_total: Option<f64>,
}

// 校验通过后的学生档案（用于存储层）
#[derive(Debug, Clone, PartialEq)]
pub struct StudentForm {
    pub name: String,
    pub father_name: String,
    pub dob: String,
    pub mobile: String,
    pub email: String,
    pub gender: String,
    pub admission_date: String,
    pub year: String,
    pub semester: String,
    pub course_id: i64,
    pub batch_id: i64,
    pub fees_total: Option<f64>,
}

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
    pub batch_id: Option<i64>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub batch_id: Option<i64>,
}

impl From<StudentQueryParams> for StudentListQuery {
    fn from(params: StudentQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            course_id: params.course_id,
            batch_id: params.batch_id,
        }
    }
}

impl StudentRequest {
    /// 校验必填字段、邮箱格式与应缴总额
    pub fn into_form(self) -> Result<StudentForm> {
        let mut fields = RequiredFields::new();
        let name = fields.text("name", self.name);
        let father_name = fields.text("father_name", self.father_name);
        let dob = fields.text("dob", self.dob);
        let mobile = fields.text("mobile", self.mobile);
        let email = fields.text("email", self.email);
        let gender = fields.text("gender", self.gender);
        let admission_date = fields.text("admission_date", self.admission_date);
        let year = fields.text("year", self.year);
        let semester = fields.text("semester", self.semester);
        let course_id = fields.id("course_id", self.course_id);
        let batch_id = fields.id("batch_id", self.batch_id);
        fields.finish().map_err(SMSError::validation)?;

        validate_email(&email).map_err(SMSError::validation)?;
        if let Some(total) = self.fees_total {
            validate_fees_total(total).map_err(SMSError::validation)?;
        }

        Ok(StudentForm {
            name,
            father_name,
            dob,
            mobile,
            email,
            gender,
            admission_date,
            year,
            semester,
            course_id,
            batch_id,
            fees_total: self.fees_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> StudentRequest {
        StudentRequest {
            name: Some("Asha Verma".into()),
            father_name: Some("R. Verma".into()),
            dob: Some("2006-04-12".into()),
            mobile: Some("9876543210".into()),
            email: Some("asha@example.com".into()),
            gender: Some("Female".into()),
            admission_date: Some("2024-07-15".into()),
            year: Some("1st Year".into()),
            semester: Some("1st Semester".into()),
            course_id: Some(1),
            batch_id: Some(2),
            fees_total: Some(10000.0),
        }
    }

    #[test]
    fn test_complete_request_converts() {
        let form = complete().into_form().unwrap();
        assert_eq!(form.name, "Asha Verma");
        assert_eq!(form.batch_id, 2);
        assert_eq!(form.fees_total, Some(10000.0));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let req = StudentRequest {
            mobile: None,
            semester: Some(" ".into()),
            ..complete()
        };
        let err = req.into_form().unwrap_err();
        assert_eq!(err.message(), "Missing required fields: mobile, semester");
    }

    #[test]
    fn test_negative_fees_total_rejected() {
        let req = StudentRequest {
            fees_total: Some(-1.0),
            ..complete()
        };
        assert!(req.into_form().is_err());
    }
}
