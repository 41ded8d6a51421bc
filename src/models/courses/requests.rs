use crate::errors::SMSError;
use crate::utils::RequiredFields;
use serde::Deserialize;
use ts_rs::TS;

// 创建/重命名课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseRequest {
    pub name: Option<String>,
}

impl CourseRequest {
    /// 校验并取出课程名称
    pub fn into_name(self) -> crate::errors::Result<String> {
        let mut fields = RequiredFields::new();
        let name = fields.text("name", self.name);
        fields.finish().map_err(SMSError::validation)?;
        Ok(name)
    }
}
