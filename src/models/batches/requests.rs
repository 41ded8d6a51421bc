use crate::errors::{Result, SMSError};
use crate::utils::RequiredFields;
use serde::Deserialize;
use ts_rs::TS;

// 批次列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct BatchListQuery {
    pub course_id: Option<i64>,
}

// 创建/更新批次请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct BatchRequest {
    pub name: Option<String>,
    pub course_id: Option<i64>,
}

impl BatchRequest {
    /// 校验并拆分为 (名称, 课程ID)
    pub fn into_parts(self) -> Result<(String, i64)> {
        let mut fields = RequiredFields::new();
        let name = fields.text("name", self.name);
        let course_id = fields.id("course_id", self.course_id);
        fields.finish().map_err(SMSError::validation)?;
        Ok((name, course_id))
    }
}
