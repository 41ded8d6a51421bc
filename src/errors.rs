//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_sms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SMSError {
            $($variant(String),)*
        }

        impl SMSError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SMSError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SMSError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SMSError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SMSError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SMSError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_sms_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    Serialization("E007", "Serialization Error"),
}

impl SMSError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SMSError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SMSError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SMSError {
    fn from(err: sea_orm::DbErr) -> Self {
        SMSError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SMSError {
    fn from(err: serde_json::Error) -> Self {
        SMSError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SMSError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SMSError::database_config("test").code(), "E001");
        assert_eq!(SMSError::database_operation("test").code(), "E003");
        assert_eq!(SMSError::validation("test").code(), "E004");
        assert_eq!(SMSError::conflict("test").code(), "E006");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SMSError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(SMSError::validation("test").error_type(), "Validation Error");
    }

    #[test]
    fn test_error_message() {
        let err = SMSError::validation("from_year is required");
        assert_eq!(err.message(), "from_year is required");
    }

    #[test]
    fn test_db_err_maps_to_database_operation() {
        let err: SMSError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.format_simple().contains("boom"));
    }

    #[test]
    fn test_json_err_maps_to_serialization() {
        let err: SMSError = serde_json::from_str::<i64>("x").unwrap_err().into();
        assert_eq!(err.code(), "E007");
    }
}
