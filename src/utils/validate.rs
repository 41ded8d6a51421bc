use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

/// 必填字段收集器
///
/// 逐个取值，缺失或空白的字段名会被记下，最后一次性报告全部缺失项。
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取文本字段（去除首尾空白）
    pub fn text(&mut self, name: &'static str, value: Option<String>) -> String {
        match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(v) => v,
            None => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// 取 ID 字段，必须为正数
    pub fn id(&mut self, name: &'static str, value: Option<i64>) -> i64 {
        match value.filter(|v| *v > 0) {
            Some(v) => v,
            None => {
                self.missing.push(name);
                0
            }
        }
    }

    /// 取任意非空字段，缺失时返回默认值
    pub fn present<T: Default>(&mut self, name: &'static str, value: Option<T>) -> T {
        match value {
            Some(v) => v,
            None => {
                self.missing.push(name);
                T::default()
            }
        }
    }

    pub fn finish(self) -> Result<(), String> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Missing required fields: {}",
                self.missing.join(", ")
            ))
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 缴费金额：必须为有限正数
pub fn validate_amount(amount: f64) -> Result<(), &'static str> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("Amount must be a positive number");
    }
    Ok(())
}

/// 应缴总额：允许为 0，不能为负
pub fn validate_fees_total(fees_total: f64) -> Result<(), &'static str> {
    if !fees_total.is_finite() || fees_total < 0.0 {
        return Err("fees_total must not be negative");
    }
    Ok(())
}

/// 日期格式 YYYY-MM-DD，收费汇总按字符串比较日期
pub fn validate_date(date: &str) -> Result<(), &'static str> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| "Date must be in YYYY-MM-DD format")
}
