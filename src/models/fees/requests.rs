use crate::errors::{Result, SMSError};
use crate::utils::RequiredFields;
use crate::utils::validate::{validate_amount, validate_date};
use serde::Deserialize;
use ts_rs::TS;

// 登记缴费请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct AddFeePaymentRequest {
    pub amount: Option<f64>,
    pub mode: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
}

// 校验通过后的缴费记录（用于存储层）
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeePayment {
    pub amount: f64,
    pub mode: String,
    pub date: String,
    pub note: Option<String>,
}

// 收费汇总查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeeSummaryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub mode: Option<String>,
}

impl AddFeePaymentRequest {
    /// 校验金额、方式与日期；备注为空串时视为未填写
    pub fn into_payment(self) -> Result<NewFeePayment> {
        let mut fields = RequiredFields::new();
        let amount = fields.present("amount", self.amount);
        let mode = fields.text("mode", self.mode);
        let date = fields.text("date", self.date);
        fields.finish().map_err(SMSError::validation)?;

        validate_amount(amount).map_err(SMSError::validation)?;
        validate_date(&date).map_err(SMSError::validation)?;

        Ok(NewFeePayment {
            amount,
            mode,
            date,
            note: self
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }
}
