use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One unpaid month and what it costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFee {
    /// First day of the month.
    pub month: NaiveDate,
    pub amount: BigDecimal,
    pub is_late: bool,
}

/// Arrears summary for a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails {
    pub unpaid_months: Vec<MonthlyFee>,
    pub total_amount: BigDecimal,
    pub monthly_fee: BigDecimal,
    pub late_penalty: BigDecimal,
}

/// Invoice for a member as of a given day (API / batch unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInvoice {
    pub member_id: i64,
    pub full_name: String,
    pub as_of: NaiveDate,
    pub details: InvoiceDetails,
}
