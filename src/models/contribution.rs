use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Contribution category. Only `Monthly` settles a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionType {
    Monthly,
    Registration,
    Other,
}

/// Review state of a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

impl ContributionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionType::Monthly => "monthly",
            ContributionType::Registration => "registration",
            ContributionType::Other => "other",
        }
    }
}

impl FromStr for ContributionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(ContributionType::Monthly),
            "registration" => Ok(ContributionType::Registration),
            "other" => Ok(ContributionType::Other),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

impl TryFrom<String> for ContributionType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ContributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContributionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionStatus::Pending => "pending",
            ContributionStatus::Approved => "approved",
            ContributionStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ContributionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ContributionStatus::Pending),
            "approved" => Ok(ContributionStatus::Approved),
            "rejected" => Ok(ContributionStatus::Rejected),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

impl TryFrom<String> for ContributionStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contribution record (contributions table)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRecord {
    pub id: i64,
    pub member_id: i64,
    #[sqlx(rename = "contribution_date")]
    pub date: NaiveDate,
    pub amount: BigDecimal,
    #[sqlx(try_from = "String")]
    #[serde(rename = "type")]
    pub contribution_type: ContributionType,
    #[sqlx(try_from = "String")]
    pub status: ContributionStatus,
}

impl ContributionRecord {
    pub fn new(
        member_id: i64,
        date: NaiveDate,
        amount: BigDecimal,
        contribution_type: ContributionType,
        status: ContributionStatus,
    ) -> Self {
        Self {
            id: 0,
            member_id,
            date,
            amount,
            contribution_type,
            status,
        }
    }
}
