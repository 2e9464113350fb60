use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Monthly fee schedule, loaded as the `billing` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub monthly_fee: BigDecimal,
    pub late_penalty: BigDecimal,
    /// Last day of the month on which the current month may still be paid without penalty.
    pub due_day: u32,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            monthly_fee: BigDecimal::from(150),
            late_penalty: BigDecimal::from(50),
            due_day: 7,
        }
    }
}

impl FeeSchedule {
    /// Amount owed for one unpaid month.
    pub fn fee_for(&self, is_late: bool) -> BigDecimal {
        if is_late {
            &self.monthly_fee + &self.late_penalty
        } else {
            self.monthly_fee.clone()
        }
    }
}
