use bigdecimal::{BigDecimal, Zero};
use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashSet;

use crate::models::{
    ContributionRecord, ContributionStatus, ContributionType, FeeSchedule, InvoiceDetails,
    MonthlyFee,
};

/// A record settles a month only if it is an approved monthly contribution.
pub fn qualifies_as_monthly_payment(record: &ContributionRecord) -> bool {
    record.contribution_type == ContributionType::Monthly
        && record.status == ContributionStatus::Approved
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Last day of the month starting at `month`.
fn month_end(month: NaiveDate) -> NaiveDate {
    month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Month starts from the month of `start` through the month of `end`, inclusive.
pub fn months_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    if start > end {
        return months;
    }

    let last = month_start(end);
    let mut current = month_start(start);
    while current <= last {
        months.push(current);
        match current.checked_add_months(Months::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }
    months
}

/// Arrears calculator: unpaid months, late penalties and totals for one member
#[derive(Debug, Clone, Default)]
pub struct ArrearsCalculator {
    fees: FeeSchedule,
}

impl ArrearsCalculator {
    pub fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// A month is late once the due day of the current month has passed,
    /// or once the month has fully elapsed.
    pub fn is_late(&self, month: NaiveDate, today: NaiveDate) -> bool {
        let month = month_start(month);
        let current_past_due = month == month_start(today) && today.day() > self.fees.due_day;
        current_past_due || month_end(month) < today
    }

    /// Unpaid months between `start` and `end` (inclusive, month granularity),
    /// in chronological order. `today` drives lateness for every month.
    pub fn calculate_unpaid_months(
        &self,
        contributions: &[ContributionRecord],
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Vec<MonthlyFee> {
        let months = months_in_range(start, end);
        if months.is_empty() {
            return Vec::new();
        }

        let covered: HashSet<NaiveDate> = contributions
            .iter()
            .filter(|c| qualifies_as_monthly_payment(c))
            .map(|c| month_start(c.date))
            .collect();

        let unpaid: Vec<MonthlyFee> = months
            .into_iter()
            .filter(|m| !covered.contains(m))
            .map(|month| {
                let is_late = self.is_late(month, today);
                MonthlyFee {
                    month,
                    amount: self.fees.fee_for(is_late),
                    is_late,
                }
            })
            .collect();

        tracing::debug!(
            "Arrears {}..{} as of {}: {} covered months, {} unpaid",
            start,
            end,
            today,
            covered.len(),
            unpaid.len()
        );

        unpaid
    }

    /// Sum of the unpaid month amounts.
    pub fn calculate_invoice_amount(unpaid_months: &[MonthlyFee]) -> BigDecimal {
        unpaid_months
            .iter()
            .fold(BigDecimal::zero(), |acc, m| acc + &m.amount)
    }

    /// Arrears from `join_date` through `today`.
    pub fn generate_invoice_details(
        &self,
        contributions: &[ContributionRecord],
        join_date: NaiveDate,
        today: NaiveDate,
    ) -> InvoiceDetails {
        let unpaid_months = self.calculate_unpaid_months(contributions, join_date, today, today);
        let total_amount = Self::calculate_invoice_amount(&unpaid_months);

        InvoiceDetails {
            unpaid_months,
            total_amount,
            monthly_fee: self.fees.monthly_fee.clone(),
            late_penalty: self.fees.late_penalty.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(date: NaiveDate, kind: ContributionType, status: ContributionStatus) -> ContributionRecord {
        ContributionRecord::new(1, date, BigDecimal::from(150), kind, status)
    }

    fn approved_monthly(date: NaiveDate) -> ContributionRecord {
        record(date, ContributionType::Monthly, ContributionStatus::Approved)
    }

    #[test]
    fn predicate_requires_monthly_and_approved() {
        let day = d(2024, 1, 10);
        assert!(qualifies_as_monthly_payment(&approved_monthly(day)));
        assert!(!qualifies_as_monthly_payment(&record(day, ContributionType::Registration, ContributionStatus::Approved)));
        assert!(!qualifies_as_monthly_payment(&record(day, ContributionType::Other, ContributionStatus::Approved)));
        assert!(!qualifies_as_monthly_payment(&record(day, ContributionType::Monthly, ContributionStatus::Pending)));
        assert!(!qualifies_as_monthly_payment(&record(day, ContributionType::Monthly, ContributionStatus::Rejected)));
    }

    #[test]
    fn months_in_range_wraps_years() {
        let months = months_in_range(d(2023, 11, 30), d(2024, 2, 1));
        assert_eq!(months, vec![d(2023, 11, 1), d(2023, 12, 1), d(2024, 1, 1), d(2024, 2, 1)]);
    }

    #[test]
    fn months_in_range_same_month_and_reversed() {
        assert_eq!(months_in_range(d(2024, 5, 3), d(2024, 5, 28)), vec![d(2024, 5, 1)]);
        assert!(months_in_range(d(2024, 5, 20), d(2024, 5, 10)).is_empty());
        assert!(months_in_range(d(2024, 6, 1), d(2024, 5, 1)).is_empty());
    }

    #[test]
    fn late_after_due_day_in_current_month() {
        let calc = ArrearsCalculator::default();
        let details = calc.generate_invoice_details(&[], d(2024, 1, 15), d(2024, 1, 20));
        assert_eq!(
            details.unpaid_months,
            vec![MonthlyFee { month: d(2024, 1, 1), amount: BigDecimal::from(200), is_late: true }]
        );
        assert_eq!(details.total_amount, BigDecimal::from(200));
    }

    #[test]
    fn not_late_before_due_day() {
        let calc = ArrearsCalculator::default();
        let details = calc.generate_invoice_details(&[], d(2024, 1, 1), d(2024, 1, 3));
        assert_eq!(
            details.unpaid_months,
            vec![MonthlyFee { month: d(2024, 1, 1), amount: BigDecimal::from(150), is_late: false }]
        );
        assert_eq!(details.total_amount, BigDecimal::from(150));
        assert_eq!(details.monthly_fee, BigDecimal::from(150));
        assert_eq!(details.late_penalty, BigDecimal::from(50));
    }

    #[test]
    fn due_day_itself_is_not_late() {
        let calc = ArrearsCalculator::default();
        assert!(!calc.is_late(d(2024, 3, 1), d(2024, 3, 7)));
        assert!(calc.is_late(d(2024, 3, 1), d(2024, 3, 8)));
    }

    #[test]
    fn elapsed_month_is_late_and_future_month_is_not() {
        let calc = ArrearsCalculator::default();
        assert!(calc.is_late(d(2024, 2, 1), d(2024, 3, 1)));
        assert!(!calc.is_late(d(2024, 4, 1), d(2024, 3, 20)));
    }

    #[test]
    fn covered_month_is_skipped() {
        let calc = ArrearsCalculator::default();
        let contributions = vec![approved_monthly(d(2024, 2, 10))];
        let details = calc.generate_invoice_details(&contributions, d(2024, 1, 1), d(2024, 3, 15));

        let months: Vec<_> = details.unpaid_months.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![d(2024, 1, 1), d(2024, 3, 1)]);
        assert!(details.unpaid_months.iter().all(|m| m.is_late));
        assert_eq!(details.total_amount, BigDecimal::from(400));
    }

    #[test]
    fn registration_does_not_cover_month() {
        let calc = ArrearsCalculator::default();
        let contributions = vec![record(d(2024, 1, 10), ContributionType::Registration, ContributionStatus::Approved)];
        let details = calc.generate_invoice_details(&contributions, d(2024, 1, 1), d(2024, 2, 1));

        assert_eq!(details.unpaid_months[0], MonthlyFee { month: d(2024, 1, 1), amount: BigDecimal::from(200), is_late: true });
        // February: current month, before the due day.
        assert_eq!(details.unpaid_months[1], MonthlyFee { month: d(2024, 2, 1), amount: BigDecimal::from(150), is_late: false });
        assert_eq!(details.total_amount, BigDecimal::from(350));
    }

    #[test]
    fn january_only_range_with_registration() {
        let calc = ArrearsCalculator::default();
        let contributions = vec![record(d(2024, 1, 10), ContributionType::Registration, ContributionStatus::Approved)];
        let unpaid = calc.calculate_unpaid_months(&contributions, d(2024, 1, 1), d(2024, 1, 31), d(2024, 2, 1));

        assert_eq!(unpaid, vec![MonthlyFee { month: d(2024, 1, 1), amount: BigDecimal::from(200), is_late: true }]);
        assert_eq!(ArrearsCalculator::calculate_invoice_amount(&unpaid), BigDecimal::from(200));
    }

    #[test]
    fn future_join_date_owes_nothing() {
        let calc = ArrearsCalculator::default();
        let details = calc.generate_invoice_details(&[], d(2024, 6, 1), d(2024, 5, 1));
        assert!(details.unpaid_months.is_empty());
        assert_eq!(details.total_amount, BigDecimal::zero());
    }

    #[test]
    fn duplicate_and_small_payments_fully_cover() {
        let calc = ArrearsCalculator::default();
        let mut tiny = approved_monthly(d(2024, 1, 2));
        tiny.amount = "0.01".parse().unwrap();
        let contributions = vec![tiny, approved_monthly(d(2024, 1, 28))];
        let unpaid = calc.calculate_unpaid_months(&contributions, d(2024, 1, 1), d(2024, 1, 31), d(2024, 1, 31));
        assert!(unpaid.is_empty());
    }

    #[test]
    fn custom_schedule_is_reported() {
        let calc = ArrearsCalculator::new(FeeSchedule {
            monthly_fee: "120.50".parse().unwrap(),
            late_penalty: "10.25".parse().unwrap(),
            due_day: 15,
        });
        let details = calc.generate_invoice_details(&[], d(2024, 1, 1), d(2024, 2, 10));

        assert_eq!(details.unpaid_months.len(), 2);
        assert_eq!(details.unpaid_months[0].amount, "130.75".parse::<BigDecimal>().unwrap());
        assert_eq!(details.unpaid_months[1].amount, "120.50".parse::<BigDecimal>().unwrap());
        assert_eq!(details.total_amount, "251.25".parse::<BigDecimal>().unwrap());
        assert_eq!(details.monthly_fee, "120.50".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn empty_invoice_amount_is_zero() {
        assert_eq!(ArrearsCalculator::calculate_invoice_amount(&[]), BigDecimal::zero());
    }
}
