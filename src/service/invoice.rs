use crate::db::queries;
use crate::error::{AppError, Result};
use crate::models::{ContributionRecord, FeeSchedule, Member, MemberInvoice};
use crate::service::{ArrearsCalculator, Clock, SystemClock};
use chrono::NaiveDate;
use indexmap::IndexMap;
use rayon::prelude::*;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;

/// Invoice service: joins the member and contribution stores with the arrears calculator
pub struct InvoiceService {
    pool: PgPool,
    calculator: ArrearsCalculator,
    clock: Arc<dyn Clock>,
}

impl InvoiceService {
    pub fn new(pool: PgPool, fees: FeeSchedule) -> Self {
        Self::with_clock(pool, fees, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: PgPool, fees: FeeSchedule, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            calculator: ArrearsCalculator::new(fees),
            clock,
        }
    }

    /// Evaluation day used when a caller does not pin one.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Invoice for a single member as of `today`
    pub async fn member_invoice(&self, member_id: i64, today: NaiveDate) -> Result<MemberInvoice> {
        let (member, contributions) = futures::try_join!(
            queries::get_member(&self.pool, member_id),
            queries::list_contributions(&self.pool, member_id),
        )?;
        let Some(member) = member else {
            return Err(AppError::MemberNotFound(member_id));
        };

        let invoice = invoice_for(&self.calculator, member, &contributions, today);
        tracing::info!(
            "Member {} as of {}: {} unpaid months, total {}",
            member_id,
            today,
            invoice.details.unpaid_months.len(),
            invoice.details.total_amount
        );
        Ok(invoice)
    }

    /// Invoices for many members. Unknown ids are skipped.
    pub async fn batch_invoices(&self, member_ids: &[i64], today: NaiveDate) -> Result<Vec<MemberInvoice>> {
        let (members, contributions) = futures::try_join!(
            queries::list_members(&self.pool, member_ids),
            queries::list_contributions_for_members(&self.pool, member_ids),
        )?;

        let found: HashSet<i64> = members.iter().map(|m| m.id).collect();
        for id in member_ids.iter().filter(|id| !found.contains(*id)) {
            tracing::warn!("Member {} not found, skipping", id);
        }

        tracing::info!(
            "Batch arrears as of {}: {} members, {} contributions",
            today,
            members.len(),
            contributions.len()
        );

        Ok(build_invoices(&self.calculator, members, contributions, today))
    }
}

fn invoice_for(
    calculator: &ArrearsCalculator,
    member: Member,
    contributions: &[ContributionRecord],
    today: NaiveDate,
) -> MemberInvoice {
    let details = calculator.generate_invoice_details(contributions, member.join_date, today);
    MemberInvoice {
        member_id: member.id,
        full_name: member.full_name,
        as_of: today,
        details,
    }
}

/// Group contributions per member and compute every invoice in parallel.
/// Output follows the order of `members`.
pub fn build_invoices(
    calculator: &ArrearsCalculator,
    members: Vec<Member>,
    contributions: Vec<ContributionRecord>,
    today: NaiveDate,
) -> Vec<MemberInvoice> {
    let mut by_member: IndexMap<i64, Vec<ContributionRecord>> = IndexMap::new();
    for c in contributions {
        by_member.entry(c.member_id).or_default().push(c);
    }

    members
        .into_par_iter()
        .map(|member| {
            let records = by_member.get(&member.id).map(Vec::as_slice).unwrap_or(&[]);
            invoice_for(calculator, member, records, today)
        })
        .collect()
}
