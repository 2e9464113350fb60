use crate::error::Result;
use crate::models::MemberInvoice;
use bigdecimal::BigDecimal;
use std::io::Write;

fn money(amount: &BigDecimal) -> String {
    amount.round(2).with_scale(2).to_string()
}

/// Write arrears as CSV, one row per unpaid month.
pub fn export_invoice_csv<W: Write>(invoices: &[MemberInvoice], output: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(["member_id", "full_name", "month", "amount", "is_late"])?;

    for invoice in invoices {
        for fee in &invoice.details.unpaid_months {
            writer.write_record([
                invoice.member_id.to_string(),
                invoice.full_name.clone(),
                fee.month.format("%Y-%m").to_string(),
                money(&fee.amount),
                fee.is_late.to_string(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}
