pub mod arrears;
pub mod clock;
pub mod export;
pub mod invoice;

pub use arrears::{months_in_range, qualifies_as_monthly_payment, ArrearsCalculator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use export::export_invoice_csv;
pub use invoice::{build_invoices, InvoiceService};
