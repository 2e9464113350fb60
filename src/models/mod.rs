pub mod contribution;
pub mod fees;
pub mod invoice;
pub mod member;

pub use contribution::{ContributionRecord, ContributionStatus, ContributionType, UnknownVariant};
pub use fees::FeeSchedule;
pub use invoice::{InvoiceDetails, MemberInvoice, MonthlyFee};
pub use member::Member;
