//! Resource facades over the request core.
//!
//! Each facade holds the shared transport and only formats paths, query
//! strings and bodies; all network behavior lives in [`crate::http`].

mod customer;
mod disbursement;
mod milestone;
mod partner;
mod payment;
mod query;
mod transaction;

pub use customer::CustomerApi;
pub use disbursement::DisbursementApi;
pub use milestone::MilestoneApi;
pub use partner::PartnerApi;
pub use payment::PaymentApi;
pub use query::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, FilterValue, ListParams, SortDirection,
};
pub use transaction::TransactionApi;
