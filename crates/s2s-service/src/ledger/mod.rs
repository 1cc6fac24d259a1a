//! Share-info ledger: lookups, editability, and write planning.

pub mod planner;
pub mod service;

pub use planner::{ShareInfoWrite, ShareTarget, plan_ownership_returned, plan_return, plan_share, plan_sync};
pub use service::ShareInfoLedger;
