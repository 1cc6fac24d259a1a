//! Cases: shared together with their contacts and samples.

pub mod builder;
pub mod processor;

use s2s_entity::case::Case;
use s2s_entity::share::CaseShareDto;

use crate::protocol::ShareKind;

pub use builder::CaseShareDataBuilder;
pub use processor::CaseReceivedDataProcessor;

/// The case entity kind.
#[derive(Debug, Clone, Copy)]
pub struct CaseKind;

impl ShareKind for CaseKind {
    type Entity = Case;
    type Envelope = CaseShareDto;
    const ENDPOINT: &'static str = "/cases";
}
