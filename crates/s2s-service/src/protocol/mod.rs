//! The generic share-protocol engine and the capabilities it is composed of.

pub mod building;
pub mod engine;
pub mod interface;
pub mod kind;
pub mod persister;
pub mod processed;
pub mod processing;

pub use engine::{SaveMode, ShareProtocol};
pub use interface::SormasToSormasEntityInterface;
pub use kind::{ProcessedDataPersister, ReceivedDataProcessor, ShareData, ShareDataBuilder, ShareKind};
pub use persister::ChangeSetPersister;
pub use processed::{AssociatedRecord, ProcessedAssociate, ProcessedData};
