//! Share ledger records, share options, and wire envelopes.

pub mod associated;
pub mod association;
pub mod envelope;
pub mod info;
pub mod options;
pub mod origin;

pub use associated::AssociatedEntityWrapper;
pub use association::{AssociationKind, ShareAssociation};
pub use envelope::{CaseShareDto, ContactShareDto, EventShareDto, ShareEnvelope};
pub use info::{ShareInfo, is_edit_allowed};
pub use options::ShareOptions;
pub use origin::{OriginInfo, ShareOrigin};
