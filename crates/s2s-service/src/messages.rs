//! Validation and failure messages shown to operators.

/// The entity may not be edited, and therefore not be sent, on this instance.
pub const NOT_EDITABLE: &str = "Entity is not editable";

/// A new entity was received whose identifier is already known locally.
pub const ALREADY_EXISTS: &str = "Entity already exists";

/// An update was received for an entity that is not known locally.
pub const DOES_NOT_EXIST: &str = "Entity does not exist";

/// An entity occurs twice in one batch.
pub const DUPLICATE_IN_BATCH: &str = "Entity occurs more than once in the received data";

/// Only received entities can be returned.
pub const NOT_RECEIVED: &str = "Entity was not received from another organization";

/// A sample references neither the shared entity nor one of its contacts.
pub const SAMPLE_NOT_ASSOCIATED: &str = "Sample does not belong to the shared entity";

/// A participant references another event.
pub const PARTICIPANT_NOT_ASSOCIATED: &str = "Event participant does not belong to the shared event";

/// Summary of a batch rejected before sending.
pub const PRE_SEND_FAILED: &str = "Some entities could not be sent";

/// Sync was called for an organization the entity was never shared with.
pub const NOT_SHARED: &str = "Entity has not been shared with the organization";
