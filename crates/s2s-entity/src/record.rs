//! Common behavior of records exchanged through S2S.

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use s2s_core::types::OriginInfoId;

use crate::share::association::ShareAssociation;

/// A domain record that can be shared with another instance.
///
/// Records are identified by the same UUID on every instance. Received
/// records point at the [`crate::share::OriginInfo`] that describes where
/// they came from.
pub trait Record:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    /// Storage table of the record.
    const TABLE: &'static str;

    /// Caption used in validation messages, e.g. `"Case"`.
    const CAPTION: &'static str;

    /// Globally unique identifier.
    fn uuid(&self) -> Uuid;

    /// Origin info of a received record, `None` for locally created ones.
    fn origin_info_id(&self) -> Option<OriginInfoId>;

    /// Point the record at an origin info.
    fn set_origin_info_id(&mut self, id: Option<OriginInfoId>);

    /// Ledger back-reference for this record.
    fn association(&self) -> ShareAssociation;
}

/// Implements [`Record`] for a struct with `uuid` and `origin_info_id` fields.
macro_rules! impl_record {
    ($ty:ty, $table:literal, $caption:literal, $variant:ident) => {
        impl $crate::record::Record for $ty {
            const TABLE: &'static str = $table;
            const CAPTION: &'static str = $caption;

            fn uuid(&self) -> ::uuid::Uuid {
                self.uuid
            }

            fn origin_info_id(&self) -> Option<::s2s_core::types::OriginInfoId> {
                self.origin_info_id
            }

            fn set_origin_info_id(&mut self, id: Option<::s2s_core::types::OriginInfoId>) {
                self.origin_info_id = id;
            }

            fn association(&self) -> $crate::share::association::ShareAssociation {
                $crate::share::association::ShareAssociation::$variant(self.uuid)
            }
        }
    };
}

pub(crate) use impl_record;
