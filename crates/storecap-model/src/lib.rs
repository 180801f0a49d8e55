// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Storecap model SSOT.
//!
//! Every type here mirrors a JSON document exchanged with the console API.
//! Wire names are camelCase except where the API spells a field otherwise.
//!
//! ```compile_fail
//! use storecap_model::SpecialFlag;
//!
//! fn exhaustive_match(flag: SpecialFlag) -> &'static str {
//!     match flag {
//!         SpecialFlag::Gf2ag => "gf2ag",
//!         SpecialFlag::ThirdParty => "3p",
//!     }
//! }
//! ```

mod capacity;
mod error;
mod payload;
mod request;
mod selection;
mod special;
mod store;

pub use capacity::{CapacitySettings, CapacitySplit, DayCapacity, PoolInput, Weekday};
pub use error::ValidationError;
pub use payload::{ChangedFlag, TextFieldValue, UpdatePayload};
pub use request::{RequestRecord, RequestStatus};
pub use selection::{parse_store_id, Selection, StoreId};
pub use special::{
    EditLevel, IntraConfig, RawScalar, RawSpecialValues, SlowConfig, SpecialFlag, SpecialPayload,
    TplEntry, DEFAULT_TPL_SEQ_ID, DEFAULT_TPL_VENTOR,
};
pub use store::{
    Division, FlagDescriptor, FlagLevel, FlagValue, StoreConfig, TextFieldDescriptor,
};

pub const CRATE_NAME: &str = "storecap-model";
