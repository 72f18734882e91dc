//! Service layer for the gift list.
//! - `storage`: the per-list key-value unit and its backends.
//! - `gifts`: domain types, validation and the list operations.
//! - `registry`: list name to service instance resolution.

pub mod errors;
pub mod gifts;
pub mod registry;
pub mod storage;

pub use errors::{FieldViolation, ServiceError, ViolationCode};
pub use gifts::{DeleteConfirmation, GiftItem, GiftListService, GiftPatch};
pub use registry::{Backend, StoreRegistry};
pub use storage::StorageUnit;
