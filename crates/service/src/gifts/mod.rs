pub mod domain;
pub mod service;
pub mod validation;

pub use domain::{DeleteConfirmation, GiftItem, GiftPatch};
pub use service::GiftListService;
