//! Collection and disbursement product services.

pub mod collection;
pub mod disbursement;

pub(crate) mod common;

pub use collection::*;
pub use disbursement::*;
