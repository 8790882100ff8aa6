//! Request and response models exchanged with the MoMo API.

pub mod account;
pub mod id;
pub mod idempotency;
pub mod msisdn;
pub mod transaction;

pub use account::*;
pub use id::*;
pub use idempotency::*;
pub use msisdn::*;
pub use transaction::*;
