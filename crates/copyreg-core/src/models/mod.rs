//! Data models for the publish flow
//!
//! Records owned by the backend, plus the transient client-side state of one
//! publish attempt (wallet session, transaction, stage).

mod record;
mod settings;
mod stage;
mod transaction;
mod wallet;

pub use record::*;
pub use settings::*;
pub use stage::*;
pub use transaction::*;
pub use wallet::*;
