// HTTP routes
pub mod health;
pub mod sms;

pub use health::*;
pub use sms::*;
