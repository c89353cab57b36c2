pub mod auth;
pub mod checkout;
pub mod picks;
pub mod record;
pub mod scores;
pub mod system;

pub use auth::*;
pub use checkout::*;
pub use picks::*;
pub use record::*;
pub use scores::*;
pub use system::*;
