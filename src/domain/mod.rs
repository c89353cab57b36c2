pub mod confidence;
pub mod game;
pub mod odds;
pub mod pick;
pub mod record;
pub mod sport;

pub use confidence::*;
pub use game::*;
pub use odds::*;
pub use pick::*;
pub use record::*;
pub use sport::*;
