pub mod odds;
pub mod picks;
pub mod results;

pub use odds::{OddsCache, OddsSource};
pub use picks::{PickService, TeamContextProvider};
pub use results::{RefreshSummary, ResultsService};
