pub mod checkout;
pub mod espn;
pub mod the_odds_api;

pub use checkout::CheckoutClient;
pub use espn::EspnProvider;
pub use the_odds_api::TheOddsApiClient;
