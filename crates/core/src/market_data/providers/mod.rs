pub(crate) mod market_data_provider;
pub(crate) mod models;
pub(crate) mod yahoo_provider;

pub use market_data_provider::MarketDataProvider;
pub use models::ProviderBar;
pub use yahoo_provider::YahooProvider;
