// Price history sources: JSON files and seeded synthetic series
pub mod loader;
pub mod synthetic;
pub mod validator;

pub use loader::{load_price_history, parse_price_history, PriceHistory};
pub use synthetic::{MarketScenario, SyntheticDataGenerator};
pub use validator::CandleValidator;
