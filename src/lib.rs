/// Treasury Datagen - Synthetic Fixed-Income Input Data
///
/// Fabricates CSV fixtures for a bond trading system demo. Features include:
/// - Trades and client inquiries cycling fixed books, quantities and sides
/// - Mid/spread price ticks in handle-and-32nds notation
/// - 10-level order-book snapshots with a triangular spread wave
/// - Fractional price encoding and parsing (scaled 1/256 integers)
/// - Typed readers for the generated files
/// - Per-dataset generation statistics

pub mod fractional;
pub mod records;
pub mod round_robin;
pub mod config;
pub mod stats;
pub mod dataset;
pub mod trades;
pub mod inquiries;
pub mod prices;
pub mod market_data;
pub mod reader;
pub mod runner;

pub use fractional::{FractionalPrice, PriceError, fractional_representation, random_fractional_price, random_spread};
pub use records::{CsvRecord, Side, Book, TradeRecord, InquiryRecord, PriceRecord, MarketDataRecord, BookLevel};
pub use round_robin::RoundRobin;
pub use config::{GeneratorConfig, PRODUCT_IDS};
pub use stats::GenerationStats;
pub use dataset::{DatasetWriter, DatasetError, DatasetSummary};
pub use trades::{TradeGenerator, generate_trades};
pub use inquiries::{InquiryGenerator, generate_inquiries};
pub use prices::{PriceGenerator, generate_prices};
pub use market_data::{MarketDataGenerator, SpreadOscillator, generate_market_data};
pub use reader::{ReadError, FromFields};
pub use runner::generate_all;
