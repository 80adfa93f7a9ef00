/// Generator settings
///
/// Everything here is compiled in; `Default` gives the production run. The struct
/// exists so the output location and dataset sizes can be threaded through the
/// generators instead of living in globals.

use std::path::{Path, PathBuf};

/// Treasury CUSIPs shared by every dataset, in output order
pub static PRODUCT_IDS: [&str; 6] = [
    "9128283H1",
    "9128283L2",
    "912828M80",
    "9128283J7",
    "9128283F5",
    "912810RZ3",
];

pub const TRADES_FILE: &str = "trades.csv";
pub const INQUIRIES_FILE: &str = "inquiries.csv";
pub const PRICES_FILE: &str = "prices.csv";
pub const MARKET_DATA_FILE: &str = "marketdata.csv";

pub const TRADES_PER_PRODUCT: usize = 10;
pub const INQUIRIES_PER_PRODUCT: usize = 10;
pub const PRICES_PER_PRODUCT: usize = 100_000;
pub const MARKET_DATA_PER_PRODUCT: usize = 100_000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub product_ids: &'static [&'static str],
    pub trades_per_product: usize,
    pub inquiries_per_product: usize,
    pub prices_per_product: usize,
    pub market_data_per_product: usize,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        GeneratorConfig {
            output_dir: PathBuf::from("."),
            product_ids: &PRODUCT_IDS,
            trades_per_product: TRADES_PER_PRODUCT,
            inquiries_per_product: INQUIRIES_PER_PRODUCT,
            prices_per_product: PRICES_PER_PRODUCT,
            market_data_per_product: MARKET_DATA_PER_PRODUCT,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_product_ids(mut self, product_ids: &'static [&'static str]) -> Self {
        self.product_ids = product_ids;
        self
    }

    /// Override the row count of the two large datasets
    pub fn with_tick_rows(mut self, rows_per_product: usize) -> Self {
        self.prices_per_product = rows_per_product;
        self.market_data_per_product = rows_per_product;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
