/// Trade generator
///
/// Every row takes the next value from four independent round-robin pools
/// (price, book, quantity, side). The pools are owned by the generator and carry
/// their position across product identifiers for the whole file.

use rand::Rng;
use tracing::debug;
use crate::config::{GeneratorConfig, TRADES_FILE};
use crate::dataset::{DatasetResult, DatasetSummary, DatasetWriter};
use crate::records::{short_token, Book, CsvRecord, Side, TradeRecord};
use crate::round_robin::RoundRobin;

pub static TRADE_PRICES: [f64; 2] = [99.0, 100.0];
pub static TRADE_BOOKS: [Book; 3] = [Book::Trsy1, Book::Trsy2, Book::Trsy3];
pub static TRADE_QUANTITIES: [u64; 5] = [1_000_000, 2_000_000, 3_000_000, 4_000_000, 5_000_000];
pub static SIDES: [Side; 2] = [Side::Buy, Side::Sell];

#[derive(Debug, Clone)]
pub struct TradeGenerator {
    prices: RoundRobin<f64>,
    books: RoundRobin<Book>,
    quantities: RoundRobin<u64>,
    sides: RoundRobin<Side>,
}

impl TradeGenerator {
    pub fn new() -> Self {
        TradeGenerator {
            prices: RoundRobin::new(&TRADE_PRICES),
            books: RoundRobin::new(&TRADE_BOOKS),
            quantities: RoundRobin::new(&TRADE_QUANTITIES),
            sides: RoundRobin::new(&SIDES),
        }
    }

    pub fn next_trade<R: Rng + ?Sized>(&mut self, product_id: &str, rng: &mut R) -> TradeRecord {
        TradeRecord {
            product_id: product_id.to_string(),
            trade_id: short_token(rng),
            price: self.prices.next_value(),
            book: self.books.next_value(),
            quantity: self.quantities.next_value(),
            side: self.sides.next_value(),
        }
    }
}

impl Default for TradeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Write trades.csv into the configured output directory
pub fn generate_trades<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> DatasetResult<DatasetSummary> {
    let path = config.path_for(TRADES_FILE);
    debug!(path = %path.display(), rows_per_product = config.trades_per_product, "generating trades");

    let mut generator = TradeGenerator::new();
    let mut writer = DatasetWriter::create(&path, TradeRecord::HEADER)?;
    writer.write_rows(config.product_ids, config.trades_per_product, |id| {
        generator.next_trade(id, rng)
    })?;
    let stats = writer.finish()?;

    Ok(DatasetSummary {
        file: TRADES_FILE.to_string(),
        path,
        stats,
    })
}
