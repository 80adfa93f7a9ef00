/// Market-data snapshot generator
///
/// Builds 10-level books (5 bids, 5 offers) around a random scaled mid:
///   - mid: uniform in [99 * 256, 101 * 256), i.e. 1/256 point resolution
///   - level k bid:   mid - spread / 2 - k
///   - level k offer: mid + spread / 2 + k
///   - volumes: one round-robin pool shared by bids then offers
///   - spread: triangular wave 2,4,6,8,6,4,2,... advanced once per row
///
/// Volume and spread state run for the whole file, across identifiers.

use rand::Rng;
use tracing::debug;
use crate::config::{GeneratorConfig, MARKET_DATA_FILE};
use crate::dataset::{DatasetResult, DatasetSummary, DatasetWriter};
use crate::fractional::{FractionalPrice, TICKS_PER_POINT};
use crate::records::{BookLevel, CsvRecord, MarketDataRecord, DEPTH};
use crate::round_robin::RoundRobin;

pub const MID_TICKS_LOW: u32 = 99 * TICKS_PER_POINT;
pub const MID_TICKS_HIGH: u32 = 101 * TICKS_PER_POINT;

pub static LEVEL_VOLUMES: [u64; 5] = [10_000_000, 20_000_000, 30_000_000, 40_000_000, 50_000_000];

pub const SPREAD_MIN: u32 = 2;
pub const SPREAD_MAX: u32 = 8;
pub const SPREAD_STEP: u32 = 2;

/// Spread in 1/256 units bouncing between `SPREAD_MIN` and `SPREAD_MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadOscillator {
    spread: u32,
    rising: bool,
}

impl SpreadOscillator {
    pub fn new() -> Self {
        SpreadOscillator {
            spread: SPREAD_MIN,
            rising: true,
        }
    }

    pub fn current(&self) -> u32 {
        self.spread
    }

    /// Signed step applied on the next advance
    pub fn increment(&self) -> i32 {
        if self.rising {
            SPREAD_STEP as i32
        } else {
            -(SPREAD_STEP as i32)
        }
    }

    /// Step once; direction flips on reaching either bound
    pub fn advance(&mut self) {
        if self.rising {
            self.spread += SPREAD_STEP;
            if self.spread == SPREAD_MAX {
                self.rising = false;
            }
        } else {
            self.spread -= SPREAD_STEP;
            if self.spread == SPREAD_MIN {
                self.rising = true;
            }
        }
    }
}

impl Default for SpreadOscillator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct MarketDataGenerator {
    volumes: RoundRobin<u64>,
    spread: SpreadOscillator,
}

impl MarketDataGenerator {
    pub fn new() -> Self {
        MarketDataGenerator {
            volumes: RoundRobin::new(&LEVEL_VOLUMES),
            spread: SpreadOscillator::new(),
        }
    }

    /// Spread the next snapshot will use
    pub fn spread(&self) -> u32 {
        self.spread.current()
    }

    pub fn next_snapshot<R: Rng + ?Sized>(&mut self, product_id: &str, rng: &mut R) -> MarketDataRecord {
        let mid = rng.gen_range(MID_TICKS_LOW..MID_TICKS_HIGH);
        self.snapshot_at(product_id, mid)
    }

    /// Build a snapshot around a given scaled mid and advance all state
    pub fn snapshot_at(&mut self, product_id: &str, mid: u32) -> MarketDataRecord {
        let half = self.spread.current() / 2;
        let empty = BookLevel {
            price: FractionalPrice::from_ticks(0),
            volume: 0,
        };

        // Bids first, then offers: both sides draw from the same volume cursor
        let mut bids = [empty; DEPTH];
        for (k, level) in bids.iter_mut().enumerate() {
            level.price = FractionalPrice::from_ticks(mid.saturating_sub(half + k as u32));
            level.volume = self.volumes.next_value();
        }
        let mut offers = [empty; DEPTH];
        for (k, level) in offers.iter_mut().enumerate() {
            level.price = FractionalPrice::from_ticks(mid.saturating_add(half + k as u32));
            level.volume = self.volumes.next_value();
        }

        self.spread.advance();

        MarketDataRecord {
            product_id: product_id.to_string(),
            bids,
            offers,
        }
    }
}

impl Default for MarketDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Write marketdata.csv into the configured output directory
pub fn generate_market_data<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> DatasetResult<DatasetSummary> {
    let path = config.path_for(MARKET_DATA_FILE);
    debug!(path = %path.display(), rows_per_product = config.market_data_per_product, "generating market data");

    let mut generator = MarketDataGenerator::new();
    let mut writer = DatasetWriter::create(&path, MarketDataRecord::HEADER)?;
    writer.write_rows(config.product_ids, config.market_data_per_product, |id| {
        generator.next_snapshot(id, rng)
    })?;
    let stats = writer.finish()?;

    Ok(DatasetSummary {
        file: MARKET_DATA_FILE.to_string(),
        path,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spread_wave() {
        let mut spread = SpreadOscillator::new();
        let values: Vec<u32> = (0..10)
            .map(|_| {
                let v = spread.current();
                spread.advance();
                v
            })
            .collect();
        assert_eq!(values, vec![2, 4, 6, 8, 6, 4, 2, 4, 6, 8]);
    }

    #[test]
    fn test_spread_increment_flips() {
        let mut spread = SpreadOscillator::new();
        assert_eq!(spread.increment(), 2);
        for _ in 0..3 {
            spread.advance();
        }
        assert_eq!(spread.current(), 8);
        assert_eq!(spread.increment(), -2);
        for _ in 0..3 {
            spread.advance();
        }
        assert_eq!(spread.current(), 2);
        assert_eq!(spread.increment(), 2);
    }

    #[test]
    fn test_snapshot_at_par() {
        let mut generator = MarketDataGenerator::new();
        let snap = generator.snapshot_at("9128283H1", 25600);

        let bids: Vec<String> = snap.bids.iter().map(|l| l.price.to_string()).collect();
        let offers: Vec<String> = snap.offers.iter().map(|l| l.price.to_string()).collect();
        assert_eq!(bids, vec!["99-317", "99-316", "99-315", "99-31+", "99-313"]);
        assert_eq!(offers, vec!["100-001", "100-002", "100-003", "100-00+", "100-005"]);

        let volumes: Vec<u64> = snap
            .bids
            .iter()
            .chain(snap.offers.iter())
            .map(|l| l.volume)
            .collect();
        assert_eq!(
            volumes,
            vec![
                10_000_000, 20_000_000, 30_000_000, 40_000_000, 50_000_000,
                10_000_000, 20_000_000, 30_000_000, 40_000_000, 50_000_000,
            ]
        );
        assert_eq!(generator.spread(), 4);
    }

    #[test]
    fn test_snapshot_at_extreme_mids() {
        let mut generator = MarketDataGenerator::new();
        let high = generator.snapshot_at("9128283H1", u32::MAX);
        assert_eq!(high.offers[4].price.to_ticks(), u32::MAX);
        assert_eq!(high.bids[0].price.to_ticks(), u32::MAX - 1);

        let low = generator.snapshot_at("9128283H1", 0);
        assert_eq!(low.bids[4].price.to_ticks(), 0);
        assert_eq!(low.offers[0].price.to_ticks(), 2);
    }

    #[test]
    fn test_top_of_book_tracks_spread() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut generator = MarketDataGenerator::new();
        for _ in 0..20 {
            let spread = generator.spread();
            let snap = generator.next_snapshot("912810RZ3", &mut rng);
            assert_eq!(snap.spread_ticks(), 2 * (spread / 2));
            let mid = snap.best_bid().price.to_ticks() + spread / 2;
            assert!((MID_TICKS_LOW..MID_TICKS_HIGH).contains(&mid));
        }
    }
}
