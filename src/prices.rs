/// Price tick generator
///
/// Each row is an independent draw: a random fractional mid with a 99 or 100
/// handle and a `0-002`/`0-003` spread. No state is carried between rows.

use rand::Rng;
use tracing::debug;
use crate::config::{GeneratorConfig, PRICES_FILE};
use crate::dataset::{DatasetResult, DatasetSummary, DatasetWriter};
use crate::fractional::{random_fractional_price, random_spread};
use crate::records::{CsvRecord, PriceRecord};

/// Handle bounds for the mid, `[low, high)`
pub const MID_HANDLE_LOW: u32 = 99;
pub const MID_HANDLE_HIGH: u32 = 101;

#[derive(Debug, Clone, Copy)]
pub struct PriceGenerator {
    low: u32,
    high: u32,
}

impl PriceGenerator {
    pub fn new() -> Self {
        PriceGenerator {
            low: MID_HANDLE_LOW,
            high: MID_HANDLE_HIGH,
        }
    }

    pub fn next_price<R: Rng + ?Sized>(&self, product_id: &str, rng: &mut R) -> PriceRecord {
        PriceRecord {
            product_id: product_id.to_string(),
            mid: random_fractional_price(rng, self.low, self.high),
            spread: random_spread(rng),
        }
    }
}

impl Default for PriceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Write prices.csv into the configured output directory
pub fn generate_prices<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> DatasetResult<DatasetSummary> {
    let path = config.path_for(PRICES_FILE);
    debug!(path = %path.display(), rows_per_product = config.prices_per_product, "generating prices");

    let generator = PriceGenerator::new();
    let mut writer = DatasetWriter::create(&path, PriceRecord::HEADER)?;
    writer.write_rows(config.product_ids, config.prices_per_product, |id| {
        generator.next_price(id, rng)
    })?;
    let stats = writer.finish()?;

    Ok(DatasetSummary {
        file: PRICES_FILE.to_string(),
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
    fn test_price_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let generator = PriceGenerator::new();
        for _ in 0..5000 {
            let row = generator.next_price("9128283J7", &mut rng);
            assert!((99..101).contains(&row.mid.whole()));
            assert!(row.mid.thirty_seconds() < 32);
            assert!(row.mid.sub_tick() < 8);
            assert_eq!(row.spread.whole(), 0);
            assert_eq!(row.spread.thirty_seconds(), 0);
            assert!(row.spread.sub_tick() == 2 || row.spread.sub_tick() == 3);
        }
    }

    #[test]
    fn test_out_of_convention_sub_ticks_appear() {
        let mut rng = StdRng::seed_from_u64(11);
        let generator = PriceGenerator::new();
        let mut seen = [false; 8];
        for _ in 0..5000 {
            seen[generator.next_price("9128283J7", &mut rng).mid.sub_tick() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
