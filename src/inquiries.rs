/// Inquiry generator
///
/// Same walk as the trade generator with only side and quantity pools. Its
/// cursors are independent of the trade generator's.

use rand::Rng;
use tracing::debug;
use crate::config::{GeneratorConfig, INQUIRIES_FILE};
use crate::dataset::{DatasetResult, DatasetSummary, DatasetWriter};
use crate::records::{short_token, CsvRecord, InquiryRecord, Side};
use crate::round_robin::RoundRobin;
use crate::trades::{SIDES, TRADE_QUANTITIES};

#[derive(Debug, Clone)]
pub struct InquiryGenerator {
    quantities: RoundRobin<u64>,
    sides: RoundRobin<Side>,
}

impl InquiryGenerator {
    pub fn new() -> Self {
        InquiryGenerator {
            quantities: RoundRobin::new(&TRADE_QUANTITIES),
            sides: RoundRobin::new(&SIDES),
        }
    }

    pub fn next_inquiry<R: Rng + ?Sized>(&mut self, product_id: &str, rng: &mut R) -> InquiryRecord {
        InquiryRecord {
            product_id: product_id.to_string(),
            inquiry_id: short_token(rng),
            side: self.sides.next_value(),
            quantity: self.quantities.next_value(),
        }
    }
}

impl Default for InquiryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Write inquiries.csv into the configured output directory
pub fn generate_inquiries<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> DatasetResult<DatasetSummary> {
    let path = config.path_for(INQUIRIES_FILE);
    debug!(path = %path.display(), rows_per_product = config.inquiries_per_product, "generating inquiries");

    let mut generator = InquiryGenerator::new();
    let mut writer = DatasetWriter::create(&path, InquiryRecord::HEADER)?;
    writer.write_rows(config.product_ids, config.inquiries_per_product, |id| {
        generator.next_inquiry(id, rng)
    })?;
    let stats = writer.finish()?;

    Ok(DatasetSummary {
        file: INQUIRIES_FILE.to_string(),
        path,
        stats,
    })
}
