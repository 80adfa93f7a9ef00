/// Full run: trades, inquiries, prices, market data
///
/// Generators share nothing but the RNG. Each file is opened, written and closed
/// before the next one starts; the first error stops the run.

use rand::Rng;
use tracing::info;
use crate::config::GeneratorConfig;
use crate::dataset::{DatasetResult, DatasetSummary};
use crate::inquiries::generate_inquiries;
use crate::market_data::generate_market_data;
use crate::prices::generate_prices;
use crate::trades::generate_trades;

/// Run all four generators in order, calling `on_complete` after each file
pub fn generate_all<R, F>(
    config: &GeneratorConfig,
    rng: &mut R,
    mut on_complete: F,
) -> DatasetResult<Vec<DatasetSummary>>
where
    R: Rng + ?Sized,
    F: FnMut(&DatasetSummary),
{
    info!(
        output_dir = %config.output_dir().display(),
        products = config.product_ids.len(),
        "generating input data"
    );

    let mut summaries = Vec::with_capacity(4);
    let mut record = |summary: DatasetSummary| {
        on_complete(&summary);
        summaries.push(summary);
    };

    record(generate_trades(config, rng)?);
    record(generate_inquiries(config, rng)?);
    record(generate_prices(config, rng)?);
    record(generate_market_data(config, rng)?);

    Ok(summaries)
}
