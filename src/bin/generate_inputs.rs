/// Input data generator
///
/// Writes trades.csv, inquiries.csv, prices.csv and marketdata.csv into the
/// current directory. Logs go to stderr (RUST_LOG, default info); stdout gets one
/// confirmation line per file.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use treasury_datagen::{generate_all, GeneratorConfig};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = GeneratorConfig::default();
    let mut rng = rand::thread_rng();

    generate_all(&config, &mut rng, |summary| println!("Generated {}", summary.file))
        .with_context(|| format!("generating input data in {}", config.output_dir().display()))?;

    Ok(())
}
