//! blockfit driver (default binary).
//!
//! Serves one round over stdin/stdout using the line protocol in
//! [`blockfit::adapter`]. Logs go to stderr so stdout stays pure protocol.

use std::str::FromStr;

use anyhow::Result;
use time::OffsetDateTime;
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use blockfit::adapter::{run_stdio, AdapterConfig};
use blockfit::core::DailySeed;

fn main() -> Result<()> {
    let config = AdapterConfig::from_env();
    init_logging(&config.log_level);

    let today = DailySeed::from_date(OffsetDateTime::now_utc().date());
    info!(
        seed = config.seed,
        daily = %today,
        max_unlocked_level = config.progress.max_unlocked_level,
        "starting blockfit"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let progress = rt.block_on(run_stdio(config))?;

    info!(
        max_unlocked_level = progress.max_unlocked_level,
        high_score = progress.high_score,
        "input closed"
    );
    Ok(())
}

fn init_logging(level: &str) {
    let level = Level::from_str(level).unwrap_or(Level::INFO);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}
