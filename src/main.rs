use anyhow::Result;
use clmm_quote::{
    amounts::format_token_amount,
    config::{self, Config},
    position::PositionQuote,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber;

#[derive(Debug, Serialize)]
struct PositionReport {
    name: String,
    lower_tick: i32,
    upper_tick: i32,
    liquidity: String,
    amount0: String,
    amount1: String,
}

impl PositionReport {
    fn new(name: &str, quote: &PositionQuote, conf: &Config) -> Self {
        Self {
            name: name.to_string(),
            lower_tick: quote.lower_tick,
            upper_tick: quote.upper_tick,
            liquidity: quote.liquidity.to_string(),
            amount0: format_token_amount(quote.amount0, conf.pool.decimals0),
            amount1: format_token_amount(quote.amount1, conf.pool.decimals1),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    info!("Quoting positions from {}", path);

    let conf = config::read_config(&path)?;
    let pool = conf.pool.pool_state()?;
    info!(
        "Pool at tick {} (sqrt price {}), spacing {}",
        pool.tick, pool.sqrt_price_x96, pool.tick_spacing
    );

    let results: Vec<_> = conf
        .positions
        .par_iter()
        .map(|position| (position, position.quote(&conf.pool, &pool)))
        .collect();

    for (position, result) in results {
        match result {
            Ok(quote) => {
                let report = PositionReport::new(&position.name, &quote, &conf);
                println!("{}", serde_json::to_string(&report)?);
            }
            Err(e) => warn!("Skipping position {}: {}", position.name, e),
        }
    }

    Ok(())
}
