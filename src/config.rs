use anyhow::{Result, anyhow};
use ruint::aliases::U256;
use serde::Deserialize;
use std::fs;
use std::str::FromStr;
use toml;

use crate::amounts::{parse_token_amount, tick_from_formatted_price};
use crate::position::{PoolState, PositionQuote};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub pool: PoolConfig,
    #[serde(default)]
    pub positions: Vec<PositionConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PoolConfig {
    pub tick_spacing: u32,
    pub decimals0: u32,
    pub decimals1: u32,
    /// Raw Q64.96 sqrt price as read from chain, decimal or 0x-prefixed.
    pub sqrt_price_x96: Option<String>,
    pub tick: Option<i32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PositionConfig {
    pub name: String,
    pub price_lower: String,
    pub price_upper: String,
    pub amount0: String,
    pub amount1: String,
}

impl PoolConfig {
    pub fn pool_state(&self) -> Result<PoolState> {
        match (&self.sqrt_price_x96, self.tick) {
            (Some(sqrt_price_x96), _) => {
                let sqrt_price_x96 = U256::from_str(sqrt_price_x96.trim())
                    .map_err(|e| anyhow!("Invalid sqrt_price_x96 {}: {}", sqrt_price_x96, e))?;
                Ok(PoolState::from_sqrt_price(sqrt_price_x96, self.tick_spacing)?)
            }
            (None, Some(tick)) => Ok(PoolState::from_tick(tick, self.tick_spacing)?),
            (None, None) => Err(anyhow!("Pool needs either sqrt_price_x96 or tick")),
        }
    }
}

impl PositionConfig {
    /// Lower/upper ticks for the typed prices, before snapping.
    pub fn ticks(&self, pool: &PoolConfig) -> Result<(i32, i32)> {
        let lower = tick_from_formatted_price(&self.price_lower, pool.decimals0, pool.decimals1)?;
        let upper = tick_from_formatted_price(&self.price_upper, pool.decimals0, pool.decimals1)?;
        Ok((lower, upper))
    }

    /// Raw token amounts for the typed deposit.
    pub fn amounts(&self, pool: &PoolConfig) -> Result<(U256, U256)> {
        let amount0 = parse_token_amount(&self.amount0, pool.decimals0)?;
        let amount1 = parse_token_amount(&self.amount1, pool.decimals1)?;
        Ok((amount0, amount1))
    }

    /// Quotes this position against an already loaded pool state.
    pub fn quote(&self, pool: &PoolConfig, state: &PoolState) -> Result<PositionQuote> {
        let (lower, upper) = self.ticks(pool)?;
        let (amount0, amount1) = self.amounts(pool)?;
        Ok(state.quote_position(lower, upper, amount0, amount1)?)
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

pub fn read_config(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
