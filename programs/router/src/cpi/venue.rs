//! Venue over the accounts of one router instruction

use super::{ChainPool, ChainToken};
use harbor_model::{Address, PriceFeed, RouteError, RouteResult, StrategySlot, Venue};
use harbor_oracle::PriceOracle;
use pinocchio::account_info::AccountInfo;

/// Price read directly from the configured oracle account
pub struct ChainFeed<'a> {
    oracle: &'a AccountInfo,
}

impl<'a> ChainFeed<'a> {
    pub fn new(oracle: &'a AccountInfo) -> Self {
        Self { oracle }
    }
}

impl PriceFeed for ChainFeed<'_> {
    fn price(&self) -> RouteResult<u64> {
        let data = self
            .oracle
            .try_borrow_data()
            .map_err(|_| RouteError::OracleUnavailable)?;
        PriceOracle::from_bytes(&data)
            .map(|oracle| oracle.price)
            .ok_or(RouteError::OracleUnavailable)
    }
}

pub struct ChainVenue<'a> {
    custody: Address,
    token: ChainToken<'a>,
    feed: ChainFeed<'a>,
    pools: [ChainPool<'a>; 2],
}

impl<'a> ChainVenue<'a> {
    pub fn new(
        custody: Address,
        token: ChainToken<'a>,
        feed: ChainFeed<'a>,
        pools: [ChainPool<'a>; 2],
    ) -> Self {
        Self {
            custody,
            token,
            feed,
            pools,
        }
    }
}

impl<'a> Venue for ChainVenue<'a> {
    type Token = ChainToken<'a>;
    type Feed = ChainFeed<'a>;
    type Pool = ChainPool<'a>;

    fn router(&self) -> Address {
        self.custody
    }

    fn token(&self) -> &ChainToken<'a> {
        &self.token
    }

    fn token_mut(&mut self) -> &mut ChainToken<'a> {
        &mut self.token
    }

    fn feed(&self) -> &ChainFeed<'a> {
        &self.feed
    }

    fn pool(&self, slot: StrategySlot) -> &ChainPool<'a> {
        &self.pools[slot.index()]
    }

    fn pool_mut(&mut self, slot: StrategySlot) -> &mut ChainPool<'a> {
        &mut self.pools[slot.index()]
    }
}
