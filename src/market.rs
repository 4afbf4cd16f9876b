//! Mock market data: the seeded asset list, the periodic tick that keeps it
//! moving, and the sorting/filtering the market table runs on.

use rand::Rng;

#[derive(Clone, Debug)]
pub struct Asset {
    pub symbol: &'static str,
    pub name: &'static str,
    pub price: f64,
    pub change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    /// Anchor for chart series generation; identity data, never ticked.
    pub base_price: f64,
    pub volatility: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    Change,
    MarketCap,
    Volume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDir {
    Ascending,
    Descending,
}

/// Transient table-sort state: one column and a direction.
#[derive(Clone, Copy, Debug)]
pub struct SortSpec {
    pub key: SortKey,
    pub dir: SortDir,
}

pub struct Market {
    pub assets: Vec<Asset>,
    pub sort: Option<SortSpec>,
}

impl Market {
    pub fn seeded() -> Self {
        let assets = vec![
            Asset { symbol: "BTC", name: "Bitcoin", price: 52_387.42, change_24h: 2.34, market_cap: 1_032_856_742_189.0, volume_24h: 28_945_631_087.0, base_price: 52_000.0, volatility: 0.03 },
            Asset { symbol: "ETH", name: "Ethereum", price: 2_843.15, change_24h: -1.27, market_cap: 342_897_451_023.0, volume_24h: 15_784_562_341.0, base_price: 2_800.0, volatility: 0.04 },
            Asset { symbol: "BNB", name: "Binance Coin", price: 456.78, change_24h: 0.89, market_cap: 76_542_318_906.0, volume_24h: 2_134_567_890.0, base_price: 450.0, volatility: 0.035 },
            Asset { symbol: "SOL", name: "Solana", price: 124.56, change_24h: 5.67, market_cap: 54_327_890_123.0, volume_24h: 3_892_145_670.0, base_price: 120.0, volatility: 0.045 },
            Asset { symbol: "ADA", name: "Cardano", price: 0.4532, change_24h: -2.12, market_cap: 15_789_012_345.0, volume_24h: 923_456_789.0, base_price: 0.45, volatility: 0.05 },
            Asset { symbol: "DOT", name: "Polkadot", price: 6.78, change_24h: 1.45, market_cap: 8_765_432_109.0, volume_24h: 345_678_901.0, base_price: 6.5, volatility: 0.04 },
            Asset { symbol: "XRP", name: "XRP", price: 0.5123, change_24h: -0.78, market_cap: 27_890_123_456.0, volume_24h: 1_234_567_890.0, base_price: 0.5, volatility: 0.035 },
            Asset { symbol: "DOGE", name: "Dogecoin", price: 0.078, change_24h: 3.21, market_cap: 11_234_567_890.0, volume_24h: 845_612_378.0, base_price: 0.075, volatility: 0.06 },
        ];
        Self { assets, sort: None }
    }

    /// Simulated live update, fired every 5 s: a ±0.5% price wiggle, a
    /// ±0.25 pt drift on the 24h change, and a small volume nudge.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        for asset in self.assets.iter_mut() {
            asset.price *= 1.0 + rng.gen_range(-0.005..0.005);
            asset.change_24h += rng.gen_range(-0.25..0.25);
            asset.volume_24h *= 1.0 + rng.gen_range(-0.01..0.01);
        }
    }

    /// First press sorts a column ascending; pressing it again flips the
    /// direction. Switching columns starts ascending again.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(spec) if spec.key == key && spec.dir == SortDir::Ascending => {
                SortSpec { key, dir: SortDir::Descending }
            }
            _ => SortSpec { key, dir: SortDir::Ascending },
        });
    }

    /// Assets in display order under the current sort spec.
    pub fn sorted(&self) -> Vec<&Asset> {
        let mut rows: Vec<&Asset> = self.assets.iter().collect();
        if let Some(spec) = self.sort {
            rows.sort_by(|a, b| {
                let ord = match spec.key {
                    SortKey::Name => a.name.cmp(b.name),
                    SortKey::Price => a.price.total_cmp(&b.price),
                    SortKey::Change => a.change_24h.total_cmp(&b.change_24h),
                    SortKey::MarketCap => a.market_cap.total_cmp(&b.market_cap),
                    SortKey::Volume => a.volume_24h.total_cmp(&b.volume_24h),
                };
                match spec.dir {
                    SortDir::Ascending => ord,
                    SortDir::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    pub fn find(&self, symbol: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.symbol == symbol)
    }

    /// Case-insensitive substring match on name or symbol.
    pub fn search(&self, term: &str) -> Vec<&Asset> {
        let needle = term.to_lowercase();
        self.assets
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&needle)
                    || a.symbol.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_market_symbols_unique() {
        let market = Market::seeded();
        let symbols: HashSet<&str> = market.assets.iter().map(|a| a.symbol).collect();
        assert_eq!(symbols.len(), market.assets.len());
        assert!(market.find("BTC").is_some());
        assert!(market.find("BTQ").is_none());
    }

    #[test]
    fn test_tick_preserves_identity() {
        let mut market = Market::seeded();
        let before: Vec<&str> = market.assets.iter().map(|a| a.symbol).collect();
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            market.tick(&mut rng);
        }
        let after: Vec<&str> = market.assets.iter().map(|a| a.symbol).collect();
        assert_eq!(before, after, "tick must mutate in place, never add/remove");
        assert!(market.assets.iter().all(|a| a.price > 0.0));
    }

    #[test]
    fn test_sort_toggle_flips_direction() {
        let mut market = Market::seeded();
        market.toggle_sort(SortKey::Price);
        let asc: Vec<f64> = market.sorted().iter().map(|a| a.price).collect();
        assert!(asc.windows(2).all(|w| w[0] <= w[1]));

        market.toggle_sort(SortKey::Price);
        let desc: Vec<f64> = market.sorted().iter().map(|a| a.price).collect();
        assert!(desc.windows(2).all(|w| w[0] >= w[1]));

        // Switching column resets to ascending.
        market.toggle_sort(SortKey::Name);
        let names: Vec<&str> = market.sorted().iter().map(|a| a.name).collect();
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_search_matches_name_and_symbol() {
        let market = Market::seeded();
        assert_eq!(market.search("bit").len(), 1);
        assert_eq!(market.search("SOL").len(), 1);
        assert!(market.search("").len() == market.assets.len());
        assert!(market.search("zzz").is_empty());
    }
}
