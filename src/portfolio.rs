//! Portfolio holdings and valuation.
//!
//! `PortfolioStore` owns the session-scoped holding list and enforces the
//! input rules at the mutation boundary. `valuate` is a pure function over
//! holdings and a price lookup; it never errors, it only skips what it cannot
//! price.

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::series::PricePoint;

#[derive(Clone, Debug)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    pub cost_basis: f64,
}

#[derive(Clone, Debug)]
pub struct Allocation {
    pub symbol: String,
    pub value: f64,
    pub percent: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub profit: f64,
    pub profit_percent: f64,
    pub allocations: Vec<Allocation>,
}

/// Value the portfolio against current prices. A symbol the lookup cannot
/// resolve contributes zero — price data may lag holding edits, and that must
/// not surface as an error. Every ratio carries an explicit zero guard.
pub fn valuate<F>(holdings: &[Holding], price_lookup: F) -> PortfolioSummary
where
    F: Fn(&str) -> Option<f64>,
{
    let mut total_value = 0.0;
    let mut total_cost = 0.0;
    let mut values = Vec::with_capacity(holdings.len());

    for holding in holdings {
        let value = price_lookup(&holding.symbol)
            .map(|price| holding.quantity * price)
            .unwrap_or(0.0);
        total_value += value;
        total_cost += holding.quantity * holding.cost_basis;
        values.push(value);
    }

    let profit = total_value - total_cost;
    let profit_percent = if total_cost > 0.0 {
        profit / total_cost * 100.0
    } else {
        0.0
    };

    let allocations = holdings
        .iter()
        .zip(values)
        .map(|(holding, value)| Allocation {
            symbol: holding.symbol.clone(),
            value,
            percent: if total_value > 0.0 {
                value / total_value * 100.0
            } else {
                0.0
            },
        })
        .collect();

    PortfolioSummary { total_value, total_cost, profit, profit_percent, allocations }
}

/// Daily portfolio value over the trailing window, summing each holding's
/// quantity against its asset's generated price history. Histories shorter
/// than the window repeat their last point.
pub fn performance_series<'a, F>(
    holdings: &[Holding],
    history: F,
    days: usize,
) -> Vec<(DateTime<Utc>, f64)>
where
    F: Fn(&str) -> Option<&'a [PricePoint]>,
{
    let now = Utc::now();
    (0..=days)
        .map(|i| {
            let timestamp = now - Duration::days((days - i) as i64);
            let mut value = 0.0;
            for holding in holdings {
                if let Some(points) = history(&holding.symbol) {
                    if let Some(point) = points.get(i).or_else(|| points.last()) {
                        value += holding.quantity * point.price;
                    }
                }
            }
            (timestamp, value)
        })
        .collect()
}

pub struct PortfolioStore {
    holdings: Vec<Holding>,
}

impl PortfolioStore {
    pub fn seeded() -> Self {
        Self {
            holdings: vec![
                Holding { symbol: "BTC".into(), quantity: 0.5, cost_basis: 48_000.0 },
                Holding { symbol: "ETH".into(), quantity: 4.2, cost_basis: 3_000.0 },
                Holding { symbol: "SOL".into(), quantity: 15.0, cost_basis: 110.0 },
                Holding { symbol: "ADA".into(), quantity: 2_000.0, cost_basis: 0.5 },
            ],
        }
    }

    pub fn empty() -> Self {
        Self { holdings: Vec::new() }
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// At most one holding per symbol; a duplicate add is rejected with a
    /// hint to edit the existing entry instead.
    pub fn add(&mut self, symbol: &str, quantity: f64, cost_basis: f64) -> Result<()> {
        validate(quantity, cost_basis)?;
        if self.holdings.iter().any(|h| h.symbol == symbol) {
            bail!("{} is already in the portfolio; edit the existing entry instead", symbol);
        }
        self.holdings.push(Holding {
            symbol: symbol.to_string(),
            quantity,
            cost_basis,
        });
        Ok(())
    }

    pub fn edit(&mut self, symbol: &str, quantity: f64, cost_basis: f64) -> Result<()> {
        validate(quantity, cost_basis)?;
        match self.holdings.iter_mut().find(|h| h.symbol == symbol) {
            Some(holding) => {
                holding.quantity = quantity;
                holding.cost_basis = cost_basis;
                Ok(())
            }
            None => bail!("No {} holding to edit", symbol),
        }
    }

    pub fn remove(&mut self, symbol: &str) -> Result<()> {
        let before = self.holdings.len();
        self.holdings.retain(|h| h.symbol != symbol);
        if self.holdings.len() == before {
            bail!("No {} holding to remove", symbol);
        }
        Ok(())
    }

    /// Simulated data refresh: a ±0.1% wobble on each cost basis, mirroring
    /// the delayed "refresh" action of the dashboard.
    pub fn refresh_nudge(&mut self, rng: &mut impl Rng) {
        for holding in self.holdings.iter_mut() {
            holding.cost_basis *= 1.0 + rng.gen_range(-0.001..0.001);
        }
    }
}

fn validate(quantity: f64, cost_basis: f64) -> Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        bail!("Quantity must be a non-negative number");
    }
    if !cost_basis.is_finite() || cost_basis < 0.0 {
        bail!("Buy price must be a non-negative number");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{self, StepUnit};

    fn lookup(symbol: &str) -> Option<f64> {
        match symbol {
            "BTC" => Some(52_387.42),
            "ETH" => Some(2_843.15),
            "SOL" => Some(124.56),
            "ADA" => Some(0.4532),
            _ => None,
        }
    }

    #[test]
    fn test_valuate_totals() {
        let store = PortfolioStore::seeded();
        let summary = valuate(store.holdings(), lookup);

        assert!(summary.total_value >= 0.0);
        let expected_cost = 0.5 * 48_000.0 + 4.2 * 3_000.0 + 15.0 * 110.0 + 2_000.0 * 0.5;
        assert!((summary.total_cost - expected_cost).abs() < 1e-6);
        assert!((summary.profit - (summary.total_value - summary.total_cost)).abs() < 1e-9);
    }

    #[test]
    fn test_valuate_zero_cost_reports_zero_percent() {
        let holdings = vec![Holding { symbol: "BTC".into(), quantity: 0.0, cost_basis: 0.0 }];
        let summary = valuate(&holdings, lookup);
        assert_eq!(summary.profit_percent, 0.0, "zero cost must report 0%, never NaN");
        assert!(summary.profit_percent.is_finite());
    }

    #[test]
    fn test_valuate_missing_price_skips() {
        let holdings = vec![
            Holding { symbol: "BTC".into(), quantity: 1.0, cost_basis: 50_000.0 },
            Holding { symbol: "UNLISTED".into(), quantity: 10.0, cost_basis: 5.0 },
        ];
        let summary = valuate(&holdings, lookup);
        assert!((summary.total_value - 52_387.42).abs() < 1e-6);
        // The unpriced holding still appears in allocations, at zero.
        assert_eq!(summary.allocations.len(), 2);
        assert_eq!(summary.allocations[1].value, 0.0);
    }

    #[test]
    fn test_allocations_sum_to_hundred() {
        let store = PortfolioStore::seeded();
        let summary = valuate(store.holdings(), lookup);
        let sum: f64 = summary.allocations.iter().map(|a| a.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9, "allocation percents should sum to 100, got {}", sum);
    }

    #[test]
    fn test_allocations_all_zero_when_unpriced() {
        let store = PortfolioStore::seeded();
        let summary = valuate(store.holdings(), |_| None);
        assert_eq!(summary.total_value, 0.0);
        assert!(summary.allocations.iter().all(|a| a.percent == 0.0));
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let mut store = PortfolioStore::seeded();
        let before = store.len();
        let result = store.add("BTC", 1.0, 40_000.0);
        assert!(result.is_err(), "duplicate symbol must be rejected");
        assert_eq!(store.len(), before, "rejected add must leave holdings unchanged");
    }

    #[test]
    fn test_negative_inputs_rejected_at_boundary() {
        let mut store = PortfolioStore::empty();
        assert!(store.add("BTC", -1.0, 100.0).is_err());
        assert!(store.add("BTC", 1.0, -100.0).is_err());
        assert!(store.add("BTC", f64::NAN, 100.0).is_err());
        assert!(store.is_empty());
        // Zero quantity is a valid (empty) position.
        assert!(store.add("BTC", 0.0, 100.0).is_ok());
    }

    #[test]
    fn test_edit_and_remove() {
        let mut store = PortfolioStore::seeded();
        store.edit("ETH", 5.0, 2_500.0).unwrap();
        let eth = store.holdings().iter().find(|h| h.symbol == "ETH").unwrap();
        assert_eq!(eth.quantity, 5.0);
        assert_eq!(eth.cost_basis, 2_500.0);

        assert!(store.edit("UNLISTED", 1.0, 1.0).is_err());

        store.remove("ETH").unwrap();
        assert!(store.holdings().iter().all(|h| h.symbol != "ETH"));
        assert!(store.remove("ETH").is_err());
    }

    #[test]
    fn test_performance_series_shape() {
        let store = PortfolioStore::seeded();
        let btc = series::generate(52_000.0, 0.03, 30, StepUnit::Day);
        let history = |symbol: &str| -> Option<&[PricePoint]> {
            (symbol == "BTC").then_some(btc.as_slice())
        };

        let perf = performance_series(store.holdings(), history, 30);
        assert_eq!(perf.len(), 31);
        assert!(perf.iter().all(|&(_, v)| v >= 0.0));
        for pair in perf.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }
}
