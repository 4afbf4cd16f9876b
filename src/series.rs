//! Synthetic time-series generation.
//!
//! Every chart in the dashboard is driven by a generated random walk: a
//! uniform noise term plus a slow sinusoidal trend, applied as a
//! multiplicative delta to the running price. Each call reseeds and allocates
//! a fresh sequence so consumers can hold on to previous results.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepUnit {
    Hour,
    Day,
}

impl StepUnit {
    fn duration(self, steps: i64) -> Duration {
        match self {
            Self::Hour => Duration::hours(steps),
            Self::Day => Duration::days(steps),
        }
    }
}

/// Chart time span. Controls both the point count and the step unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizon {
    H24,
    D7,
    D30,
    D90,
    Y1,
}

impl Horizon {
    pub const ALL: [Horizon; 5] = [Self::H24, Self::D7, Self::D30, Self::D90, Self::Y1];

    pub fn point_count(self) -> usize {
        match self {
            Self::H24 => 24,
            Self::D7 => 7 * 24,
            Self::D30 => 30,
            Self::D90 => 90,
            Self::Y1 => 365,
        }
    }

    pub fn step_unit(self) -> StepUnit {
        match self {
            Self::H24 | Self::D7 => StepUnit::Hour,
            Self::D30 | Self::D90 | Self::Y1 => StepUnit::Day,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::H24 => "24H",
            Self::D7 => "7D",
            Self::D30 => "30D",
            Self::D90 => "90D",
            Self::Y1 => "1Y",
        }
    }

    pub fn next(self) -> Horizon {
        let i = Self::ALL.iter().position(|h| *h == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Walk `point_count` steps up to the present, yielding `point_count + 1`
/// time-ascending points. The walk is floored at a small fraction of the base
/// price; an unlucky streak of negative perturbations must not produce a
/// non-positive mock price.
pub fn generate(
    base_price: f64,
    volatility: f64,
    point_count: usize,
    step: StepUnit,
) -> Vec<PricePoint> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let floor = base_price * 1e-4;
    let quarter = point_count as f64 / 4.0;

    let mut points = Vec::with_capacity(point_count + 1);
    let mut prev = base_price;
    for i in (0..=point_count).rev() {
        let random_term = rng.gen_range(-volatility / 2.0..volatility / 2.0);
        let trend_term = (i as f64 / quarter).sin() * (volatility / 2.0);
        prev = (prev + prev * (random_term + trend_term)).max(floor);
        points.push(PricePoint {
            timestamp: now - step.duration(i as i64),
            price: prev,
        });
    }
    points
}

/// Bounded sentiment walk in [0, 100], one value per day. Each value is
/// seeded from the previous one, so the series drifts rather than jumps.
pub fn sentiment_walk(days: usize) -> Vec<(DateTime<Utc>, u8)> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let mut out = Vec::with_capacity(days + 1);
    let mut base: f64 = 50.0;
    for i in (0..=days).rev() {
        let random_term = rng.gen_range(-5.0..5.0);
        let trend_term = (i as f64 / 10.0).sin() * 10.0;
        base = (base + random_term + trend_term).clamp(0.0, 100.0);
        out.push((now - Duration::days(i as i64), base.round() as u8));
    }
    out
}

/// First-to-last change over a series as (absolute, percent). Zero or missing
/// first price reports 0% rather than a NaN.
pub fn change_summary(points: &[PricePoint]) -> (f64, f64) {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            let change = last.price - first.price;
            let pct = if first.price > 0.0 {
                change / first.price * 100.0
            } else {
                0.0
            };
            (change, pct)
        }
        _ => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let points = generate(100.0, 0.05, 10, StepUnit::Day);
        assert_eq!(points.len(), 11, "should yield point_count + 1 points");

        for pair in points.windows(2) {
            assert!(
                pair[0].timestamp < pair[1].timestamp,
                "timestamps must be strictly ascending"
            );
        }

        let expected_start = Utc::now() - Duration::days(10);
        let skew = (points[0].timestamp - expected_start).num_seconds().abs();
        assert!(skew < 5, "first point should sit ten days back, skew {}s", skew);
    }

    #[test]
    fn test_generate_stays_positive() {
        // High volatility for many steps is the worst case for the floor.
        for _ in 0..20 {
            let points = generate(100.0, 0.9, 500, StepUnit::Hour);
            assert!(
                points.iter().all(|p| p.price > 0.0),
                "walk must never produce a non-positive price"
            );
        }
    }

    #[test]
    fn test_generate_fresh_allocation() {
        let a = generate(52_000.0, 0.03, 24, StepUnit::Hour);
        let b = generate(52_000.0, 0.03, 24, StepUnit::Hour);
        assert_eq!(a.len(), b.len());
        // Reseeded per call: two runs agreeing everywhere would mean a shared RNG state.
        let identical = a.iter().zip(&b).all(|(x, y)| x.price == y.price);
        assert!(!identical, "separate calls should not replay the same walk");
    }

    #[test]
    fn test_horizon_parameters() {
        assert_eq!(Horizon::H24.point_count(), 24);
        assert_eq!(Horizon::D7.point_count(), 168);
        assert_eq!(Horizon::D30.point_count(), 30);
        assert_eq!(Horizon::Y1.point_count(), 365);
        assert_eq!(Horizon::H24.step_unit(), StepUnit::Hour);
        assert_eq!(Horizon::D7.step_unit(), StepUnit::Hour);
        assert_eq!(Horizon::D90.step_unit(), StepUnit::Day);
        // Cycling through next() visits every horizon and wraps.
        let mut h = Horizon::H24;
        for _ in 0..5 {
            h = h.next();
        }
        assert_eq!(h, Horizon::H24);
    }

    #[test]
    fn test_sentiment_walk_bounds() {
        let walk = sentiment_walk(30);
        assert_eq!(walk.len(), 31);
        assert!(walk.iter().all(|&(_, v)| v <= 100));
        for pair in walk.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn test_change_summary_guards() {
        assert_eq!(change_summary(&[]), (0.0, 0.0));

        let now = Utc::now();
        let points = vec![
            PricePoint { timestamp: now - Duration::hours(1), price: 100.0 },
            PricePoint { timestamp: now, price: 110.0 },
        ];
        let (abs, pct) = change_summary(&points);
        assert!((abs - 10.0).abs() < 1e-9);
        assert!((pct - 10.0).abs() < 1e-9);
    }
}
