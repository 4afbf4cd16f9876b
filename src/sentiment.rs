//! Market sentiment: factor seed data, composite scoring and the gauge
//! animation used on the sentiment page.

use rand::Rng;
use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Neutral => "─",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Up => Color::Green,
            Self::Down => Color::Red,
            Self::Neutral => Color::Gray,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SentimentFactor {
    pub name: &'static str,
    pub score: u8,
    pub trend: Trend,
    pub description: &'static str,
}

pub fn seed_factors() -> Vec<SentimentFactor> {
    vec![
        SentimentFactor {
            name: "Market Momentum",
            score: 75,
            trend: Trend::Up,
            description: "Strong upward price action across major assets",
        },
        SentimentFactor {
            name: "Volatility",
            score: 45,
            trend: Trend::Down,
            description: "Decreasing price volatility indicates market stabilization",
        },
        SentimentFactor {
            name: "Trading Volume",
            score: 68,
            trend: Trend::Up,
            description: "Increasing trading volumes suggest growing interest",
        },
        SentimentFactor {
            name: "Social Sentiment",
            score: 65,
            trend: Trend::Up,
            description: "Positive sentiment from retail investors on social media",
        },
        SentimentFactor {
            name: "Whale Activity",
            score: 35,
            trend: Trend::Down,
            description: "Large holders appear to be accumulating rather than selling",
        },
        SentimentFactor {
            name: "Regulatory News",
            score: 40,
            trend: Trend::Neutral,
            description: "Mixed regulatory developments globally",
        },
    ]
}

/// Composite sentiment: rounded unweighted mean of the factor scores.
pub fn aggregate(factors: &[SentimentFactor]) -> u8 {
    if factors.is_empty() {
        return 0;
    }
    let sum: u32 = factors.iter().map(|f| f.score as u32).sum();
    ((sum as f64 / factors.len() as f64).round() as u8).min(100)
}

/// Five contiguous bands over [0, 100]. Half-open boundaries except the final
/// closed band, so 55 already reads as Slightly Bullish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outlook {
    Bearish,
    SlightlyBearish,
    Neutral,
    SlightlyBullish,
    Bullish,
}

impl Outlook {
    pub fn classify(score: u8) -> Outlook {
        match score {
            0..=29 => Self::Bearish,
            30..=44 => Self::SlightlyBearish,
            45..=54 => Self::Neutral,
            55..=69 => Self::SlightlyBullish,
            _ => Self::Bullish,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bearish => "Bearish",
            Self::SlightlyBearish => "Slightly Bearish",
            Self::Neutral => "Neutral",
            Self::SlightlyBullish => "Slightly Bullish",
            Self::Bullish => "Bullish",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Bearish => Color::Red,
            Self::SlightlyBearish => Color::LightRed,
            Self::Neutral => Color::Yellow,
            Self::SlightlyBullish => Color::Green,
            Self::Bullish => Color::Cyan,
        }
    }
}

/// Nudge every factor score by a small random amount, re-deriving the trend
/// from the direction of the nudge. Runs on the 10 s sentiment timer.
pub fn drift_factors(factors: &mut [SentimentFactor], rng: &mut impl Rng) {
    for factor in factors.iter_mut() {
        let nudge: i16 = rng.gen_range(-3..=3);
        factor.score = (factor.score as i16 + nudge).clamp(0, 100) as u8;
        factor.trend = match nudge.cmp(&0) {
            std::cmp::Ordering::Greater => Trend::Up,
            std::cmp::Ordering::Less => Trend::Down,
            std::cmp::Ordering::Equal => Trend::Neutral,
        };
    }
}

/// Duration of the gauge sweep and the frame cadence it assumes.
const ANIMATION_MS: u64 = 1500;
const FRAME_MS: u64 = 20;

/// Advances a displayed gauge value toward its target in equal per-frame
/// steps, clamping exactly at the target. Pure presentation state.
#[derive(Clone, Copy, Debug)]
pub struct GaugeAnimation {
    displayed: f64,
    target: f64,
    step: f64,
}

impl GaugeAnimation {
    pub fn new(target: u8) -> Self {
        let mut anim = Self { displayed: 0.0, target: 0.0, step: 0.0 };
        anim.retarget(target);
        anim
    }

    pub fn retarget(&mut self, target: u8) {
        self.target = target as f64;
        let steps = (ANIMATION_MS / FRAME_MS) as f64;
        self.step = (self.target - self.displayed) / steps;
    }

    pub fn tick(&mut self) {
        if self.step == 0.0 {
            return;
        }
        self.displayed += self.step;
        let reached = (self.step > 0.0 && self.displayed >= self.target)
            || (self.step < 0.0 && self.displayed <= self.target);
        if reached {
            self.displayed = self.target;
            self.step = 0.0;
        }
    }

    pub fn displayed(&self) -> u8 {
        self.displayed.round().clamp(0.0, 100.0) as u8
    }

    pub fn settled(&self) -> bool {
        self.step == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_seed_factors() {
        // round((75+45+68+65+35+40)/6) == 55
        let factors = seed_factors();
        assert_eq!(aggregate(&factors), 55);
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(aggregate(&[]), 0);
    }

    #[test]
    fn test_classify_band_edges() {
        assert_eq!(Outlook::classify(0), Outlook::Bearish);
        assert_eq!(Outlook::classify(29), Outlook::Bearish);
        assert_eq!(Outlook::classify(30), Outlook::SlightlyBearish);
        assert_eq!(Outlook::classify(44), Outlook::SlightlyBearish);
        assert_eq!(Outlook::classify(45), Outlook::Neutral);
        assert_eq!(Outlook::classify(54), Outlook::Neutral);
        assert_eq!(Outlook::classify(69), Outlook::SlightlyBullish);
        assert_eq!(Outlook::classify(70), Outlook::Bullish);
        assert_eq!(Outlook::classify(100), Outlook::Bullish);
    }

    #[test]
    fn test_classify_55_is_slightly_bullish() {
        // 55 sits on the open upper edge of Neutral, so it belongs to the
        // next band. Regression case for the exact `<` boundary.
        assert_eq!(Outlook::classify(55), Outlook::SlightlyBullish);
        assert_eq!(Outlook::classify(55).label(), "Slightly Bullish");
    }

    #[test]
    fn test_gauge_animation_converges_and_clamps() {
        let mut anim = GaugeAnimation::new(65);
        assert!(!anim.settled());
        for _ in 0..100 {
            anim.tick();
        }
        assert!(anim.settled(), "sweep should settle within the fixed duration");
        assert_eq!(anim.displayed(), 65);

        // Ticking past the target must not overshoot.
        anim.tick();
        assert_eq!(anim.displayed(), 65);
    }

    #[test]
    fn test_gauge_animation_retarget_downward() {
        let mut anim = GaugeAnimation::new(80);
        for _ in 0..100 {
            anim.tick();
        }
        anim.retarget(20);
        for _ in 0..100 {
            anim.tick();
        }
        assert_eq!(anim.displayed(), 20);
    }

    #[test]
    fn test_drift_keeps_scores_in_range() {
        let mut rng = rand::thread_rng();
        let mut factors = seed_factors();
        for f in factors.iter_mut() {
            f.score = 99;
        }
        for _ in 0..50 {
            drift_factors(&mut factors, &mut rng);
        }
        assert!(factors.iter().all(|f| f.score <= 100));
    }
}
