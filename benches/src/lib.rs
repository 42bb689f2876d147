//! Synthetic market data for quantpair benchmarks.

use quantpair_lib::Tick;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Start of every generated series, in epoch milliseconds.
pub const START_MS: i64 = 1_700_000_000_000;

/// Shape of a generated cointegrated pair.
#[derive(Debug, Clone, Copy)]
pub struct PairShape {
    /// Ticks per leg.
    pub ticks: usize,
    /// Milliseconds between consecutive ticks.
    pub interval_ms: i64,
    /// Price ratio of leg B to leg A.
    pub ratio: f64,
    /// RNG seed.
    pub seed: u64,
}

impl PairShape {
    /// A pair with `ticks` ticks per leg, 250ms apart.
    #[must_use]
    pub const fn new(ticks: usize) -> Self {
        Self {
            ticks,
            interval_ms: 250,
            ratio: 0.05,
            seed: 7,
        }
    }
}

/// Generates a random-walk leg `btcusdt` and a leg `ethusdt` that tracks it
/// with stationary noise.
#[must_use]
pub fn pair_ticks(shape: PairShape) -> Vec<Tick> {
    let mut rng = StdRng::seed_from_u64(shape.seed);
    let Ok(step) = Normal::new(0.0, 5.0) else {
        return Vec::new();
    };
    let Ok(noise) = Normal::new(0.0, 0.5) else {
        return Vec::new();
    };

    let mut ticks = Vec::with_capacity(shape.ticks * 2);
    let mut price = 40_000.0;
    for i in 0..shape.ticks {
        let ts = START_MS + i as i64 * shape.interval_ms;
        price += step.sample(&mut rng);
        let other = shape.ratio * price + noise.sample(&mut rng);
        ticks.push(Tick::new("btcusdt", ts, price, 0.01));
        ticks.push(Tick::new("ethusdt", ts, other, 0.1));
    }
    ticks
}

/// Generates an AR(1) series `x[t] = phi * x[t-1] + e[t]`.
#[must_use]
pub fn ar1(len: usize, phi: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let Ok(noise) = Normal::new(0.0, 1.0) else {
        return Vec::new();
    };
    let mut x = 0.0;
    (0..len)
        .map(|_| {
            x = phi * x + noise.sample(&mut rng);
            x
        })
        .collect()
}

/// Closing prices of one leg of a generated pair.
#[must_use]
pub fn leg_prices(ticks: &[Tick], symbol: &str) -> Vec<f64> {
    ticks
        .iter()
        .filter(|t| t.symbol == symbol)
        .map(|t| t.price)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_ticks_shape() {
        let ticks = pair_ticks(PairShape::new(100));
        assert_eq!(ticks.len(), 200);
        assert_eq!(leg_prices(&ticks, "btcusdt").len(), 100);
        assert_eq!(ticks[2].timestamp - ticks[0].timestamp, 250);
        assert!(ticks.iter().all(|t| t.validate().is_ok()));
    }

    #[test]
    fn test_generators_are_seeded() {
        assert_eq!(ar1(50, 0.5, 3), ar1(50, 0.5, 3));
        assert_ne!(ar1(50, 0.5, 3), ar1(50, 0.5, 4));
    }
}
