use crate::models::Candle;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Market scenario types for synthetic data generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarketScenario {
    /// Clean sinusoid around the base price; closes carry no noise
    Sine { period: f64, amplitude: f64 },
    /// Every OHLC field identical on every bar (zero volatility)
    Constant,
    /// Steady uptrend with noise
    Trend,
    /// Sinusoid riding a slow uptrend with ±0.5% noise
    NoisyCycle { period: f64, amplitude: f64 },
}

/// Generates synthetic price data for indicator tests and demos
pub struct SyntheticDataGenerator {
    rng: StdRng,
    base_price: f64,
    base_volume: f64,
    token: String,
}

impl SyntheticDataGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 100.0,
            base_volume: 1_000_000.0,
            token: "SYNTH".to_string(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Generate candles for a specific market scenario
    ///
    /// # Arguments
    /// * `scenario` - The market scenario to simulate
    /// * `num_candles` - Number of candles to generate
    /// * `interval_minutes` - Minutes between candles (1440 for daily bars)
    pub fn generate(
        &mut self,
        scenario: MarketScenario,
        num_candles: usize,
        interval_minutes: i64,
    ) -> Vec<Candle> {
        let start_time = Utc::now() - Duration::minutes(num_candles as i64 * interval_minutes);
        let mut candles = Vec::with_capacity(num_candles);
        let mut trend_price = self.base_price;

        for i in 0..num_candles {
            let timestamp = start_time + Duration::minutes(i as i64 * interval_minutes);

            let candle = match scenario {
                MarketScenario::Sine { period, amplitude } => {
                    let price = self.base_price + amplitude * (2.0 * PI * i as f64 / period).sin();
                    self.create_candle(price, timestamp)
                }
                MarketScenario::Constant => self.flat_candle(self.base_price, timestamp),
                MarketScenario::Trend => {
                    // +0.3% drift per bar with ±0.2% noise
                    let drift = trend_price * 0.003;
                    let noise = trend_price * self.rng.gen_range(-0.002..0.002);
                    trend_price += drift + noise;
                    self.create_candle(trend_price, timestamp)
                }
                MarketScenario::NoisyCycle { period, amplitude } => {
                    let cycle = amplitude * (2.0 * PI * i as f64 / period).sin();
                    let drift = self.base_price * 0.0005 * i as f64;
                    let clean = self.base_price + drift + cycle;
                    let noise = clean * self.rng.gen_range(-0.005..0.005);
                    self.create_candle(clean + noise, timestamp)
                }
            };

            candles.push(candle);
        }

        candles
    }

    fn flat_candle(&self, price: f64, timestamp: DateTime<Utc>) -> Candle {
        Candle {
            token: self.token.clone(),
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: self.base_volume,
        }
    }

    /// Helper to create a candle from price and timestamp
    fn create_candle(&mut self, price: f64, timestamp: DateTime<Utc>) -> Candle {
        let noise_pct = 0.002; // ±0.2% intrabar movement

        let high = price * (1.0 + self.rng.gen_range(0.0..noise_pct));
        let low = price * (1.0 - self.rng.gen_range(0.0..noise_pct));

        let open_raw = price * (1.0 + self.rng.gen_range(-noise_pct..noise_pct));
        let open = open_raw.clamp(low, high);

        // Vary volume ±30%
        let volume = self.base_volume * self.rng.gen_range(0.7..1.3);

        Candle {
            token: self.token.clone(),
            timestamp,
            open,
            high,
            low,
            close: price,
            volume,
        }
    }
}
