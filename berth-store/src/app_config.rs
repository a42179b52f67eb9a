use serde::Deserialize;
use std::env;
use berth_catalog::{FareConfig, LayoutPolicy};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub fares: FareSettings,
    pub layout: LayoutSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FareSettings {
    pub tax_rate: f64,
    pub convenience_fee_per_seat: u32,
}

impl Default for FareSettings {
    fn default() -> Self {
        Self {
            tax_rate: 0.05,
            convenience_fee_per_seat: 20,
        }
    }
}

impl FareSettings {
    pub fn to_fare_config(&self) -> FareConfig {
        FareConfig::from_rate(self.tax_rate, self.convenience_fee_per_seat)
    }
}

/// Coach layout policy. Seat availability and the ladies quota are
/// placeholders until a real inventory source exists.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LayoutSettings {
    pub rows: u32,
    pub side_berth_every: u32,
    pub ladies_rows: Vec<u32>,
    pub unavailable_ratio: f64,
    pub seed: Option<u64>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let policy = LayoutPolicy::default();
        Self {
            rows: policy.rows,
            side_berth_every: policy.side_berth_every,
            ladies_rows: policy.ladies_rows,
            unavailable_ratio: policy.unavailable_ratio,
            seed: policy.seed,
        }
    }
}

impl LayoutSettings {
    pub fn to_policy(&self) -> LayoutPolicy {
        LayoutPolicy {
            rows: self.rows,
            side_berth_every: self.side_berth_every,
            ladies_rows: self.ladies_rows.clone(),
            unavailable_ratio: self.unavailable_ratio,
            seed: self.seed,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // BERTH_FARES__TAX_RATE=0.12 sets fares.tax_rate
            .add_source(
                config::Environment::with_prefix("BERTH")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("layout.ladies_rows")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_policy() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);

        let fares = config.fares.to_fare_config();
        assert_eq!(fares.tax_rate_bps, 500);
        assert_eq!(fares.convenience_fee_per_seat, 20);

        let policy = config.layout.to_policy();
        assert_eq!(policy.rows, 9);
        assert_eq!(policy.ladies_rows, vec![3, 7]);
        assert!(policy.seed.is_none());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let source = config::Config::builder()
            .add_source(config::File::from_str(
                "[fares]\ntax_rate = 0.12\n\n[layout]\nseed = 42\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Config = source.try_deserialize().unwrap();

        assert_eq!(config.fares.to_fare_config().tax_rate_bps, 1200);
        assert_eq!(config.fares.convenience_fee_per_seat, 20);
        assert_eq!(config.layout.seed, Some(42));
        assert_eq!(config.layout.rows, 9);
    }
}
