use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL: &str = "https://tcgcsv.com/tcgplayer";
pub const CATEGORY_ID: &str = "2"; // Yu-Gi-Oh!
pub const GROUP_ID: &str = "23656"; // Quarter Century Bonanza
pub const OUTPUT_DIR: &str = "data/quarter_century_bonanza";

/// How many times a fetch is tried and how long to wait in between.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub attempts: u32,
    pub backoff: f64,
    /// Delay scale: attempt `i` waits `unit * backoff^i`.
    pub unit: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 4,
            backoff: 1.6,
            unit: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Saturates at `Duration::MAX` when the factor overflows or is not finite.
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.unit.as_secs_f64() * self.backoff.powi(exponent);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Everything a run needs to know, built once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub category_id: String,
    pub group_id: String,
    pub output_dir: PathBuf,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            category_id: CATEGORY_ID.to_string(),
            group_id: GROUP_ID.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by any non-empty `TCGCSV_*` value `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(base) = get("TCGCSV_BASE_URL") {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(category) = get("TCGCSV_CATEGORY_ID") {
            config.category_id = category;
        }
        if let Some(group) = get("TCGCSV_GROUP_ID") {
            config.group_id = group;
        }
        if let Some(dir) = get("TCGCSV_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn products_url(&self) -> String {
        self.endpoint("products")
    }

    pub fn prices_url(&self) -> String {
        self.endpoint("prices")
    }

    fn endpoint(&self, kind: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, self.category_id, self.group_id, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints() {
        let config = Config::default();
        assert_eq!(
            config.products_url(),
            "https://tcgcsv.com/tcgplayer/2/23656/products"
        );
        assert_eq!(config.prices_url(), "https://tcgcsv.com/tcgplayer/2/23656/prices");
    }

    #[test]
    fn overrides_apply_and_blank_values_are_ignored() {
        let config = Config::from_lookup(|key| match key {
            "TCGCSV_BASE_URL" => Some("http://localhost:8080/api/".into()),
            "TCGCSV_GROUP_ID" => Some("999".into()),
            "TCGCSV_CATEGORY_ID" => Some("  ".into()),
            _ => None,
        });

        assert_eq!(config.prices_url(), "http://localhost:8080/api/2/999/prices");
        assert_eq!(config.output_dir, PathBuf::from(OUTPUT_DIR));
    }

    #[test]
    fn backoff_grows_exponentially_from_one_unit() {
        let policy = RetryPolicy::default();
        let delays: Vec<u128> = (0..4).map(|i| policy.delay(i).as_millis()).collect();
        assert_eq!(delays, vec![1000, 1600, 2560, 4096]);
    }

    #[test]
    fn huge_backoff_saturates_instead_of_panicking() {
        let policy = RetryPolicy { backoff: 1e300, ..RetryPolicy::default() };
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(3), Duration::MAX);

        let broken = RetryPolicy { backoff: f64::NAN, ..RetryPolicy::default() };
        assert_eq!(broken.delay(1), Duration::MAX);
    }
}
