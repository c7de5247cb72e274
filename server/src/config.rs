use std::path::PathBuf;

use anyhow::{Context, Result};
use products_hr::fixtures::DEFAULT_SEED;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub processing_delay_scale: f64,
    pub fixture_seed: u64,
    pub seed_fixtures: bool,
    pub reports_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["http://localhost:5173".into()],
            processing_delay_scale: 1.0,
            fixture_seed: DEFAULT_SEED,
            seed_fixtures: true,
            reports_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every setting through `lookup`; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let processing_delay_scale = match lookup("PROCESSING_DELAY_SCALE") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("invalid PROCESSING_DELAY_SCALE {raw:?}"))?,
            None => defaults.processing_delay_scale,
        };

        let fixture_seed = match lookup("FIXTURE_SEED") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid FIXTURE_SEED {raw:?}"))?,
            None => defaults.fixture_seed,
        };

        let seed_fixtures = lookup("SEED_FIXTURES")
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed_fixtures);

        let reports_dir = lookup("REPORTS_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.reports_dir);

        Ok(Self {
            cors_allowed_origins,
            processing_delay_scale,
            fixture_seed,
            seed_fixtures,
            reports_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.processing_delay_scale, 1.0);
        assert_eq!(config.fixture_seed, DEFAULT_SEED);
        assert!(config.seed_fixtures);
        assert_eq!(config.reports_dir, PathBuf::from("."));
    }

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        let config = load(&[(
            "CORS_ALLOWED_ORIGINS",
            " http://a.test , ,http://b.test",
        )])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn flags_and_numbers_parse() {
        let config = load(&[
            ("SEED_FIXTURES", "no"),
            ("PROCESSING_DELAY_SCALE", "0"),
            ("FIXTURE_SEED", "7"),
            ("REPORTS_DIR", "/tmp/reports"),
        ])
        .unwrap();
        assert!(!config.seed_fixtures);
        assert_eq!(config.processing_delay_scale, 0.0);
        assert_eq!(config.fixture_seed, 7);
        assert_eq!(config.reports_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(load(&[("FIXTURE_SEED", "abc")]).is_err());
        assert!(load(&[("PROCESSING_DELAY_SCALE", "fast")]).is_err());
    }
}
