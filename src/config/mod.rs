pub mod loader;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub criteria: CriteriaConfig,
    pub logging: Option<LoggingConfig>,
    pub output: Option<OutputConfig>,
}

/// Velocity thresholds, all in cm/s except the dimensionless ratio
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CriteriaConfig {
    /// PSV at which 50-69% stenosis begins
    pub psv_moderate: f64,
    /// PSV at which >=70% stenosis begins
    pub psv_severe: f64,
    pub edv_moderate: f64,
    /// EDV that escalates any PSV band to >=70%
    pub edv_severe: f64,
    pub ratio_moderate: f64,
    /// ICA/CCA ratio that escalates any PSV band to >=70%
    pub ratio_severe: f64,
    /// Tier gap between PSV and a lower secondary band that makes a case indeterminate
    pub discordance_tiers: u8,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            psv_moderate: 125.0,
            psv_severe: 230.0,
            edv_moderate: 40.0,
            edv_severe: 100.0,
            ratio_moderate: 2.0,
            ratio_severe: 4.0,
            discordance_tiers: 2,
        }
    }
}

impl CriteriaConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let pairs = [
            ("psv", self.psv_moderate, self.psv_severe),
            ("edv", self.edv_moderate, self.edv_severe),
            ("ratio", self.ratio_moderate, self.ratio_severe),
        ];

        for (name, moderate, severe) in pairs {
            for (suffix, value) in [("moderate", moderate), ("severe", severe)] {
                if !value.is_finite() || value <= 0.0 {
                    anyhow::bail!(
                        "criteria.{}_{} must be a positive number, got {}",
                        name,
                        suffix,
                        value
                    );
                }
            }
            if moderate >= severe {
                anyhow::bail!(
                    "criteria.{name}_moderate ({moderate}) must be below criteria.{name}_severe ({severe})"
                );
            }
        }

        if self.discordance_tiers == 0 {
            anyhow::bail!("criteria.discordance_tiers must be at least 1");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    pub fn output_format(&self) -> OutputFormat {
        self.output.as_ref().map(|o| o.format).unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.logging
            .as_ref()
            .and_then(|l| l.level.parse::<log::LevelFilter>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_are_valid() {
        assert!(CriteriaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let criteria = CriteriaConfig {
            psv_moderate: 250.0,
            ..CriteriaConfig::default()
        };
        let err = criteria.validate().unwrap_err().to_string();
        assert!(err.contains("psv_moderate"), "unexpected error: {err}");
    }

    #[test]
    fn test_non_positive_and_nan_rejected() {
        let zero = CriteriaConfig {
            ratio_moderate: 0.0,
            ..CriteriaConfig::default()
        };
        assert!(zero.validate().is_err());

        let nan = CriteriaConfig {
            edv_severe: f64::NAN,
            ..CriteriaConfig::default()
        };
        assert!(nan.validate().is_err());

        let no_tiers = CriteriaConfig {
            discordance_tiers: 0,
            ..CriteriaConfig::default()
        };
        assert!(no_tiers.validate().is_err());
    }

    #[test]
    fn test_partial_criteria_fill_defaults() {
        let config: Config = serde_yaml::from_str("criteria:\n  psv_severe: 240\n").unwrap();
        assert_eq!(config.criteria.psv_severe, 240.0);
        assert_eq!(config.criteria.psv_moderate, 125.0);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.log_level().is_none());
    }

    #[test]
    fn test_output_and_logging_sections() {
        let yaml = "output:\n  format: json\nlogging:\n  level: debug\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.log_level(), Some(log::LevelFilter::Debug));
    }
}
