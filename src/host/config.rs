use thiserror::Error;

use crate::infra::DEFAULT_SHUFFLE_PASSES;
use crate::time_ctrl::TimeRules;

pub const ENV_ACTION_TIMEOUT: &str = "POKER_ACTION_TIMEOUT_SECS";
pub const ENV_SHUFFLE_PASSES: &str = "POKER_SHUFFLE_PASSES";
pub const ENV_RNG_SEED: &str = "POKER_RNG_SEED";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HostConfigError {
    #[error("Переменная {name} должна быть целым числом, получено {value:?}")]
    NotANumber { name: &'static str, value: String },

    #[error("Переменная {name} должна быть больше нуля")]
    Zero { name: &'static str },
}

/// Настройки хоста столов.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    pub time_rules: TimeRules,
    pub shuffle_passes: u32,
    /// Фиксированный seed: раздачи воспроизводимы.
    pub rng_seed: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            time_rules: TimeRules::standard(),
            shuffle_passes: DEFAULT_SHUFFLE_PASSES,
            rng_seed: None,
        }
    }
}

impl HostConfig {
    /// Из переменных окружения; отсутствующие берутся по умолчанию.
    pub fn from_env() -> Result<Self, HostConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, HostConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse_var(&lookup, ENV_ACTION_TIMEOUT)? {
            if secs == 0 {
                return Err(HostConfigError::Zero { name: ENV_ACTION_TIMEOUT });
            }
            config.time_rules = TimeRules::new(secs);
        }
        if let Some(passes) = parse_var(&lookup, ENV_SHUFFLE_PASSES)? {
            if passes == 0 {
                return Err(HostConfigError::Zero { name: ENV_SHUFFLE_PASSES });
            }
            config.shuffle_passes = u32::try_from(passes).map_err(|_| HostConfigError::NotANumber {
                name: ENV_SHUFFLE_PASSES,
                value: passes.to_string(),
            })?;
        }
        config.rng_seed = parse_var(&lookup, ENV_RNG_SEED)?;

        Ok(config)
    }
}

fn parse_var<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, HostConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| HostConfigError::NotANumber { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = HostConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.time_rules.action_timeout_secs, 60);
        assert_eq!(config.shuffle_passes, 10);
    }

    #[test]
    fn reads_overrides() {
        let config = HostConfig::from_lookup(lookup(&[
            (ENV_ACTION_TIMEOUT, "15"),
            (ENV_SHUFFLE_PASSES, "7"),
            (ENV_RNG_SEED, "42"),
        ]))
        .unwrap();
        assert_eq!(config.time_rules, TimeRules::new(15));
        assert_eq!(config.shuffle_passes, 7);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            HostConfig::from_lookup(lookup(&[(ENV_ACTION_TIMEOUT, "soon")])),
            Err(HostConfigError::NotANumber { .. })
        ));
        assert_eq!(
            HostConfig::from_lookup(lookup(&[(ENV_ACTION_TIMEOUT, "0")])),
            Err(HostConfigError::Zero { name: ENV_ACTION_TIMEOUT })
        );
    }
}
