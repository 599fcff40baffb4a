use std::env;
use std::path::PathBuf;

use crate::call_board::CallMode;

pub const DEFAULT_ADS_INTERVAL: i64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub web_root: PathBuf,
    pub ads_interval: i64,
    pub call_mode: CallMode,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://database/db.sqlite".to_string());
        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let web_root = var("WEB_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./web"));
        let ads_interval = var("ADS_INTERVAL")
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ADS_INTERVAL);
        let call_mode = match var("CALL_MODE") {
            Some(s) => s.parse::<CallMode>()?,
            None => CallMode::Slot,
        };

        Ok(Self {
            database_url,
            bind_addr,
            web_root,
            ads_interval,
            call_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config_with(&[]).unwrap();
        assert_eq!(cfg.database_url, "sqlite://database/db.sqlite");
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.web_root, PathBuf::from("./web"));
        assert_eq!(cfg.ads_interval, DEFAULT_ADS_INTERVAL);
        assert_eq!(cfg.call_mode, CallMode::Slot);
    }

    #[test]
    fn ads_interval_falls_back_on_bad_values() {
        assert_eq!(config_with(&[("ADS_INTERVAL", "15")]).unwrap().ads_interval, 15);
        assert_eq!(
            config_with(&[("ADS_INTERVAL", "often")]).unwrap().ads_interval,
            DEFAULT_ADS_INTERVAL
        );
        assert_eq!(
            config_with(&[("ADS_INTERVAL", "-3")]).unwrap().ads_interval,
            DEFAULT_ADS_INTERVAL
        );
    }

    #[test]
    fn call_mode_is_parsed_or_rejected() {
        assert_eq!(
            config_with(&[("CALL_MODE", "list")]).unwrap().call_mode,
            CallMode::List
        );

        let err = config_with(&[("CALL_MODE", "stack")]).unwrap_err();
        assert!(err.to_string().contains("unknown call mode 'stack'"));
    }
}
