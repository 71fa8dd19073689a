//! Driver configuration (environment + command line).

use std::path::PathBuf;

use thiserror::Error;

pub const SCRIPT_ENV: &str = "STOCKFLOW_SCRIPT";
pub const REPORT_ENV: &str = "STOCKFLOW_REPORT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no script given: pass a path or set STOCKFLOW_SCRIPT")]
    MissingScript,

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub script: PathBuf,
    /// Print a JSON snapshot of inventory and pending orders at the end.
    pub report: bool,
}

impl SimConfig {
    /// Resolve from process arguments (first positional wins over
    /// `STOCKFLOW_SCRIPT`) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::args().skip(1),
            std::env::var(SCRIPT_ENV).ok(),
            std::env::var(REPORT_ENV).ok(),
        )
    }

    pub fn resolve(
        args: impl IntoIterator<Item = String>,
        script_env: Option<String>,
        report_env: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut script = None;
        let mut report = report_env.is_some_and(|v| flag(&v));

        for arg in args {
            match arg.as_str() {
                "--report" => report = true,
                s if s.starts_with("--") => return Err(ConfigError::UnexpectedArgument(arg)),
                _ if script.is_none() => script = Some(PathBuf::from(arg)),
                _ => return Err(ConfigError::UnexpectedArgument(arg)),
            }
        }

        let script = script
            .or_else(|| script_env.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
            .ok_or(ConfigError::MissingScript)?;

        Ok(Self { script, report })
    }
}

fn flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn argument_wins_over_environment() {
        let config = SimConfig::resolve(args(&["a.json"]), Some("b.json".into()), None).unwrap();
        assert_eq!(config.script, PathBuf::from("a.json"));
        assert!(!config.report);
    }

    #[test]
    fn falls_back_to_environment() {
        let config =
            SimConfig::resolve(args(&[]), Some("b.json".into()), Some("true".into())).unwrap();
        assert_eq!(config.script, PathBuf::from("b.json"));
        assert!(config.report);
    }

    #[test]
    fn report_flag() {
        let config = SimConfig::resolve(args(&["--report", "a.json"]), None, None).unwrap();
        assert!(config.report);
    }

    #[test]
    fn missing_script_is_an_error() {
        let err = SimConfig::resolve(args(&[]), Some("  ".into()), None).unwrap_err();
        assert_eq!(err, ConfigError::MissingScript);
    }

    #[test]
    fn rejects_unknown_flags_and_extra_paths() {
        assert!(matches!(
            SimConfig::resolve(args(&["--verbose"]), None, None),
            Err(ConfigError::UnexpectedArgument(_))
        ));
        assert!(matches!(
            SimConfig::resolve(args(&["a.json", "b.json"]), None, None),
            Err(ConfigError::UnexpectedArgument(_))
        ));
    }
}
