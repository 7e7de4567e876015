use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::ensure_tally_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub metrics: MetricsSection,
    pub ledger: LedgerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsSection {
    /// Scheme, host and port of the metrics API
    pub host: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LedgerSection {
    /// Where the ledger blobs live (default: <tally home>/store)
    pub data_dir: Option<PathBuf>,
    pub currency_symbol: String,
    /// IANA name used to pick "today" for new entries
    pub timezone: String,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            host: tally_metrics::DEFAULT_HOST.to_string(),
            timeout_secs: tally_metrics::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            data_dir: None,
            currency_symbol: "₹".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

impl MetricsSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LedgerSection {
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(ensure_tally_home()?.join("store")),
        }
    }

    /// Today's calendar date in the configured timezone
    pub fn today(&self) -> Result<NaiveDate> {
        today_in(&self.timezone, Utc::now())
    }
}

pub fn today_in(tz: &str, now: DateTime<Utc>) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Every key the file may set, as `section.key`
pub const KNOWN_KEYS: [&str; 5] = [
    "metrics.host",
    "metrics.timeout_secs",
    "ledger.data_dir",
    "ledger.currency_symbol",
    "ledger.timezone",
];

const HEADER: &str = "# tally configuration. Omitted keys fall back to built-in defaults.\n\n";

/// Which keys a config file actually set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyReport {
    /// Known keys absent from the file
    pub defaulted: Vec<&'static str>,
    /// Keys or sections tally does not read
    pub unknown: Vec<String>,
}

impl KeyReport {
    fn all_defaulted() -> Self {
        Self {
            defaulted: KNOWN_KEYS.to_vec(),
            unknown: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    /// False when no file exists and everything is a default
    pub from_file: bool,
    pub report: KeyReport,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<(Config, KeyReport)> {
    let cfg: Config = toml::from_str(s).context("parse config.toml")?;
    let table: toml::Table = toml::from_str(s).context("parse config.toml")?;
    Ok((cfg, key_report(&table)))
}

fn key_report(table: &toml::Table) -> KeyReport {
    let section_key = |dotted: &str| -> Option<toml::Value> {
        let (section, key) = dotted.split_once('.')?;
        table.get(section)?.as_table()?.get(key).cloned()
    };
    let defaulted = KNOWN_KEYS
        .iter()
        .copied()
        .filter(|k| section_key(*k).is_none())
        .collect();

    let mut unknown = Vec::new();
    for (section, value) in table {
        let known_section = KNOWN_KEYS
            .iter()
            .any(|k| k.split_once('.').map(|(s, _)| s) == Some(section.as_str()));
        match value.as_table() {
            Some(inner) if known_section => {
                for key in inner.keys() {
                    let dotted = format!("{section}.{key}");
                    if !KNOWN_KEYS.iter().any(|k| *k == dotted) {
                        unknown.push(dotted);
                    }
                }
            }
            _ => unknown.push(section.clone()),
        }
    }

    KeyReport { defaulted, unknown }
}

pub fn load_config() -> Result<LoadedConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<LoadedConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(LoadedConfig {
            config: Config::default(),
            path: path.to_path_buf(),
            from_file: false,
            report: KeyReport::all_defaulted(),
        });
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let (config, report) =
        parse_config(&s).with_context(|| format!("load {}", path.display()))?;
    for key in &report.unknown {
        tracing::warn!(key = %key, path = %path.display(), "ignoring unknown config key");
    }
    if !report.defaulted.is_empty() {
        tracing::debug!(keys = ?report.defaulted, "config keys using defaults");
    }
    Ok(LoadedConfig {
        config,
        path: path.to_path_buf(),
        from_file: true,
        report,
    })
}

/// Write a commented default config unless one exists. Returns whether a
/// file was written.
pub fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let body = toml::to_string_pretty(&Config::default()).context("serialize config")?;
    fs::write(path, format!("{HEADER}{body}"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(true)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if write_default_config(&p)? {
        println!("Wrote {}", p.display());
    } else {
        println!("Config already exists: {}", p.display());
    }
    Ok(())
}

/// The effective config as TOML, prefixed with comments naming its source
/// and the keys left at their defaults.
pub fn describe(loaded: &LoadedConfig) -> Result<String> {
    let mut out = String::new();
    if loaded.from_file {
        out.push_str(&format!("# from {}\n", loaded.path.display()));
    } else {
        out.push_str(&format!("# {} not found, all defaults\n", loaded.path.display()));
    }
    if loaded.from_file && !loaded.report.defaulted.is_empty() {
        out.push_str(&format!("# defaults: {}\n", loaded.report.defaulted.join(", ")));
    }
    if !loaded.report.unknown.is_empty() {
        out.push_str(&format!("# ignored: {}\n", loaded.report.unknown.join(", ")));
    }
    out.push('\n');
    out.push_str(&toml::to_string_pretty(&loaded.config).context("serialize config")?);
    Ok(out)
}
