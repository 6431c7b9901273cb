//! solver settings shared by all methods
//! ```
//! use RustedLinSteps::config::SolverConfig;
//! let config = SolverConfig::from_toml_str(
//!     "[solver]\npivot_tolerance = 1e-10\nmax_iterations = 500\nlog_level = \"warn\"",
//! )
//! .unwrap();
//! assert_eq!(config.max_iterations, 500);
//! assert_eq!(config.pivot_tolerance, 1e-10);
//! ```
use crate::somelinalg::linalg_error::{LinSysError, Result};
use crate::somelinalg::seidel::SeidelUpdate;
use log::LevelFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// pivots and sweep denominators with |v| <= pivot_tolerance are treated as zero
    pub pivot_tolerance: f64,
    /// cap on the number of Seidel iterates
    pub max_iterations: usize,
    /// largest order accepted by the recursive cofactor determinant
    pub max_cofactor_order: usize,
    pub seidel_update: SeidelUpdate,
    /// "off", "none", "debug", "info", "warn" or "error"
    pub log_level: Option<String>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            pivot_tolerance: 1e-12,
            max_iterations: 10_000,
            max_cofactor_order: 8,
            seidel_update: SeidelUpdate::PreviousIterate,
            log_level: Some("info".to_string()),
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }
    ////////////////////////////SETTERS///////////////////////////////////
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
    pub fn with_max_cofactor_order(mut self, order: usize) -> Self {
        self.max_cofactor_order = order;
        self
    }
    pub fn with_seidel_update(mut self, update: SeidelUpdate) -> Self {
        self.seidel_update = update;
        self
    }
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        self.log_level = level;
        self
    }

    /// translates the textual log level, None falls back to Info
    pub fn level_filter(&self) -> Result<LevelFilter> {
        let Some(level) = self.log_level.as_ref() else {
            return Ok(LevelFilter::Info);
        };
        match level.as_str() {
            "off" | "none" => Ok(LevelFilter::Off),
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            other => Err(LinSysError::InvalidConfig(format!(
                "loglevel must be off, none, debug, info, warn or error, got {}",
                other
            ))),
        }
    }

    /// reads the `[solver]` table of a TOML document, missing keys keep their defaults
    pub fn from_toml_str(doc: &str) -> Result<Self> {
        let table: toml::Table = doc
            .parse()
            .map_err(|e: toml::de::Error| LinSysError::InvalidConfig(e.to_string()))?;
        let mut config = SolverConfig::default();
        let Some(section) = table.get("solver") else {
            return Ok(config);
        };
        let section = section
            .as_table()
            .ok_or_else(|| LinSysError::InvalidConfig("[solver] must be a table".to_string()))?;

        if let Some(v) = section.get("pivot_tolerance") {
            // integers are accepted too: pivot_tolerance = 0
            config.pivot_tolerance = v
                .as_float()
                .or_else(|| v.as_integer().map(|i| i as f64))
                .ok_or_else(|| bad_type("pivot_tolerance", "a number"))?;
            if !(config.pivot_tolerance >= 0.0) {
                return Err(LinSysError::InvalidConfig(
                    "pivot_tolerance must be non-negative".to_string(),
                ));
            }
        }
        if let Some(v) = section.get("max_iterations") {
            config.max_iterations = positive_integer(v, "max_iterations")?;
        }
        if let Some(v) = section.get("max_cofactor_order") {
            config.max_cofactor_order = positive_integer(v, "max_cofactor_order")?;
        }
        if let Some(v) = section.get("seidel_update") {
            let name = v
                .as_str()
                .ok_or_else(|| bad_type("seidel_update", "a string"))?;
            config.seidel_update = name
                .parse()
                .map_err(|_| LinSysError::InvalidConfig(format!("unknown seidel_update {}", name)))?;
        }
        if let Some(v) = section.get("log_level") {
            let level = v.as_str().ok_or_else(|| bad_type("log_level", "a string"))?;
            config.log_level = Some(level.to_string());
            config.level_filter()?;
        }
        Ok(config)
    }
}

fn bad_type(key: &str, what: &str) -> LinSysError {
    LinSysError::InvalidConfig(format!("{} must be {}", key, what))
}

fn positive_integer(v: &toml::Value, key: &str) -> Result<usize> {
    match v.as_integer() {
        Some(i) if i > 0 => Ok(i as usize),
        _ => Err(bad_type(key, "a positive integer")),
    }
}
