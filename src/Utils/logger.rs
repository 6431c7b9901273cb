use crate::config::SolverConfig;
use crate::somelinalg::linalg_error::Result;
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// Initialize the logger: console logger always, file logger if a path is given.
/// Returns false if logging is off or a global logger was already set.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> bool {
    if level == LevelFilter::Off {
        return false;
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));

    // File logger
    if let Some(path) = log_file {
        if let Ok(file) = File::create(path) {
            loggers.push(WriteLogger::new(level, Config::default(), file));
        }
    }

    CombinedLogger::init(loggers).is_ok()
}

/// same with the level taken from `SolverConfig::log_level`
pub fn init_logger_from_config(config: &SolverConfig, log_file: Option<&Path>) -> Result<bool> {
    let level = config.level_filter()?;
    Ok(init_logger(level, log_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::somelinalg::gauss_elimination::solve_gaussian;
    use crate::somelinalg::linalg_error::LinSysError;
    use crate::somelinalg::matrix_ops::from_rows;

    #[test]
    fn test_logging_off() {
        let config = SolverConfig::default().with_log_level(Some("off".to_string()));
        assert_eq!(init_logger_from_config(&config, None).unwrap(), false);
        let bad = SolverConfig::default().with_log_level(Some("loud".to_string()));
        assert!(matches!(
            init_logger_from_config(&bad, None),
            Err(LinSysError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_file_logger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solver.log");
        // another test may have installed the global logger first
        let installed = init_logger(LevelFilter::Info, Some(&path));
        let ab = from_rows(&[vec![2.0, 1.0, 3.0], vec![1.0, 3.0, 5.0]]).unwrap();
        solve_gaussian(&ab).unwrap();
        log::logger().flush();
        assert!(path.exists());
        if installed {
            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.contains("Gaussian elimination finished"));
        }
        // second initialization is refused
        assert!(!init_logger(LevelFilter::Info, None));
    }
}
