//! Logger setup.

use log::LevelFilter;

/// Environment variable overriding the configured log level.
pub const LOG_ENV: &str = "GLCANVAS_LOG";

/// Picks the log level: `env` wins over `configured` when set. An unparsable level is
/// returned as the error so it can be reported once logging is up.
pub fn resolve_level(configured: &str, env: Option<&str>) -> Result<LevelFilter, String> {
    let requested = env.unwrap_or(configured).trim();
    requested
        .parse::<LevelFilter>()
        .map_err(|_| requested.to_string())
}

/// Sends every record at or above `level` to stderr as
/// `[2026-01-01 12:00:00][INFO][target] message`.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_is_used_without_override() {
        assert_eq!(resolve_level("debug", None), Ok(LevelFilter::Debug));
        assert_eq!(resolve_level("WARN", None), Ok(LevelFilter::Warn));
    }

    #[test]
    fn test_environment_overrides_config() {
        assert_eq!(resolve_level("info", Some("trace")), Ok(LevelFilter::Trace));
        assert_eq!(resolve_level("info", Some(" off ")), Ok(LevelFilter::Off));
    }

    #[test]
    fn test_unknown_level_is_reported() {
        assert_eq!(resolve_level("loud", None), Err("loud".to_string()));
        assert_eq!(resolve_level("info", Some("")), Err(String::new()));
    }
}
