use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Setup logging.
pub fn init() -> Result<()> {
    let log_path = std::env::var("BOT_LOGS").unwrap_or_else(|_| "bot.log".to_string());
    let level = level_from_env(std::env::var("BOT_LOG_LEVEL").ok().as_deref())?;

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Cyan)
        .debug(Color::Green)
        .trace(Color::BrightBlack);

    let base = fern::Dispatch::new()
        .level(level)
        .level_for("hyper", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn);

    let file_cfg = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| "X".to_string()),
                record.level(),
                message
            ))
        })
        .chain(fern::log_file(&log_path).with_context(|| format!("Failed to open {}", log_path))?);

    let stdout_cfg = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}:{}][{}] {}",
                record.target(),
                record
                    .line()
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| "X".to_string()),
                colors.color(record.level()),
                message
            ))
        })
        .chain(std::io::stdout());

    base.chain(file_cfg).chain(stdout_cfg).apply()?;

    Ok(())
}

fn level_from_env(value: Option<&str>) -> Result<LevelFilter> {
    match value {
        None => Ok(LevelFilter::Info),
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid BOT_LOG_LEVEL '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_info() {
        assert_eq!(level_from_env(None).unwrap(), LevelFilter::Info);
    }

    #[test]
    fn level_is_parsed_case_insensitively() {
        assert_eq!(level_from_env(Some("DEBUG")).unwrap(), LevelFilter::Debug);
        assert_eq!(level_from_env(Some("off")).unwrap(), LevelFilter::Off);
        assert!(level_from_env(Some("chatty")).is_err());
    }
}
