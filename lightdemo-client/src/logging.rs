//! Logger setup.
//!
//! Records go to stderr and to `lightdemo.log` in the user's local data directory. The level is
//! read from `LIGHTDEMO_LOG` (e.g. `debug`) and defaults to `info`.

use std::path::PathBuf;

pub const LEVEL_VAR: &str = "LIGHTDEMO_LOG";

/// Parses a level filter, falling back to `Info` when unset or invalid.
fn level_from(value: Option<&str>) -> log::LevelFilter {
    value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("lightdemo").join("lightdemo.log"))
}

/// Initializes the global logger. Only the first call has an effect.
pub fn init() {
    let level = level_from(std::env::var(LEVEL_VAR).ok().as_deref());

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    let log_path = log_file_path();
    let log_file = log_path.as_ref().and_then(|path| {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).ok()?;
        }
        fern::log_file(path).ok()
    });
    let has_file = log_file.is_some();
    if let Some(file) = log_file {
        dispatch = dispatch.chain(file);
    }

    if dispatch.apply().is_err() {
        return;
    }

    match log_path.filter(|_| has_file) {
        Some(path) => log::debug!("Logging to '{}' at level {}", path.display(), level),
        None => log::warn!("Could not open a log file, logging to stderr only"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from() {
        assert_eq!(level_from(None), log::LevelFilter::Info);
        assert_eq!(level_from(Some("debug")), log::LevelFilter::Debug);
        assert_eq!(level_from(Some(" WARN ")), log::LevelFilter::Warn);
        assert_eq!(level_from(Some("off")), log::LevelFilter::Off);
        assert_eq!(level_from(Some("loud")), log::LevelFilter::Info);
    }
}
