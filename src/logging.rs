//! File-backed debug logging. The terminal UI owns stdout, so log output
//! goes to `<data_dir>/log/` instead. Disabled unless config asks for it.

use std::path::Path;

use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Start the logger at the configured level, or do nothing when the level
/// is "off". The returned handle must stay alive for the process lifetime;
/// dropping it flushes and shuts logging down.
pub fn init(level: &str, data_dir: &Path) -> Result<Option<LoggerHandle>, String> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(None);
    }

    let log_dir = data_dir.join("log");
    std::fs::create_dir_all(&log_dir).map_err(|e| {
        format!(
            "could not create log directory {}: {e}",
            log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|e| format!("invalid log level `{level}`: {e}"))?
        .log_to_file(FileSpec::default().directory(&log_dir).basename("tk"))
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| format!("could not start logger: {e}"))?;

    log::info!("logging started at level {level}");
    Ok(Some(handle))
}
