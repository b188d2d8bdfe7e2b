use std::path::Path;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

/// Starts file logging under `log_dir`, echoing everything to stdout and
/// warnings to stderr. Keep the returned handle alive for the process lifetime.
pub fn setup_logging<P: AsRef<Path>>(base_level: &str, log_dir: P) -> LoggerHandle {
    Logger::try_with_env_or_str(base_level)
        .unwrap_or_else(|e| panic!("Invalid log filter: {}", e))
        .log_to_file(
            FileSpec::default()
                .directory(log_dir.as_ref())
                .basename("thermoseg"),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::All)
        .rotate(
            Criterion::Size(1024 * 1024), //1MB
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e))
}
