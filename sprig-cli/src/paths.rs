//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "sprig";
const APPLICATION: &str = "sprig";

/// Name of the log file written by the current run.
const LATEST_LOG: &str = "latest.log";

/// Prefix of archived logs. Pruning never touches other files.
const ARCHIVE_PREFIX: &str = "sprig-";

/// Maximum number of archived logs to keep.
const MAX_ARCHIVES: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs go.
///
/// - Linux: `$XDG_CACHE_HOME/sprig` or `~/.cache/sprig`
/// - macOS: `~/Library/Caches/dev.sprig.sprig`
/// - Windows: `C:\Users\<User>\AppData\Local\sprig\sprig\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/sprig` or `~/.config/sprig`
/// - macOS: `~/Library/Application Support/dev.sprig.sprig`
/// - Windows: `C:\Users\<User>\AppData\Roaming\sprig\sprig\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Config file used when `--config` is not given.
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous run's log and prune old archives.
///
/// Call this at startup before creating the new log file. Failures are
/// ignored: a missing archive never stops the CLI.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let _ = archive_latest(&cache, Local::now());
    let _ = prune_archives(&cache, MAX_ARCHIVES);
}

/// `sprig-YYYYmmdd_HHMMSS.log`; names sort in time order.
fn archive_name(finished: DateTime<Local>) -> String {
    format!("{}{}.log", ARCHIVE_PREFIX, finished.format("%Y%m%d_%H%M%S"))
}

fn is_archive(name: &str) -> bool {
    name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log")
}

/// Rename `latest.log`, returning the archive path if there was one.
fn archive_latest(cache: &Path, finished: DateTime<Local>) -> io::Result<Option<PathBuf>> {
    let latest = cache.join(LATEST_LOG);
    if !latest.exists() {
        return Ok(None);
    }
    let archived = cache.join(archive_name(finished));
    fs::rename(&latest, &archived)?;
    Ok(Some(archived))
}

/// Delete the oldest archives beyond `keep`. Returns how many were removed.
fn prune_archives(cache: &Path, keep: usize) -> io::Result<usize> {
    let mut archives: Vec<PathBuf> = fs::read_dir(cache)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_archive)
        })
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        fs::remove_file(path)?;
    }
    Ok(excess)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sprig-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_archive_latest() {
        let dir = scratch("archive");
        assert_eq!(archive_latest(&dir, at(9)).unwrap(), None);

        fs::write(dir.join(LATEST_LOG), "previous run").unwrap();
        let archived = archive_latest(&dir, at(9)).unwrap().unwrap();

        assert_eq!(archived, dir.join("sprig-20240301_090000.log"));
        assert_eq!(fs::read_to_string(&archived).unwrap(), "previous run");
        assert!(!dir.join(LATEST_LOG).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_prune_keeps_newest_archives_only() {
        let dir = scratch("prune");
        for hour in 1..=5 {
            fs::write(dir.join(archive_name(at(hour))), "").unwrap();
        }
        fs::write(dir.join(LATEST_LOG), "").unwrap();
        fs::write(dir.join("other-tool.log"), "").unwrap();

        assert_eq!(prune_archives(&dir, 2).unwrap(), 3);

        let mut left: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec![
                LATEST_LOG.to_string(),
                "other-tool.log".to_string(),
                "sprig-20240301_040000.log".to_string(),
                "sprig-20240301_050000.log".to_string(),
            ]
        );
        fs::remove_dir_all(&dir).unwrap();
    }
}
