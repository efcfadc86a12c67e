use {
    crate::{
        config::{PERSISTENCE, history_cache_filename},
        domain::Ticker,
        models::OhlcvTimeSeries,
        utils::{how_many_seconds_ago, now_timestamp_ms},
    },
    anyhow::{Context, Result, bail},
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    std::{
        fs::{self, File},
        io::{BufReader, BufWriter},
        path::{Path, PathBuf},
        time::{Duration, SystemTime},
    },
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Identifies one history query.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    pub ticker: Ticker,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoryKey {
    pub fn new(ticker: Ticker, start: NaiveDate, end: NaiveDate) -> Self {
        Self { ticker, start, end }
    }

    pub fn cache_path(&self, dir: &Path) -> PathBuf {
        dir.join(history_cache_filename(
            self.ticker.symbol(),
            self.start,
            self.end,
        ))
    }
}

/// Binary cache file wrapper with metadata
#[derive(Serialize, Deserialize, Debug)]
struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub key: HistoryKey,
    pub data: OhlcvTimeSeries,
}

/// Reads a cached history if it exists, matches `key`, has the current
/// format version and is younger than `max_age_secs`.
pub fn read_valid_cache(dir: &Path, key: &HistoryKey, max_age_secs: i64) -> Result<OhlcvTimeSeries> {
    let full_path = key.cache_path(dir);

    let file = File::open(&full_path).context(format!("Failed to open file: {:?}", full_path))?;
    let mut reader = BufReader::new(file);
    let cache: CacheFile = bincode::deserialize_from(&mut reader)
        .context(format!("Failed to deserialize cache from: {:?}", full_path))?;

    if cache.version != PERSISTENCE.history.version {
        bail!(
            "Cache version mismatch: file v{} vs required v{}",
            cache.version,
            PERSISTENCE.history.version
        );
    }

    if cache.key != *key {
        bail!("Cache key mismatch in {:?}", full_path);
    }

    let seconds_ago = how_many_seconds_ago(cache.timestamp_ms);
    if seconds_ago > max_age_secs {
        bail!(
            "Cache too old: created {} seconds ago (limit: {} seconds)",
            seconds_ago,
            max_age_secs
        );
    }

    #[cfg(debug_assertions)]
    if DF.log_cache {
        log::info!(
            "Cache valid: v{}, {}s old (limit {}s), {} bars",
            cache.version,
            seconds_ago,
            max_age_secs,
            cache.data.len()
        );
    }

    Ok(cache.data)
}

// Helper function to create a new file and any missing parent directories.
fn create_file_with_parents(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))
}

pub fn write_cache(dir: &Path, key: &HistoryKey, series: &OhlcvTimeSeries) -> Result<()> {
    let full_path = key.cache_path(dir);
    let writer = BufWriter::new(create_file_with_parents(&full_path)?);

    let cache = CacheFile {
        version: PERSISTENCE.history.version,
        timestamp_ms: now_timestamp_ms(),
        key: *key,
        data: series.clone(),
    };

    bincode::serialize_into(writer, &cache)
        .with_context(|| format!("Failed to serialize cache to: {}", full_path.display()))?;

    #[cfg(debug_assertions)]
    if DF.log_cache {
        log::info!("Cache written: {}", full_path.display());
    }

    if let Err(e) = prune_expired(dir, PERSISTENCE.history.max_age_secs) {
        log::warn!("Could not prune history cache: {:#}", e);
    }
    Ok(())
}

/// Deletes `.bin` cache files that are older than `max_age_secs` or carry a
/// different format version. Returns how many were removed.
fn prune_expired(dir: &Path, max_age_secs: i64) -> Result<usize> {
    let current_suffix = format!("_v{}.bin", PERSISTENCE.history.version);
    let max_age = Duration::from_secs(u64::try_from(max_age_secs).unwrap_or_default());
    let now = SystemTime::now();

    let mut removed = 0;
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".bin") {
            continue;
        }

        let expired = !name.ends_with(&current_suffix)
            || fs::metadata(&path)
                .and_then(|m| m.modified())
                .map(|modified| now.duration_since(modified).unwrap_or_default() > max_age)
                .unwrap_or(false);

        if expired {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed += 1;
        }
    }

    #[cfg(debug_assertions)]
    if DF.log_cache && removed > 0 {
        log::info!("Pruned {} expired cache files from {}", removed, dir.display());
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ClosePrice, HighPrice, LowPrice, OpenPrice, Volume},
        domain::Candle,
    };

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "stock_scope_cache_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn age_file(path: &Path, secs: u64) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(secs))
            .unwrap();
    }

    fn series() -> OhlcvTimeSeries {
        let candles = (1..=3)
            .map(|d| {
                Candle::new(
                    NaiveDate::from_ymd_opt(2024, 4, d).unwrap(),
                    OpenPrice::new(10.0),
                    HighPrice::new(11.0),
                    LowPrice::new(9.0),
                    ClosePrice::new(10.0 + d as f64),
                    Volume::new(500.0),
                )
            })
            .collect();
        OhlcvTimeSeries::from_candles(Ticker::Goog, candles).unwrap()
    }

    fn key() -> HistoryKey {
        HistoryKey::new(
            Ticker::Goog,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(),
        )
    }

    #[test]
    fn written_cache_reads_back() {
        let dir = temp_dir("roundtrip");
        write_cache(&dir, &key(), &series()).unwrap();
        assert!(dir.join("GOOG_2024-04-01_2024-04-04_v1.bin").exists());
        let loaded = read_valid_cache(&dir, &key(), 60).unwrap();
        assert_eq!(loaded, series());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn stale_or_missing_cache_is_rejected() {
        let dir = temp_dir("stale");
        assert!(read_valid_cache(&dir, &key(), 60).is_err());
        write_cache(&dir, &key(), &series()).unwrap();
        let err = read_valid_cache(&dir, &key(), -1).unwrap_err();
        assert!(err.to_string().contains("too old"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn expired_and_foreign_version_files_are_pruned() {
        let dir = temp_dir("prune");
        write_cache(&dir, &key(), &series()).unwrap();
        let fresh = key().cache_path(&dir);

        let other = HistoryKey::new(
            Ticker::Goog,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(),
        );
        write_cache(&dir, &other, &series()).unwrap();
        let old = other.cache_path(&dir);
        age_file(&old, 7_200);

        let foreign = dir.join("GOOG_2024-04-01_2024-04-04_v0.bin");
        fs::write(&foreign, b"old format").unwrap();
        let unrelated = dir.join("notes.txt");
        fs::write(&unrelated, b"keep").unwrap();

        assert_eq!(prune_expired(&dir, 3_600).unwrap(), 2);
        assert!(fresh.exists());
        assert!(!old.exists());
        assert!(!foreign.exists());
        assert!(unrelated.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writing_a_new_range_removes_stale_ones() {
        let dir = temp_dir("prune_on_write");
        let stale = HistoryKey::new(
            Ticker::Goog,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(),
        );
        write_cache(&dir, &stale, &series()).unwrap();
        age_file(&stale.cache_path(&dir), 2 * PERSISTENCE.history.max_age_secs as u64);

        write_cache(&dir, &key(), &series()).unwrap();
        assert!(!stale.cache_path(&dir).exists());
        assert!(key().cache_path(&dir).exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
