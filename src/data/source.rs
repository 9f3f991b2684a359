//! Where question stores come from.
//!
//! Services hold a [`QuestionSource`] and ask it for a store on every
//! request. The plain file source re-reads the file each time; the cached
//! source keeps the parsed store until the file's modification time changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tracing::{debug, info};

use crate::error::LoadError;
use crate::models::QuestionStore;

use super::load_questions_from_json;

/// A provider of question stores.
pub trait QuestionSource: Send + Sync {
    /// Produce the current store. Blocking.
    fn load(&self) -> Result<Arc<QuestionStore>, LoadError>;
}

/// Reads the JSON file fresh on every load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionSource for JsonFileSource {
    fn load(&self) -> Result<Arc<QuestionStore>, LoadError> {
        load_questions_from_json(&self.path).map(Arc::new)
    }
}

/// Keeps the last parsed store and reloads when the file's mtime changes.
#[derive(Debug)]
pub struct CachedFileSource {
    path: PathBuf,
    cached: Mutex<Option<(SystemTime, Arc<QuestionStore>)>>,
}

impl CachedFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    fn modified(&self) -> Result<SystemTime, LoadError> {
        fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

impl QuestionSource for CachedFileSource {
    fn load(&self) -> Result<Arc<QuestionStore>, LoadError> {
        let modified = self.modified()?;

        // The entry is only ever replaced whole, so a poisoned value is usable.
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());

        if let Some((stamp, store)) = cached.as_ref() {
            if *stamp == modified {
                debug!(path = %self.path.display(), "serving cached questions");
                return Ok(Arc::clone(store));
            }
        }

        let store = Arc::new(load_questions_from_json(&self.path)?);
        info!(
            path = %self.path.display(),
            languages = store.languages().len(),
            questions = store.question_count(),
            "reloaded questions"
        );
        *cached = Some((modified, Arc::clone(&store)));

        Ok(store)
    }
}

/// A fixed, in-memory store.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    store: Arc<QuestionStore>,
}

impl StaticSource {
    pub fn new(store: QuestionStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl QuestionSource for StaticSource {
    fn load(&self) -> Result<Arc<QuestionStore>, LoadError> {
        Ok(Arc::clone(&self.store))
    }
}

/// Run a blocking load on the blocking pool, giving up after `timeout`.
///
/// On timeout the blocking read keeps running in the background and its
/// result is dropped.
pub async fn load_with_timeout(
    source: Arc<dyn QuestionSource>,
    timeout: Duration,
) -> Result<Arc<QuestionStore>, LoadError> {
    let task = tokio::task::spawn_blocking(move || source.load());

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(LoadError::Interrupted(join_err.to_string())),
        Err(_) => Err(LoadError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::thread;

    use uuid::Uuid;

    use super::*;

    const ONE_QUESTION: &str =
        r#"{"python": [{"question": "2+2?", "options": ["3", "4"], "correct": 1}]}"#;
    const TWO_LANGUAGES: &str = r#"{
        "python": [{"question": "2+2?", "options": ["3", "4"], "correct": 1}],
        "rust": [{"question": "1+1?", "options": ["2", "3"], "correct": 0}]
    }"#;

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("lang-quiz-{}.json", Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_json_source_reads_fresh_each_time() {
        let path = temp_file(ONE_QUESTION);
        let source = JsonFileSource::new(&path);

        assert_eq!(source.load().unwrap().languages(), vec!["python"]);
        fs::write(&path, TWO_LANGUAGES).unwrap();
        assert_eq!(source.load().unwrap().languages(), vec!["python", "rust"]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_cached_source_reuses_until_mtime_changes() {
        let path = temp_file(ONE_QUESTION);
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        set_mtime(&path, stamp);

        let source = CachedFileSource::new(&path);
        let first = source.load().unwrap();
        let second = source.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        fs::write(&path, TWO_LANGUAGES).unwrap();
        set_mtime(&path, stamp + Duration::from_secs(60));

        let third = source.load().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.languages(), vec!["python", "rust"]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_cached_source_missing_file() {
        let source = CachedFileSource::new("does/not/exist.json");
        assert!(matches!(source.load(), Err(LoadError::Io { .. })));
    }

    struct SlowSource;

    impl QuestionSource for SlowSource {
        fn load(&self) -> Result<Arc<QuestionStore>, LoadError> {
            thread::sleep(Duration::from_millis(500));
            Ok(Arc::default())
        }
    }

    #[tokio::test]
    async fn test_load_with_timeout_gives_up() {
        let result = load_with_timeout(Arc::new(SlowSource), Duration::from_millis(20)).await;
        assert!(matches!(result, Err(LoadError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_load_with_timeout_returns_store() {
        let source = StaticSource::new(QuestionStore::new());
        let store = load_with_timeout(Arc::new(source), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(store.is_empty());
    }
}
