use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use crate::api::user_words::UserWord;
use crate::api::{ApiClient, ApiError};
use crate::auth::Credentials;
use crate::session::Outcome;

/// Remote per-user-per-word store, behind a trait so the reporter can
/// be exercised without a server.
pub trait ProgressStore: Send + 'static {
    fn lookup(&self, word_id: &str) -> Result<UserWord, ApiError>;
    fn create(&self, word_id: &str, record: &UserWord) -> Result<(), ApiError>;
    fn update(&self, word_id: &str, record: &UserWord) -> Result<(), ApiError>;
}

/// Production store: bearer-authenticated calls against the word service.
pub struct ApiProgressStore {
    client: ApiClient,
    creds: Credentials,
}

impl ApiProgressStore {
    pub fn new(client: ApiClient, creds: Credentials) -> Self {
        Self { client, creds }
    }
}

impl ProgressStore for ApiProgressStore {
    fn lookup(&self, word_id: &str) -> Result<UserWord, ApiError> {
        self.client
            .get_user_word(&self.creds.token, &self.creds.user_id, word_id)
    }

    fn create(&self, word_id: &str, record: &UserWord) -> Result<(), ApiError> {
        self.client
            .create_user_word(&self.creds.token, &self.creds.user_id, word_id, record)
    }

    fn update(&self, word_id: &str, record: &UserWord) -> Result<(), ApiError> {
        self.client
            .update_user_word(&self.creds.token, &self.creds.user_id, word_id, record)
    }
}

#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub word_id: String,
    pub outcome: Outcome,
}

/// Fire-and-forget reporter: judged answers are queued to a worker
/// thread and the UI never blocks on the round-trip. Dropping the
/// reporter closes the queue and joins the worker, so queued updates
/// drain before exit.
pub struct ProgressReporter {
    tx: Option<Sender<ProgressUpdate>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    pub fn new<S: ProgressStore>(store: S) -> Self {
        let (tx, rx) = mpsc::channel::<ProgressUpdate>();
        let handle = std::thread::spawn(move || {
            for update in rx {
                apply_update(&store, &update);
            }
        });
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn report(&self, word_id: &str, outcome: Outcome) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(ProgressUpdate {
                word_id: word_id.to_string(),
                outcome,
            });
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Look the record up and write the moved counter back. Only a true
/// 404 means "absent" and triggers a create; transport and other HTTP
/// failures are logged and dropped without a retry.
fn apply_update<S: ProgressStore>(store: &S, update: &ProgressUpdate) {
    match store.lookup(&update.word_id) {
        Ok(record) => {
            let moved = record.with_progress_delta(update.outcome.progress_delta());
            if let Err(e) = store.update(&update.word_id, &moved) {
                log::warn!("progress update for {} dropped: {e}", update.word_id);
            }
        }
        Err(ApiError::NotFound) => {
            if let Err(e) = store.create(&update.word_id, &UserWord::fresh()) {
                log::warn!("progress create for {} dropped: {e}", update.word_id);
            }
        }
        Err(e) => {
            log::warn!("progress lookup for {} failed: {e}", update.word_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemoryStoreInner {
        records: HashMap<String, UserWord>,
        lookups_fail: bool,
        creates: usize,
        updates: usize,
    }

    #[derive(Clone, Default)]
    struct MemoryStore(Arc<Mutex<MemoryStoreInner>>);

    impl ProgressStore for MemoryStore {
        fn lookup(&self, word_id: &str) -> Result<UserWord, ApiError> {
            let inner = self.0.lock().unwrap();
            if inner.lookups_fail {
                return Err(ApiError::Status(500));
            }
            inner.records.get(word_id).cloned().ok_or(ApiError::NotFound)
        }

        fn create(&self, word_id: &str, record: &UserWord) -> Result<(), ApiError> {
            let mut inner = self.0.lock().unwrap();
            inner.creates += 1;
            inner.records.insert(word_id.to_string(), record.clone());
            Ok(())
        }

        fn update(&self, word_id: &str, record: &UserWord) -> Result<(), ApiError> {
            let mut inner = self.0.lock().unwrap();
            inner.updates += 1;
            inner.records.insert(word_id.to_string(), record.clone());
            Ok(())
        }
    }

    #[test]
    fn absent_record_is_created_with_defaults() {
        let store = MemoryStore::default();
        apply_update(
            &store,
            &ProgressUpdate {
                word_id: "w1".into(),
                outcome: Outcome::Correct,
            },
        );
        let inner = store.0.lock().unwrap();
        assert_eq!(inner.creates, 1);
        assert_eq!(inner.updates, 0);
        assert_eq!(inner.records["w1"], UserWord::fresh());
    }

    #[test]
    fn existing_record_moves_by_outcome() {
        let store = MemoryStore::default();
        store.create("w1", &UserWord::fresh()).unwrap();

        apply_update(
            &store,
            &ProgressUpdate {
                word_id: "w1".into(),
                outcome: Outcome::Correct,
            },
        );
        assert_eq!(store.0.lock().unwrap().records["w1"].optional.progress, 1);

        apply_update(
            &store,
            &ProgressUpdate {
                word_id: "w1".into(),
                outcome: Outcome::Incorrect,
            },
        );
        assert_eq!(store.0.lock().unwrap().records["w1"].optional.progress, 0);
    }

    #[test]
    fn transport_failure_does_not_create() {
        let store = MemoryStore::default();
        store.0.lock().unwrap().lookups_fail = true;

        apply_update(
            &store,
            &ProgressUpdate {
                word_id: "w1".into(),
                outcome: Outcome::Incorrect,
            },
        );
        let inner = store.0.lock().unwrap();
        assert_eq!(inner.creates, 0);
        assert_eq!(inner.updates, 0);
        assert!(inner.records.is_empty());
    }

    #[test]
    fn reporter_drains_queue_on_drop() {
        let store = MemoryStore::default();
        {
            let reporter = ProgressReporter::new(store.clone());
            for i in 0..10 {
                reporter.report(&format!("w{i}"), Outcome::Correct);
            }
            // drop closes the channel and joins the worker
        }
        let inner = store.0.lock().unwrap();
        assert_eq!(inner.records.len(), 10);
        assert_eq!(inner.creates, 10);
    }
}
