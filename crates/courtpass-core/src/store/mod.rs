//! Secure token store.
//!
//! `TokenVault` owns a `SecretBackend` on a dedicated worker thread and drains
//! a single command queue, so reads, writes and clears reach the backend one at
//! a time and in the order they were issued. Writes are enqueued without
//! waiting; reads wait for their turn in the queue.

mod memory;

use std::thread;

use tokio::sync::{mpsc, oneshot};

use crate::error::{Error, Result};
use crate::models::{Session, User};

pub use memory::MemorySecretBackend;

/// Entry holding the backend access token.
pub const TOKEN_KEY: &str = "accessToken";
/// Entry holding the JSON-serialized user record.
pub const USER_KEY: &str = "user";

/// Named secret storage such as the OS keychain.
///
/// A missing entry must read as `Ok(None)` and deleting a missing entry must
/// succeed.
pub trait SecretBackend: Send + 'static {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

enum VaultCommand {
    Get(oneshot::Sender<Result<Session>>),
    SetToken(Option<String>),
    SetUser(Option<User>),
    Set(Option<String>, Option<User>),
    Clear,
    Flush(oneshot::Sender<()>),
}

/// Handle to the serialized token store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TokenVault {
    tx: mpsc::UnboundedSender<VaultCommand>,
}

impl TokenVault {
    /// Start the worker that owns `backend`.
    ///
    /// The worker stops once every handle has been dropped.
    pub fn spawn<B: SecretBackend>(backend: B) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::Builder::new()
            .name("token-vault".to_string())
            .spawn(move || run_worker(&backend, rx))
            .map_err(|error| Error::Store(format!("failed to start token vault: {error}")))?;
        Ok(Self { tx })
    }

    /// Read token and user as of every command enqueued before this call.
    pub async fn get(&self) -> Result<Session> {
        let (reply, response) = oneshot::channel();
        self.send(VaultCommand::Get(reply))?;
        response.await.map_err(|_| worker_stopped())?
    }

    /// Enqueue a write of both entries as one unit. `None` deletes the entry.
    pub fn set(&self, token: Option<String>, user: Option<User>) -> Result<()> {
        self.send(VaultCommand::Set(token, user))
    }

    pub fn set_token(&self, token: Option<String>) -> Result<()> {
        self.send(VaultCommand::SetToken(token))
    }

    pub fn set_user(&self, user: Option<User>) -> Result<()> {
        self.send(VaultCommand::SetUser(user))
    }

    /// Enqueue removal of both entries.
    pub fn clear(&self) -> Result<()> {
        self.send(VaultCommand::Clear)
    }

    /// Wait until every previously enqueued command has reached the backend.
    pub async fn flush(&self) -> Result<()> {
        let (reply, done) = oneshot::channel();
        self.send(VaultCommand::Flush(reply))?;
        done.await.map_err(|_| worker_stopped())
    }

    fn send(&self, command: VaultCommand) -> Result<()> {
        self.tx.send(command).map_err(|_| worker_stopped())
    }
}

fn worker_stopped() -> Error {
    Error::Store("token vault worker stopped".to_string())
}

fn run_worker<B: SecretBackend>(backend: &B, mut rx: mpsc::UnboundedReceiver<VaultCommand>) {
    while let Some(command) = rx.blocking_recv() {
        match command {
            VaultCommand::Get(reply) => {
                let _ = reply.send(read_session(backend));
            }
            VaultCommand::SetToken(token) => write_token(backend, token),
            VaultCommand::SetUser(user) => write_user(backend, user),
            VaultCommand::Set(token, user) => {
                write_token(backend, token);
                write_user(backend, user);
            }
            VaultCommand::Clear => {
                log_write_failure(TOKEN_KEY, backend.delete(TOKEN_KEY));
                log_write_failure(USER_KEY, backend.delete(USER_KEY));
            }
            VaultCommand::Flush(reply) => {
                let _ = reply.send(());
            }
        }
    }
    tracing::debug!("Token vault worker exiting");
}

fn write_token<B: SecretBackend>(backend: &B, token: Option<String>) {
    let outcome = match token {
        Some(token) => backend.write(TOKEN_KEY, &token),
        None => backend.delete(TOKEN_KEY),
    };
    log_write_failure(TOKEN_KEY, outcome);
}

fn write_user<B: SecretBackend>(backend: &B, user: Option<User>) {
    let outcome = match user {
        Some(user) => serde_json::to_string(&user)
            .map_err(Error::from)
            .and_then(|raw| backend.write(USER_KEY, &raw)),
        None => backend.delete(USER_KEY),
    };
    log_write_failure(USER_KEY, outcome);
}

fn read_session<B: SecretBackend>(backend: &B) -> Result<Session> {
    let access_token = backend.read(TOKEN_KEY)?;
    let user = match backend.read(USER_KEY)? {
        Some(raw) => match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                tracing::warn!("Ignoring unreadable stored user record: {}", error);
                None
            }
        },
        None => None,
    };
    Ok(Session { access_token, user })
}

fn log_write_failure(key: &str, outcome: Result<()>) {
    if let Err(error) = outcome {
        tracing::error!("Failed to persist '{}' to secure storage: {}", key, error);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    fn user(name: &str) -> User {
        User {
            id: format!("id-{name}"),
            name: name.to_string(),
            email: format!("{name}@example.com"),
        }
    }

    #[tokio::test]
    async fn missing_entries_read_as_absent() {
        let vault = TokenVault::spawn(MemorySecretBackend::new()).unwrap();
        assert_eq!(vault.get().await.unwrap(), Session::signed_out());
    }

    #[tokio::test]
    async fn read_after_set_observes_new_values() {
        let vault = TokenVault::spawn(MemorySecretBackend::new()).unwrap();
        vault
            .set(Some("token-1".to_string()), Some(user("ann")))
            .unwrap();

        let session = vault.get().await.unwrap();
        assert_eq!(session.access_token.as_deref(), Some("token-1"));
        assert_eq!(session.user, Some(user("ann")));
    }

    #[tokio::test]
    async fn user_record_is_stored_as_json() {
        let backend = MemorySecretBackend::new();
        let vault = TokenVault::spawn(backend.clone()).unwrap();
        vault.set_user(Some(user("bob"))).unwrap();
        vault.flush().await.unwrap();

        let raw = backend.snapshot().remove(USER_KEY).unwrap();
        let decoded: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, user("bob"));
    }

    #[tokio::test]
    async fn setting_none_deletes_entry() {
        let backend = MemorySecretBackend::new();
        let vault = TokenVault::spawn(backend.clone()).unwrap();
        vault.set(Some("t".to_string()), Some(user("c"))).unwrap();
        vault.set_token(None).unwrap();
        vault.flush().await.unwrap();

        let stored = backend.snapshot();
        assert!(!stored.contains_key(TOKEN_KEY));
        assert!(stored.contains_key(USER_KEY));
    }

    #[tokio::test]
    async fn clear_removes_both_entries() {
        let vault = TokenVault::spawn(MemorySecretBackend::new()).unwrap();
        vault.set(Some("t".to_string()), Some(user("d"))).unwrap();
        vault.clear().unwrap();
        assert!(vault.get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_user_record_reads_as_absent() {
        let backend = MemorySecretBackend::new();
        backend.write(USER_KEY, "{not json").unwrap();
        backend.write(TOKEN_KEY, "t").unwrap();
        let vault = TokenVault::spawn(backend).unwrap();

        let session = vault.get().await.unwrap();
        assert_eq!(session.access_token.as_deref(), Some("t"));
        assert_eq!(session.user, None);
    }

    #[tokio::test]
    async fn last_enqueued_write_wins_across_tasks() {
        let vault = TokenVault::spawn(MemorySecretBackend::new()).unwrap();
        let mut handles = Vec::new();
        for index in 0..16 {
            let vault = vault.clone();
            handles.push(tokio::spawn(async move {
                vault.set_token(Some(format!("token-{index}"))).unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        vault.set_token(Some("final".to_string())).unwrap();

        assert_eq!(
            vault.get().await.unwrap().access_token.as_deref(),
            Some("final")
        );
    }

    #[derive(Clone)]
    struct ExclusiveBackend {
        inner: MemorySecretBackend,
        busy: Arc<AtomicBool>,
        overlapped: Arc<AtomicBool>,
    }

    impl ExclusiveBackend {
        fn enter(&self) {
            if self.busy.swap(true, Ordering::SeqCst) {
                self.overlapped.store(true, Ordering::SeqCst);
            }
            std::thread::sleep(Duration::from_millis(1));
        }

        fn leave(&self) {
            self.busy.store(false, Ordering::SeqCst);
        }
    }

    impl SecretBackend for ExclusiveBackend {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.enter();
            let value = self.inner.read(key);
            self.leave();
            value
        }

        fn write(&self, key: &str, value: &str) -> Result<()> {
            self.enter();
            let outcome = self.inner.write(key, value);
            self.leave();
            outcome
        }

        fn delete(&self, key: &str) -> Result<()> {
            self.enter();
            let outcome = self.inner.delete(key);
            self.leave();
            outcome
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_never_overlap_at_backend() {
        let backend = ExclusiveBackend {
            inner: MemorySecretBackend::new(),
            busy: Arc::new(AtomicBool::new(false)),
            overlapped: Arc::new(AtomicBool::new(false)),
        };
        let overlapped = Arc::clone(&backend.overlapped);
        let vault = TokenVault::spawn(backend).unwrap();

        let mut handles = Vec::new();
        for index in 0..8 {
            let vault = vault.clone();
            handles.push(tokio::spawn(async move {
                vault
                    .set(Some(format!("t{index}")), Some(user(&format!("u{index}"))))
                    .unwrap();
                vault.get().await.unwrap();
                vault.clear().unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        vault.flush().await.unwrap();

        assert!(!overlapped.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_sets_keep_token_and_user_paired() {
        let vault = TokenVault::spawn(MemorySecretBackend::new()).unwrap();

        for _ in 0..500 {
            let barrier = Arc::new(std::sync::Barrier::new(2));
            let writers: Vec<_> = ["a", "b"]
                .into_iter()
                .map(|name| {
                    let vault = vault.clone();
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        vault
                            .set(Some(format!("token-{name}")), Some(user(name)))
                            .unwrap();
                    })
                })
                .collect();
            for writer in writers {
                writer.join().unwrap();
            }

            let session = vault.get().await.unwrap();
            let stored_user = session.user.unwrap();
            assert_eq!(
                session.access_token,
                Some(format!("token-{}", stored_user.name))
            );
        }
    }
}
