use signing_client::SigningClient;
use signing_config::Credential;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The signer's exposed toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerState {
    On,
    Off,
}

impl SignerState {
    pub fn is_on(self) -> bool {
        matches!(self, SignerState::On)
    }
}

/// Handle identifying a registered state-change callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(Uuid);

/// State-change callback, invoked from the single-threaded task context.
pub type StateCallback = Box<dyn Fn() + Send + Sync>;

/// The controllable signing trigger derived from one credential.
///
/// Activation performs one real signing run at the service; the resulting
/// state mirrors the service's answer. Deactivation is purely local.
/// State only ever changes from these two events, never spontaneously.
pub struct Signer {
    id: String,
    name: String,
    credential: Arc<Credential>,
    client: SigningClient,
    state: RwLock<SignerState>,
    callbacks: RwLock<HashMap<CallbackHandle, StateCallback>>,
    online: AtomicBool,
}

impl Signer {
    pub const FIRMWARE_VERSION: &'static str = "0.0.1";
    pub const MODEL: &'static str = "SafetySigning token signer";

    pub fn new(credential: Arc<Credential>, client: SigningClient) -> Self {
        let id = format!("{}_{}", credential.slug(), credential.serial_number);
        let name = format!(
            "Serial {} {}",
            credential.serial_number,
            credential.app_label()
        );
        Self {
            id,
            name,
            credential,
            client,
            state: RwLock::new(SignerState::On),
            callbacks: RwLock::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }

    pub fn signer_id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    pub async fn state(&self) -> SignerState {
        *self.state.read().await
    }

    /// Run one signing attempt and take the state the service reports.
    ///
    /// A non-zero status, a missing status, or an unreachable service all
    /// land in `Off`; only an explicit `status == 0` keeps the signer on.
    /// The attempt is never retried here.
    pub async fn activate(&self) {
        let response = self.client.auto_sign(&self.credential).await;
        let next = if response.is_success() {
            info!(signer = %self.id, "signing run accepted");
            SignerState::On
        } else {
            warn!(
                signer = %self.id,
                status = ?response.status,
                message = ?response.message,
                "signing run failed"
            );
            SignerState::Off
        };
        self.set_state(next).await;
    }

    /// Turn the signer off locally. No outbound call is made.
    pub async fn deactivate(&self) {
        self.set_state(SignerState::Off).await;
    }

    pub async fn toggle(&self) {
        if self.state().await.is_on() {
            self.deactivate().await;
        } else {
            self.activate().await;
        }
    }

    /// Replay the host's last persisted state after a restart.
    ///
    /// No persisted state means the signer starts on, which implies one
    /// signing run on restore.
    pub async fn restore(&self, last_state: Option<SignerState>) {
        match last_state {
            None | Some(SignerState::On) => self.activate().await,
            Some(SignerState::Off) => self.deactivate().await,
        }
    }

    async fn set_state(&self, next: SignerState) {
        {
            let mut state = self.state.write().await;
            if *state == next {
                debug!(signer = %self.id, ?next, "state unchanged");
            }
            *state = next;
        }
        self.notify().await;
    }

    /// Register a callback invoked after every state transition.
    pub async fn register_callback(&self, callback: StateCallback) -> CallbackHandle {
        let handle = CallbackHandle(Uuid::new_v4());
        self.callbacks.write().await.insert(handle, callback);
        handle
    }

    pub async fn unregister_callback(&self, handle: CallbackHandle) {
        self.callbacks.write().await.remove(&handle);
    }

    async fn notify(&self) {
        for callback in self.callbacks.read().await.values() {
            callback();
        }
    }
}
