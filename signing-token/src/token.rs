use crate::signer::Signer;
use signing_client::SigningClient;
use signing_config::Credential;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const MANUFACTURER: &str = "TS24 Corporation";

/// Holder of one validated credential and its derived signer.
///
/// Exactly one signer exists per token. The credential is shared read-only
/// with the signer; nothing here mutates it after construction.
pub struct Token {
    id: String,
    credential: Arc<Credential>,
    signer: Arc<Signer>,
    installed: AtomicBool,
    online: AtomicBool,
}

impl Token {
    pub fn new(credential: Credential) -> Self {
        let client = SigningClient::new(&credential.api_ip_address);
        Self::with_client(credential, client)
    }

    /// Build with an explicit client, so tests can inject a transport.
    pub fn with_client(credential: Credential, client: SigningClient) -> Self {
        let credential = Arc::new(credential);
        let signer = Arc::new(Signer::new(Arc::clone(&credential), client));
        Self {
            id: credential.slug(),
            credential,
            signer,
            installed: AtomicBool::new(false),
            online: AtomicBool::new(true),
        }
    }

    pub fn token_id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.credential.name
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The single signer derived from this credential.
    pub fn signer(&self) -> Arc<Signer> {
        Arc::clone(&self.signer)
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Whether the host has attached entities to this token yet.
    pub fn installed(&self) -> bool {
        self.installed.load(Ordering::Relaxed)
    }

    pub fn set_installed(&self) {
        self.installed.store(true, Ordering::Relaxed);
    }
}
