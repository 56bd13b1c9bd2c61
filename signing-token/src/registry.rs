use crate::token::Token;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signing_client::SigningClient;
use signing_config::{validate_setup, ConfigError, Credential};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

/// Persisted form of one config entry, as the host stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: Uuid,
    pub name: String,
    pub api_ip_address: String,
    pub json_config: String,
    pub created_at: DateTime<Utc>,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, api_ip_address: impl Into<String>, json_config: impl Into<String>) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            name: name.into(),
            api_ip_address: api_ip_address.into(),
            json_config: json_config.into(),
            created_at: Utc::now(),
        }
    }
}

/// Full validation for the setup form, including the remote serial lookup.
///
/// The lookup is fail-closed, so an unreachable service surfaces as
/// [`ConfigError::SerialNotAvailable`] here and the user can retry the
/// form; nothing is retried automatically.
pub async fn validate_with_service(
    name: &str,
    api_ip_address: &str,
    raw_json: &str,
    client: &SigningClient,
) -> signing_config::Result<Credential> {
    let credential = validate_setup(name, api_ip_address, raw_json)?;
    if !client.token_is_known(&credential).await {
        return Err(ConfigError::SerialNotAvailable);
    }
    Ok(credential)
}

/// Owner of one [`Token`] per config entry.
///
/// Entities hold non-owning `Arc` clones of the token for their lifetime
/// and release them on unload; the registry holds the owning reference.
#[derive(Default)]
pub struct TokenRegistry {
    tokens: RwLock<HashMap<Uuid, Arc<Token>>>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set up a persisted entry.
    ///
    /// Setup is fail-open: a malformed persisted config is logged and the
    /// entry simply ends up without a token, instead of crash-looping the
    /// host at startup. Signing itself stays fail-closed.
    pub async fn setup_entry(&self, entry: &ConfigEntry) -> bool {
        match validate_setup(&entry.name, &entry.api_ip_address, &entry.json_config) {
            Ok(credential) => {
                let token = Arc::new(Token::new(credential));
                info!(entry_id = %entry.entry_id, token_id = %token.token_id(), "token set up");
                self.tokens.write().await.insert(entry.entry_id, token);
            }
            Err(e) => {
                error!(entry_id = %entry.entry_id, error = %e, "persisted config rejected, entry skipped");
            }
        }
        true
    }

    /// Insert a prebuilt token, for hosts that validate ahead of setup.
    pub async fn install_token(&self, entry_id: Uuid, token: Token) -> Arc<Token> {
        let token = Arc::new(token);
        self.tokens
            .write()
            .await
            .insert(entry_id, Arc::clone(&token));
        token
    }

    pub async fn get(&self, entry_id: Uuid) -> Option<Arc<Token>> {
        self.tokens.read().await.get(&entry_id).cloned()
    }

    /// Remove the entry's token; entity references drop on their own.
    pub async fn unload_entry(&self, entry_id: Uuid) -> bool {
        let removed = self.tokens.write().await.remove(&entry_id).is_some();
        if removed {
            info!(entry_id = %entry_id, "token unloaded");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}
