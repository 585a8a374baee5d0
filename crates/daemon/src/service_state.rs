use std::sync::Arc;

use common::prelude::Passphrase;
use url::Url;

use super::service_config::Config;

/// Read-only state shared by every request handler
#[derive(Clone, Debug)]
pub struct State {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    passphrase: Passphrase,
    public_url: Option<Url>,
}

impl State {
    pub fn new(passphrase: Passphrase, public_url: Option<Url>) -> Self {
        Self {
            inner: Arc::new(Inner {
                passphrase,
                public_url,
            }),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        if config.passphrase.is_empty() {
            return Err(StateSetupError::MissingPassphrase);
        }
        tracing::info!(
            key = %config.passphrase.fingerprint(),
            public_url = ?config.public_url,
            "service state ready"
        );
        Ok(Self::new(
            config.passphrase.clone(),
            config.public_url.clone(),
        ))
    }

    pub fn passphrase(&self) -> &Passphrase {
        &self.inner.passphrase
    }

    pub fn public_url(&self) -> Option<&Url> {
        self.inner.public_url.as_ref()
    }

    /// Ready to serve once a passphrase is configured
    pub fn is_ready(&self) -> bool {
        !self.inner.passphrase.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("no passphrase configured (set --passphrase or WICHTEL_PASSWORD)")]
    MissingPassphrase,
}
