use std::fmt::{Debug, Formatter};

use crate::constants::*;
use ebgsign_core::{utils::Redact, Context};

/// Config carries all the configuration for the v1 signer.
#[derive(Clone, Default)]
pub struct Config {
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`EBG_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `header_prefix` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`EBG_HEADER_PREFIX`]
    /// - default value: [`DEFAULT_HEADER_PREFIX`]
    pub header_prefix: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set header_prefix
    pub fn with_header_prefix(mut self, header_prefix: impl Into<String>) -> Self {
        self.header_prefix = Some(header_prefix.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(EBG_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(EBG_HEADER_PREFIX) {
            self.header_prefix.get_or_insert(v);
        }

        self
    }

    /// The header prefix to use, falling back to [`DEFAULT_HEADER_PREFIX`].
    pub fn header_prefix(&self) -> &str {
        self.header_prefix
            .as_deref()
            .unwrap_or(DEFAULT_HEADER_PREFIX)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("header_prefix", &self.header_prefix)
            .finish()
    }
}
