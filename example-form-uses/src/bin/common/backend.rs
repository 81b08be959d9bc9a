/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use async_trait::async_trait;
use reactive_form::Fields;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub(crate) enum BackendError {
    #[error("signup field `{0}` missing or not a string")]
    MissingField(&'static str),
    #[error("username `{0}` is already registered")]
    Conflict(String),
}

/// The remote side of the signup flow.
#[async_trait]
pub(crate) trait SignupBackend: Send + Sync {
    async fn username_taken(&self, username: &str) -> Result<bool, BackendError>;

    /// Registers the account and returns its id.
    async fn register(&self, signup: &Fields<Value>) -> Result<u64, BackendError>;
}

/// Keeps accounts in memory and answers after a fixed latency.
pub(crate) struct InMemoryBackend {
    latency: Duration,
    usernames: Mutex<BTreeSet<String>>,
    next_id: AtomicU64,
}

impl InMemoryBackend {
    pub(crate) fn new<I>(reserved: I, latency: Duration) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            latency,
            usernames: Mutex::new(reserved.into_iter().map(Into::into).collect()),
            next_id: AtomicU64::new(1),
        }
    }

    fn is_taken(&self, username: &str) -> bool {
        self.usernames
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains(username)
    }
}

#[async_trait]
impl SignupBackend for InMemoryBackend {
    async fn username_taken(&self, username: &str) -> Result<bool, BackendError> {
        tokio::time::sleep(self.latency).await;
        let taken = self.is_taken(username);
        debug!(username, taken, "checked username");
        Ok(taken)
    }

    async fn register(&self, signup: &Fields<Value>) -> Result<u64, BackendError> {
        tokio::time::sleep(self.latency).await;
        let username = signup
            .get("username")
            .and_then(Value::as_str)
            .ok_or(BackendError::MissingField("username"))?;

        let inserted = self
            .usernames
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(username.to_string());
        if !inserted {
            return Err(BackendError::Conflict(username.to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        info!(id, username, "registered account");
        Ok(id)
    }
}
