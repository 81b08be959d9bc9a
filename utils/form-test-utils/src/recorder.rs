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

use futures::{Stream, StreamExt};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

/// Collects every item of a stream on a spawned task, the way a UI
/// listener would observe it.
///
/// Dropping the recorder aborts the task and with it the subscription.
pub struct Recorder<T> {
    items: Arc<Mutex<Vec<T>>>,
    task: JoinHandle<()>,
}

impl<T> Recorder<T>
where
    T: Clone + Send + 'static,
{
    pub fn spawn<S>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        let items = Arc::new(Mutex::new(Vec::new()));
        let sink = items.clone();
        let task = tokio::spawn(async move {
            let mut stream = std::pin::pin!(stream);
            while let Some(item) = stream.next().await {
                sink.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(item);
            }
        });
        Self { items, task }
    }

    pub fn values(&self) -> Vec<T> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<T> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// `true` once the recorded stream has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Drop for Recorder<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
