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

//! Refcounted, replay-latest multicasting of a derived computation.

use crate::observability::events;
use crate::stream::lock;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

const COMPONENT: &str = "shared_stream";

type StreamFactory<T> = Arc<dyn Fn() -> BoxStream<'static, T> + Send + Sync>;

/// Running computation plus the number of subscribers attached to it.
struct SharedBinding<T> {
    ref_count: usize,
    receiver: watch::Receiver<Option<T>>,
    task: JoinHandle<()>,
}

/// Runs the stream built by `factory` at most once at a time, only while
/// somebody is subscribed, and replays its latest item to every subscriber.
///
/// The first subscriber spawns the computation; dropping the last
/// subscription aborts it. A later subscriber starts a fresh computation.
pub(crate) struct SharedStream<T> {
    label: &'static str,
    factory: StreamFactory<T>,
    binding: Arc<Mutex<Option<SharedBinding<T>>>>,
}

impl<T> Clone for SharedStream<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            factory: self.factory.clone(),
            binding: self.binding.clone(),
        }
    }
}

impl<T> SharedStream<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new<F>(label: &'static str, factory: F) -> Self
    where
        F: Fn() -> BoxStream<'static, T> + Send + Sync + 'static,
    {
        Self {
            label,
            factory: Arc::new(factory),
            binding: Arc::new(Mutex::new(None)),
        }
    }

    /// Lazily attaches on first poll; detaches when the returned stream drops.
    pub(crate) fn subscribe(&self) -> BoxStream<'static, T> {
        let shared = self.clone();
        stream::once(async move { shared.attach() })
            .flatten()
            .boxed()
    }

    /// Number of live subscriptions.
    #[cfg(test)]
    pub(crate) fn ref_count(&self) -> usize {
        lock(&self.binding)
            .as_ref()
            .map_or(0, |binding| binding.ref_count)
    }

    fn attach(&self) -> BoxStream<'static, T> {
        let mut slot = lock(&self.binding);
        let binding = slot.get_or_insert_with(|| {
            debug!(
                event = events::SHARED_STREAM_START,
                component = COMPONENT,
                label = self.label,
                "starting shared computation"
            );
            let (sender, receiver) = watch::channel(None);
            let mut source = (self.factory)();
            let task = tokio::spawn(async move {
                while let Some(item) = source.next().await {
                    sender.send_replace(Some(item));
                }
            });
            SharedBinding {
                ref_count: 0,
                receiver,
                task,
            }
        });
        binding.ref_count += 1;
        debug!(
            event = events::SHARED_STREAM_ATTACH,
            component = COMPONENT,
            label = self.label,
            ref_count = binding.ref_count,
            "subscriber attached"
        );

        let subscription = Subscription {
            receiver: binding.receiver.clone(),
            primed: false,
            _guard: DetachGuard {
                label: self.label,
                binding: self.binding.clone(),
            },
        };
        stream::unfold(subscription, |mut subscription| async move {
            loop {
                if subscription.primed {
                    subscription.receiver.changed().await.ok()?;
                }
                subscription.primed = true;
                let latest = subscription.receiver.borrow_and_update().clone();
                if let Some(item) = latest {
                    return Some((item, subscription));
                }
            }
        })
        .boxed()
    }
}

struct Subscription<T> {
    receiver: watch::Receiver<Option<T>>,
    primed: bool,
    _guard: DetachGuard<T>,
}

/// Releases one reference on drop and tears the computation down at zero.
struct DetachGuard<T> {
    label: &'static str,
    binding: Arc<Mutex<Option<SharedBinding<T>>>>,
}

impl<T> Drop for DetachGuard<T> {
    fn drop(&mut self) {
        let mut slot = lock(&self.binding);
        let remaining = match slot.as_mut() {
            Some(binding) => {
                binding.ref_count -= 1;
                binding.ref_count
            }
            None => return,
        };
        debug!(
            event = events::SHARED_STREAM_DETACH,
            component = COMPONENT,
            label = self.label,
            ref_count = remaining,
            "subscriber detached"
        );

        if remaining == 0 {
            if let Some(binding) = slot.take() {
                binding.task.abort();
                debug!(
                    event = events::SHARED_STREAM_STOP,
                    component = COMPONENT,
                    label = self.label,
                    "stopped shared computation"
                );
            }
        }
    }
}
