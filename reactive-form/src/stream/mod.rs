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

//! Stream plumbing shared by every control.
//!
//! Everything here is `futures::Stream` based and driven by tokio. Leaf
//! validation runs on a spawned task owned by a [`SharedStream`] and settling
//! uses tokio timers, so streams handed out by controls must be polled inside
//! a tokio runtime.

mod combine;
mod settle;
mod shared;
mod switch;

pub(crate) use combine::combine_latest;
pub(crate) use settle::{settle, Barrier};
pub(crate) use shared::SharedStream;
pub(crate) use switch::switch_map;

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Current value of `receiver` first, then every value it observes later.
pub(crate) fn watch_stream<T>(receiver: watch::Receiver<T>) -> BoxStream<'static, T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((receiver, false), |(mut receiver, primed)| async move {
        if primed {
            receiver.changed().await.ok()?;
        }
        let value = receiver.borrow_and_update().clone();
        Some((value, (receiver, true)))
    })
    .boxed()
}

/// Locks `mutex`, recovering the guard if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
