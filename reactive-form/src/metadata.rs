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

//! Caller-supplied metadata sources.

use futures::future;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use crate::stream::watch_stream;

type MetadataFactory<M> = Arc<dyn Fn() -> BoxStream<'static, M> + Send + Sync>;

enum Source<M> {
    None,
    Constant(M),
    Watch(watch::Receiver<M>),
    Factory(MetadataFactory<M>),
}

/// Auxiliary data attached to a control, e.g. UI hints.
///
/// Metadata is never derived from the control's own value or error. Every
/// call to [`crate::Control::metadata`] opens a new stream from this source.
pub struct Metadata<M> {
    source: Source<M>,
}

impl<M> Metadata<M>
where
    M: Clone + Send + Sync + 'static,
{
    /// A stream that stays open and never emits.
    pub fn none() -> Self {
        Self { source: Source::None }
    }

    /// Emits `metadata` once to every subscriber.
    pub fn constant(metadata: M) -> Self {
        Self {
            source: Source::Constant(metadata),
        }
    }

    /// Current value of `receiver`, then every later one.
    pub fn watch(receiver: watch::Receiver<M>) -> Self {
        Self {
            source: Source::Watch(receiver),
        }
    }

    /// Opens `factory()` for every subscriber, e.g. a mapping over a sibling
    /// control's value.
    pub fn from_fn<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: futures::Stream<Item = M> + Send + 'static,
    {
        Self {
            source: Source::Factory(Arc::new(move || factory().boxed())),
        }
    }

    pub(crate) fn subscribe(&self) -> BoxStream<'static, M> {
        match &self.source {
            Source::None => stream::pending().boxed(),
            Source::Constant(metadata) => stream::once(future::ready(metadata.clone())).boxed(),
            Source::Watch(receiver) => watch_stream(receiver.clone()),
            Source::Factory(factory) => factory(),
        }
    }
}

impl<M> Default for Metadata<M>
where
    M: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::none()
    }
}

impl<M: Clone> Clone for Metadata<M> {
    fn clone(&self) -> Self {
        let source = match &self.source {
            Source::None => Source::None,
            Source::Constant(metadata) => Source::Constant(metadata.clone()),
            Source::Watch(receiver) => Source::Watch(receiver.clone()),
            Source::Factory(factory) => Source::Factory(factory.clone()),
        };
        Self { source }
    }
}

impl<M> fmt::Debug for Metadata<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.source {
            Source::None => "none",
            Source::Constant(_) => "constant",
            Source::Watch(_) => "watch",
            Source::Factory(_) => "factory",
        };
        f.debug_tuple("Metadata").field(&kind).finish()
    }
}
