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

//! A single input value.

use crate::control::{Control, FormNode, NodeSnapshot};
use crate::dom::{DomHandle, DomSlot, HasRef};
use crate::metadata::Metadata;
use crate::observability::events;
use crate::options::{ControlOptions, Middleware};
use crate::stream::{switch_map, watch_stream, SharedStream};
use crate::validation::{run_validator, ValidationInfo};
use futures::future;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

const COMPONENT: &str = "leaf";

/// Holds one value, seeded with a default and replaced through
/// [`Control::change`].
///
/// Every changed value passes through the optional middleware together with
/// the previously emitted value. The error stream re-runs the validator for
/// each new value and only reports the result for the latest one: a result
/// computed for a value that has since been replaced is never handed out,
/// not even as the replayed latest item. Without a validator the error
/// stream emits [`ValidationInfo::Absent`] once.
pub struct LeafControl<T, M = ()> {
    inner: Arc<LeafInner<T, M>>,
}

/// A value together with the number of changes that produced it.
type Revision<T> = (u64, T);

struct LeafInner<T, M> {
    default_value: T,
    sender: watch::Sender<Revision<T>>,
    middleware: Option<Middleware<T>>,
    error: Option<SharedStream<Revision<ValidationInfo>>>,
    metadata: Metadata<M>,
    dom: DomSlot,
}

impl<T, M> Clone for LeafControl<T, M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> LeafControl<T, ()>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(default_value: T) -> Self {
        Self::with_options(default_value, ControlOptions::new())
    }
}

impl<T, M> LeafControl<T, M>
where
    T: Clone + Send + Sync + 'static,
    M: Clone + Send + Sync + 'static,
{
    pub fn with_options(default_value: T, options: ControlOptions<T, M>) -> Self {
        let (sender, receiver) = watch::channel((0, default_value.clone()));
        let error = options.validator.map(|validator| {
            SharedStream::new("leaf.error", move || {
                let validator = validator.clone();
                switch_map(
                    watch_stream(receiver.clone()),
                    move |(revision, value): Revision<T>| {
                        run_validator(&validator, &value)
                            .map(move |info| (revision, info))
                            .boxed()
                    },
                    "leaf.validator",
                )
            })
        });

        Self {
            inner: Arc::new(LeafInner {
                default_value,
                sender,
                middleware: options.middleware,
                error,
                metadata: options.metadata,
                dom: DomSlot::default(),
            }),
        }
    }

    pub fn default_value(&self) -> &T {
        &self.inner.default_value
    }

    /// The value most recently emitted.
    pub fn current(&self) -> T {
        self.inner.sender.borrow().1.clone()
    }
}

impl<T, M> Control for LeafControl<T, M>
where
    T: Clone + Send + Sync + 'static,
    M: Clone + Send + Sync + 'static,
{
    type Value = T;
    type Meta = M;

    fn value(&self) -> BoxStream<'static, T> {
        watch_stream(self.inner.sender.subscribe())
            .map(|(_, value)| value)
            .boxed()
    }

    fn error(&self) -> BoxStream<'static, ValidationInfo> {
        match &self.inner.error {
            Some(error) => {
                let receiver = self.inner.sender.subscribe();
                error
                    .subscribe()
                    .filter_map(move |(revision, info)| {
                        let current = receiver.borrow().0;
                        future::ready((revision == current).then_some(info))
                    })
                    .boxed()
            }
            None => stream::once(future::ready(ValidationInfo::Absent)).boxed(),
        }
    }

    fn metadata(&self) -> BoxStream<'static, M> {
        self.inner.metadata.subscribe()
    }

    fn change(&self, value: T) {
        let middleware = self.inner.middleware.as_ref();
        self.inner.sender.send_modify(|(revision, current)| {
            *revision += 1;
            *current = match middleware {
                Some(middleware) => middleware(value, current),
                None => value,
            };
        });
        trace!(
            event = events::LEAF_CHANGE,
            component = COMPONENT,
            receivers = self.inner.sender.receiver_count(),
            "leaf value changed"
        );
    }

    fn node(&self) -> FormNode {
        FormNode::Leaf(NodeSnapshot {
            error: self.error(),
            dom: self.dom(),
        })
    }
}

impl<T, M> HasRef for LeafControl<T, M> {
    fn dom(&self) -> Option<DomHandle> {
        self.inner.dom.get()
    }

    fn dom_ref(&self, element: Option<DomHandle>) {
        self.inner.dom.set(element);
    }
}
