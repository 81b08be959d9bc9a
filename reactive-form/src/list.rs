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

//! A dynamic, keyed sequence of child controls.

use crate::control::{Control, FormNode, NodeSnapshot};
use crate::dom::{DomHandle, DomSlot, HasRef};
use crate::metadata::Metadata;
use crate::observability::{events, fields};
use crate::options::CompositeOptions;
use crate::stream::{combine_latest, settle, switch_map, watch_stream, Barrier};
use crate::validation::{join_validation_info, run_validator, ValidationInfo, Validator};
use futures::future;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

const COMPONENT: &str = "list";

/// A child together with the key it was created under.
///
/// Keys are assigned once, when the child is created, and follow the child
/// through `insert`, `delete` and `swap`.
#[derive(Clone, Debug)]
pub struct ListEntry<C> {
    pub key: u64,
    pub child: C,
}

type Entries<C> = Arc<[ListEntry<C>]>;
type ChildFactory<T, C> = Arc<dyn Fn(T) -> C + Send + Sync>;

/// An ordered list of children created from item values by a factory.
///
/// Every mutation publishes a whole new sequence, so observers see one
/// transition per call. The value follows the current sequence; a
/// structural change abandons the combination of the previous children.
/// Value and error are derived per subscriber from the current sequence.
pub struct ListControl<T, C, M = ()> {
    inner: Arc<ListInner<T, C, M>>,
}

struct ListInner<T, C, M> {
    entries: watch::Sender<Entries<C>>,
    next_key: AtomicU64,
    create_child: ChildFactory<T, C>,
    validator: Option<Validator<Vec<T>>>,
    metadata: Metadata<M>,
    dom: DomSlot,
}

impl<T, C, M> Clone for ListControl<T, C, M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, C> ListControl<T, C, ()>
where
    T: Clone + Send + Sync + 'static,
    C: Control<Value = T> + Clone,
{
    pub fn new<F>(default_value: Vec<T>, create_child: F) -> Self
    where
        F: Fn(T) -> C + Send + Sync + 'static,
    {
        Self::with_options(default_value, create_child, CompositeOptions::new())
    }
}

impl<T, C, M> ListControl<T, C, M>
where
    T: Clone + Send + Sync + 'static,
    C: Control<Value = T> + Clone,
    M: Clone + Send + Sync + 'static,
{
    pub fn with_options<F>(
        default_value: Vec<T>,
        create_child: F,
        options: CompositeOptions<Vec<T>, M>,
    ) -> Self
    where
        F: Fn(T) -> C + Send + Sync + 'static,
    {
        let create_child: ChildFactory<T, C> = Arc::new(create_child);
        let next_key = AtomicU64::new(0);
        let initial: Entries<C> = default_value
            .into_iter()
            .map(|item| ListEntry {
                key: next_key.fetch_add(1, Ordering::Relaxed),
                child: create_child(item),
            })
            .collect();
        let (entries, _) = watch::channel(initial);

        Self {
            inner: Arc::new(ListInner {
                entries,
                next_key,
                create_child,
                validator: options.validator,
                metadata: options.metadata,
                dom: DomSlot::default(),
            }),
        }
    }

    /// Snapshot of the current keyed sequence.
    pub fn children(&self) -> Vec<ListEntry<C>> {
        self.inner.entries.borrow().to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.borrow().is_empty()
    }

    /// Appends a new child.
    pub fn push(&self, value: T) {
        let entry = self.create_entry(value);
        let key = entry.key;
        self.inner.entries.send_modify(|entries| {
            let mut next = entries.to_vec();
            next.push(entry);
            *entries = next.into();
        });
        self.log_mutation("push", key);
    }

    /// Inserts a new child at `index`, clamped to the current length.
    pub fn insert(&self, value: T, index: usize) {
        let entry = self.create_entry(value);
        let key = entry.key;
        self.inner.entries.send_modify(|entries| {
            let mut next = entries.to_vec();
            next.insert(index.min(next.len()), entry);
            *entries = next.into();
        });
        self.log_mutation("insert", key);
    }

    /// Removes the child at `index`. Out of range is a no-op.
    pub fn delete(&self, index: usize) {
        let mut removed = None;
        self.inner.entries.send_if_modified(|entries| {
            if index >= entries.len() {
                return false;
            }
            let mut next = entries.to_vec();
            removed = Some(next.remove(index).key);
            *entries = next.into();
            true
        });
        match removed {
            Some(key) => self.log_mutation("delete", key),
            None => self.warn_out_of_range("delete", index),
        }
    }

    /// Exchanges the entries at `a` and `b`, keys included. Out of range is
    /// a no-op.
    pub fn swap(&self, a: usize, b: usize) {
        let swapped = self.inner.entries.send_if_modified(|entries| {
            if a >= entries.len() || b >= entries.len() {
                return false;
            }
            let mut next = entries.to_vec();
            next.swap(a, b);
            *entries = next.into();
            true
        });
        if swapped {
            debug!(
                event = events::LIST_MUTATION,
                component = COMPONENT,
                operation = "swap",
                keys = fields::format_keys(self.keys()).as_str(),
                "list mutated"
            );
        } else {
            self.warn_out_of_range("swap", a.max(b));
        }
    }

    fn entries(&self) -> BoxStream<'static, Entries<C>> {
        watch_stream(self.inner.entries.subscribe())
    }

    fn keys(&self) -> Vec<u64> {
        self.inner.entries.borrow().iter().map(|entry| entry.key).collect()
    }

    fn create_entry(&self, value: T) -> ListEntry<C> {
        ListEntry {
            key: self.inner.next_key.fetch_add(1, Ordering::Relaxed),
            child: (self.inner.create_child)(value),
        }
    }

    fn log_mutation(&self, operation: &'static str, key: u64) {
        debug!(
            event = events::LIST_MUTATION,
            component = COMPONENT,
            operation,
            key,
            keys = fields::format_keys(self.keys()).as_str(),
            "list mutated"
        );
    }

    fn warn_out_of_range(&self, operation: &'static str, index: usize) {
        warn!(
            event = events::LIST_INDEX_OUT_OF_RANGE,
            component = COMPONENT,
            operation,
            index,
            len = self.len(),
            "list index out of range, ignoring"
        );
    }
}

fn combine_values<T, C>(entries: Entries<C>) -> BoxStream<'static, Vec<T>>
where
    T: Clone + Send + 'static,
    C: Control<Value = T>,
{
    if entries.is_empty() {
        return stream::once(future::ready(Vec::new())).boxed();
    }
    let values = entries.iter().map(|entry| entry.child.value()).collect();
    settle(combine_latest(values), Barrier::Yield)
}

fn combine_errors<C: Control>(entries: Entries<C>) -> BoxStream<'static, Vec<ValidationInfo>> {
    let errors = entries.iter().map(|entry| entry.child.error()).collect();
    combine_latest(errors)
}

impl<T, C, M> Control for ListControl<T, C, M>
where
    T: Clone + Send + Sync + 'static,
    C: Control<Value = T> + Clone,
    M: Clone + Send + Sync + 'static,
{
    type Value = Vec<T>;
    type Meta = M;

    fn value(&self) -> BoxStream<'static, Vec<T>> {
        switch_map(self.entries(), combine_values, "list.value")
    }

    fn error(&self) -> BoxStream<'static, ValidationInfo> {
        let children = switch_map(self.entries(), combine_errors, "list.children");
        let own = match self.inner.validator.clone() {
            Some(validator) => switch_map(
                self.value(),
                move |value: Vec<T>| run_validator(&validator, &value),
                "list.validator",
            )
            .map(|info| vec![info])
            .boxed(),
            None => stream::once(future::ready(Vec::new())).boxed(),
        };
        settle(combine_latest(vec![children, own]), Barrier::Timer)
            .map(|parts| join_validation_info(parts.into_iter().flatten()))
            .boxed()
    }

    fn metadata(&self) -> BoxStream<'static, M> {
        self.inner.metadata.subscribe()
    }

    /// Replaces every child, assigning fresh keys throughout.
    fn change(&self, values: Vec<T>) {
        let next: Entries<C> = values
            .into_iter()
            .map(|value| self.create_entry(value))
            .collect();
        self.inner.entries.send_replace(next);
        debug!(
            event = events::LIST_MUTATION,
            component = COMPONENT,
            operation = "change",
            keys = fields::format_keys(self.keys()).as_str(),
            "list replaced"
        );
    }

    fn node(&self) -> FormNode {
        let children = self
            .inner
            .entries
            .borrow()
            .iter()
            .map(|entry| entry.child.node())
            .collect();
        FormNode::List(
            NodeSnapshot {
                error: self.error(),
                dom: self.dom(),
            },
            children,
        )
    }
}

impl<T, C, M> HasRef for ListControl<T, C, M> {
    fn dom(&self) -> Option<DomHandle> {
        self.inner.dom.get()
    }

    fn dom_ref(&self, element: Option<DomHandle>) {
        self.inner.dom.set(element);
    }
}
