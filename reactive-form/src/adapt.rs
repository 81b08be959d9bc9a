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

//! Re-typing a control's value.

use crate::control::{Control, FormNode};
use crate::dom::{DomHandle, HasRef};
use crate::observability::events;
use crate::validation::ValidationInfo;
use futures::stream::BoxStream;
use futures::{future, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "adapt";

type IntoOuter<V, U> = Arc<dyn Fn(V) -> Option<U> + Send + Sync>;
type FromOuter<U, V> = Arc<dyn Fn(U) -> Option<V> + Send + Sync>;

/// A control seen through a value mapping.
///
/// Errors, metadata, the DOM handle and the traversal node are the wrapped
/// control's own.
pub struct MappedControl<C: Control, U> {
    inner: C,
    into: IntoOuter<C::Value, U>,
    from: FromOuter<U, C::Value>,
}

impl<C: Control + Clone, U> Clone for MappedControl<C, U> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            into: self.into.clone(),
            from: self.from.clone(),
        }
    }
}

impl<C: Control, U> MappedControl<C, U> {
    pub fn get_ref(&self) -> &C {
        &self.inner
    }
}

pub trait ControlExt: Control + Sized {
    /// Presents the value as `U`. Changes for which `from` returns `None`
    /// are dropped.
    fn map_value<U, F, G>(self, into: F, from: G) -> MappedControl<Self, U>
    where
        F: Fn(Self::Value) -> U + Send + Sync + 'static,
        G: Fn(U) -> Option<Self::Value> + Send + Sync + 'static,
    {
        MappedControl {
            inner: self,
            into: Arc::new(move |value: Self::Value| Some(into(value))),
            from: Arc::new(from),
        }
    }

    /// Presents the value as JSON, so controls of different value types can
    /// share a group.
    fn json(self) -> MappedControl<Self, serde_json::Value>
    where
        Self::Value: Serialize + DeserializeOwned,
    {
        MappedControl {
            inner: self,
            into: Arc::new(|value: Self::Value| match serde_json::to_value(value) {
                Ok(json) => Some(json),
                Err(err) => {
                    warn!(
                        event = events::MAPPED_VALUE_UNREPRESENTABLE,
                        component = COMPONENT,
                        err = %err,
                        "value has no JSON form, skipping"
                    );
                    None
                }
            }),
            from: Arc::new(|json: serde_json::Value| -> Option<Self::Value> {
                match serde_json::from_value(json) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        debug!(
                            event = events::MAPPED_CHANGE_REJECTED,
                            component = COMPONENT,
                            err = %err,
                            "change does not fit the control's value type"
                        );
                        None
                    }
                }
            }),
        }
    }
}

impl<C: Control> ControlExt for C {}

impl<C, U> Control for MappedControl<C, U>
where
    C: Control,
    U: Clone + Send + Sync + 'static,
{
    type Value = U;
    type Meta = C::Meta;

    fn value(&self) -> BoxStream<'static, U> {
        let into = self.into.clone();
        self.inner
            .value()
            .filter_map(move |value| future::ready(into(value)))
            .boxed()
    }

    fn error(&self) -> BoxStream<'static, ValidationInfo> {
        self.inner.error()
    }

    fn metadata(&self) -> BoxStream<'static, C::Meta> {
        self.inner.metadata()
    }

    fn change(&self, value: U) {
        match (self.from)(value) {
            Some(value) => self.inner.change(value),
            None => debug!(
                event = events::MAPPED_CHANGE_REJECTED,
                component = COMPONENT,
                "mapped change ignored"
            ),
        }
    }

    fn node(&self) -> FormNode {
        self.inner.node()
    }
}

impl<C, U> HasRef for MappedControl<C, U>
where
    C: Control + HasRef,
{
    fn dom(&self) -> Option<DomHandle> {
        self.inner.dom()
    }

    fn dom_ref(&self, element: Option<DomHandle>) {
        self.inner.dom_ref(element);
    }
}
