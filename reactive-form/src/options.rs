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

//! Construction options for controls.

use crate::metadata::Metadata;
use crate::validation::{Validation, ValidationInfo, Validator};
use std::future::Future;
use std::sync::Arc;

/// Reconciles a changed value with the previously emitted one:
/// `middleware(next, prev)`.
pub type Middleware<T> = Arc<dyn Fn(T, &T) -> T + Send + Sync>;

/// Options for a [`crate::LeafControl`].
pub struct ControlOptions<T, M = ()> {
    pub(crate) validator: Option<Validator<T>>,
    pub(crate) middleware: Option<Middleware<T>>,
    pub(crate) metadata: Metadata<M>,
}

impl<T> ControlOptions<T, ()> {
    pub fn new() -> Self {
        Self {
            validator: None,
            middleware: None,
            metadata: Metadata::none(),
        }
    }
}

impl<T> Default for ControlOptions<T, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, M> ControlOptions<T, M> {
    pub fn with_validator<F, V>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Validation>,
    {
        self.validator = Some(Arc::new(move |value: &T| validator(value).into()));
        self
    }

    /// Validator whose result is produced by a future.
    pub fn with_async_validator<F, Fut>(self, validator: F) -> Self
    where
        F: Fn(&T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationInfo> + Send + 'static,
    {
        self.with_validator(move |value: &T| Validation::future(validator(value)))
    }

    pub fn with_middleware<F>(mut self, middleware: F) -> Self
    where
        F: Fn(T, &T) -> T + Send + Sync + 'static,
    {
        self.middleware = Some(Arc::new(middleware));
        self
    }

    pub fn with_metadata<N>(self, metadata: Metadata<N>) -> ControlOptions<T, N> {
        ControlOptions {
            validator: self.validator,
            middleware: self.middleware,
            metadata,
        }
    }
}

/// Options for a [`crate::GroupControl`] or [`crate::ListControl`].
///
/// Composites derive their value from their children and take no middleware.
pub struct CompositeOptions<T, M = ()> {
    pub(crate) validator: Option<Validator<T>>,
    pub(crate) metadata: Metadata<M>,
}

impl<T> CompositeOptions<T, ()> {
    pub fn new() -> Self {
        Self {
            validator: None,
            metadata: Metadata::none(),
        }
    }
}

impl<T> Default for CompositeOptions<T, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, M> CompositeOptions<T, M> {
    pub fn with_validator<F, V>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Validation>,
    {
        self.validator = Some(Arc::new(move |value: &T| validator(value).into()));
        self
    }

    pub fn with_async_validator<F, Fut>(self, validator: F) -> Self
    where
        F: Fn(&T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationInfo> + Send + 'static,
    {
        self.with_validator(move |value: &T| Validation::future(validator(value)))
    }

    pub fn with_metadata<N>(self, metadata: Metadata<N>) -> CompositeOptions<T, N> {
        CompositeOptions {
            validator: self.validator,
            metadata,
        }
    }
}
