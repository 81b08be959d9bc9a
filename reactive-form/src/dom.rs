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

//! Boundary to the rendering layer's elements.
//!
//! Controls never inspect these handles. They are cached so that a failed
//! submission can scroll the offending element into view and focus its
//! first input.

use crate::config::ScrollIntoViewOptions;
use crate::stream::lock;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Something that can take keyboard focus.
pub trait Focusable: Send + Sync {
    fn focus(&self);
}

/// An element bound to a control by the rendering layer.
pub trait DomElement: Send + Sync {
    fn scroll_into_view(&self, options: &ScrollIntoViewOptions);

    /// First input descendant, if the element contains one.
    fn first_input(&self) -> Option<Arc<dyn Focusable>>;
}

pub type DomHandle = Arc<dyn DomElement>;

/// Access to the element a control is bound to.
pub trait HasRef {
    fn dom(&self) -> Option<DomHandle>;

    /// Registers (`Some`) or unregisters (`None`) the bound element.
    fn dom_ref(&self, element: Option<DomHandle>);
}

#[derive(Default)]
pub(crate) struct DomSlot(Mutex<Option<DomHandle>>);

impl DomSlot {
    pub(crate) fn get(&self) -> Option<DomHandle> {
        lock(&self.0).clone()
    }

    pub(crate) fn set(&self, element: Option<DomHandle>) {
        *lock(&self.0) = element;
    }
}

impl fmt::Debug for DomSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = lock(&self.0).is_some();
        f.debug_struct("DomSlot").field("bound", &bound).finish()
    }
}
