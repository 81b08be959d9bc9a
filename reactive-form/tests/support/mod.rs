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

#![allow(dead_code)]

use reactive_form::{DomElement, DomHandle, Focusable, ScrollIntoViewOptions};
use std::sync::{Arc, Mutex};

/// Ordered record of DOM side effects and error reports, shared by every
/// mock created from it.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct MockInput {
    name: String,
    journal: Journal,
}

impl Focusable for MockInput {
    fn focus(&self) {
        self.journal.record(format!("focus {}", self.name));
    }
}

pub struct MockElement {
    name: String,
    journal: Journal,
    input: Option<Arc<MockInput>>,
    scrolled_with: Mutex<Vec<ScrollIntoViewOptions>>,
}

impl MockElement {
    /// An element containing one input.
    pub fn with_input(name: &str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            input: Some(Arc::new(MockInput {
                name: format!("{name}/input"),
                journal: journal.clone(),
            })),
            scrolled_with: Mutex::new(Vec::new()),
        })
    }

    /// A container without any input.
    pub fn bare(name: &str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            input: None,
            scrolled_with: Mutex::new(Vec::new()),
        })
    }

    pub fn scrolled_with(&self) -> Vec<ScrollIntoViewOptions> {
        self.scrolled_with.lock().unwrap().clone()
    }

    pub fn handle(self: &Arc<Self>) -> DomHandle {
        self.clone()
    }
}

impl DomElement for MockElement {
    fn scroll_into_view(&self, options: &ScrollIntoViewOptions) {
        self.scrolled_with.lock().unwrap().push(*options);
        self.journal.record(format!("scroll {}", self.name));
    }

    fn first_input(&self) -> Option<Arc<dyn Focusable>> {
        self.input
            .clone()
            .map(|input| input as Arc<dyn Focusable>)
    }
}
