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

use reactive_form::{DomElement, Focusable, ScrollIntoViewOptions};
use std::sync::Arc;
use tracing::info;

/// Stand-in for a rendered field: reports scroll and focus requests.
pub(crate) struct ConsoleElement {
    label: String,
    input: Arc<ConsoleInput>,
}

impl ConsoleElement {
    pub(crate) fn new(label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            input: Arc::new(ConsoleInput {
                label: label.to_string(),
            }),
        })
    }
}

impl DomElement for ConsoleElement {
    fn scroll_into_view(&self, options: &ScrollIntoViewOptions) {
        info!(
            field = self.label.as_str(),
            behavior = ?options.behavior,
            block = ?options.block,
            "scrolling field into view"
        );
    }

    fn first_input(&self) -> Option<Arc<dyn Focusable>> {
        Some(self.input.clone())
    }
}

pub(crate) struct ConsoleInput {
    label: String,
}

impl Focusable for ConsoleInput {
    fn focus(&self) {
        info!(field = self.label.as_str(), "focusing input");
    }
}
