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

//! First-error traversal and form submission.

use crate::config::{ScrollIntoViewOptions, SubmitConfig};
use crate::control::{Control, FormNode, NodeKind, NodeSnapshot};
use crate::dom::DomHandle;
use crate::error::SubmitError;
use crate::observability::{events, fields};
use crate::validation::ValidationInfo;
use futures::future::BoxFuture;
use futures::stream::FuturesOrdered;
use futures::{FutureExt, StreamExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "submit";

/// The failing node found by [`validate_form_control`].
#[derive(Clone)]
pub struct ValidationFailure {
    pub error: ValidationInfo,
    pub dom: Option<DomHandle>,
}

impl fmt::Debug for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationFailure")
            .field("error", &self.error)
            .field("dom", &self.dom.is_some())
            .finish()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

/// Finds the most specific failing node of `control`, depth first.
///
/// Children are checked concurrently; when several fail, the first one in
/// structural order wins. A node's own error only counts when none of its
/// children fails, and is the first result its error stream produces.
/// Foreign controls are skipped.
pub async fn validate_form_control<C>(control: &C) -> Option<ValidationFailure>
where
    C: Control + ?Sized,
{
    validate_node(control.node()).await
}

fn validate_node(node: FormNode) -> BoxFuture<'static, Option<ValidationFailure>> {
    async move {
        match node {
            FormNode::Foreign => None,
            FormNode::Leaf(snapshot) => own_failure(NodeKind::Leaf, snapshot).await,
            FormNode::Group(snapshot, children) => {
                match first_child_failure(children).await {
                    Some(failure) => Some(failure),
                    None => own_failure(NodeKind::Group, snapshot).await,
                }
            }
            FormNode::List(snapshot, children) => {
                match first_child_failure(children).await {
                    Some(failure) => Some(failure),
                    None => own_failure(NodeKind::List, snapshot).await,
                }
            }
        }
    }
    .boxed()
}

async fn first_child_failure(children: Vec<FormNode>) -> Option<ValidationFailure> {
    let mut pending: FuturesOrdered<_> = children.into_iter().map(validate_node).collect();
    while let Some(result) = pending.next().await {
        if result.is_some() {
            return result;
        }
    }
    None
}

async fn own_failure(kind: NodeKind, mut snapshot: NodeSnapshot) -> Option<ValidationFailure> {
    let error = snapshot.error.next().await?;
    if !error.is_error() {
        return None;
    }
    debug!(
        event = events::TRAVERSAL_FAILURE_FOUND,
        component = COMPONENT,
        kind = kind.as_str(),
        has_dom = snapshot.dom.is_some(),
        error = fields::format_validation(&error).as_str(),
        "validation failure found"
    );
    Some(ValidationFailure {
        error,
        dom: snapshot.dom,
    })
}

type ErrorReporter = Arc<dyn Fn(&str) + Send + Sync>;

/// Side effects of a rejected submission.
#[derive(Clone)]
pub struct SubmitOptions {
    pub scroll: ScrollIntoViewOptions,
    pub focus_first_input: bool,
    on_error: Option<ErrorReporter>,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        SubmitConfig::default().into()
    }
}

impl SubmitOptions {
    /// Called with the failure rendered as text, messages joined by `,`.
    pub fn with_on_error<F>(mut self, on_error: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(on_error));
        self
    }
}

impl From<SubmitConfig> for SubmitOptions {
    fn from(config: SubmitConfig) -> Self {
        Self {
            scroll: config.scroll,
            focus_first_input: config.focus_first_input,
            on_error: None,
        }
    }
}

impl fmt::Debug for SubmitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitOptions")
            .field("scroll", &self.scroll)
            .field("focus_first_input", &self.focus_first_input)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub enum SubmitOutcome<R> {
    /// Validation passed and the handler returned this.
    Submitted(R),
    /// Validation failed; the handler was not called.
    Rejected(ValidationFailure),
}

/// Validates `root` and, only if nothing fails, hands its current value to
/// `handle_submit`.
///
/// On failure the failing element is scrolled into view, its first input
/// focused and `on_error` called, in that order.
pub async fn submit_form<C, F, Fut, R, E>(
    root: &C,
    handle_submit: F,
    options: SubmitOptions,
) -> Result<SubmitOutcome<R>, SubmitError<E>>
where
    C: Control + ?Sized,
    F: FnOnce(C::Value) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: fmt::Display,
{
    info!(event = events::SUBMIT_START, component = COMPONENT, "submitting form");

    if let Some(failure) = validate_form_control(root).await {
        report_failure(&failure, &options);
        info!(
            event = events::SUBMIT_REJECTED,
            component = COMPONENT,
            error = %failure,
            "submission rejected by validation"
        );
        return Ok(SubmitOutcome::Rejected(failure));
    }

    let Some(value) = root.value().next().await else {
        warn!(
            event = events::SUBMIT_VALUE_UNAVAILABLE,
            component = COMPONENT,
            "form value stream ended without a value"
        );
        return Err(SubmitError::ValueUnavailable);
    };

    match handle_submit(value).await {
        Ok(result) => {
            info!(event = events::SUBMIT_OK, component = COMPONENT, "form submitted");
            Ok(SubmitOutcome::Submitted(result))
        }
        Err(err) => {
            warn!(
                event = events::SUBMIT_FAILED,
                component = COMPONENT,
                err = %err,
                "submit handler failed"
            );
            Err(SubmitError::Handler(err))
        }
    }
}

fn report_failure(failure: &ValidationFailure, options: &SubmitOptions) {
    if let Some(dom) = &failure.dom {
        dom.scroll_into_view(&options.scroll);
        if options.focus_first_input {
            if let Some(input) = dom.first_input() {
                input.focus();
            }
        }
    }
    if let Some(on_error) = &options.on_error {
        on_error(&failure.to_string());
    }
}
