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

//! Validation results, validator invocation and error aggregation.

use crate::observability::{events, fields};
use futures::future::{self, BoxFuture};
use futures::stream::{self, BoxStream};
use futures::{FutureExt, Stream, StreamExt};
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

const COMPONENT: &str = "validation";

/// Message reported in place of a result when a validator faults.
pub const VALIDATION_UNAVAILABLE: &str = "validation unavailable";

/// Outcome of validating a value: nothing wrong, one message, or several
/// independent messages in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ValidationInfo {
    #[default]
    Absent,
    Message(String),
    Messages(Vec<String>),
}

impl ValidationInfo {
    /// `true` when this value reports at least one message.
    ///
    /// An empty message string counts as no error.
    pub fn is_error(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Message(message) => !message.is_empty(),
            Self::Messages(messages) => !messages.is_empty(),
        }
    }

    pub fn is_absent(&self) -> bool {
        !self.is_error()
    }

    /// Flattened view of every message carried by this value.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            Self::Absent => Vec::new(),
            Self::Message(message) if message.is_empty() => Vec::new(),
            Self::Message(message) => vec![message.as_str()],
            Self::Messages(messages) => messages.iter().map(String::as_str).collect(),
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self::Message(VALIDATION_UNAVAILABLE.to_string())
    }
}

/// Messages are joined with `,`; absent renders as an empty string.
impl fmt::Display for ValidationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Message(message) => f.write_str(message),
            Self::Messages(messages) => f.write_str(&messages.join(",")),
        }
    }
}

impl From<&str> for ValidationInfo {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for ValidationInfo {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl<S: Into<String>> From<Vec<S>> for ValidationInfo {
    fn from(messages: Vec<S>) -> Self {
        Self::Messages(messages.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ValidationInfo>> From<Option<T>> for ValidationInfo {
    fn from(info: Option<T>) -> Self {
        info.map_or(Self::Absent, Into::into)
    }
}

/// Flattens per-source results into one ordered list of messages.
///
/// Absent entries and empty message strings are skipped. Returns
/// [`ValidationInfo::Absent`] when nothing remains.
pub fn join_validation_info<I>(items: I) -> ValidationInfo
where
    I: IntoIterator<Item = ValidationInfo>,
{
    let mut joined = Vec::new();
    for item in items {
        match item {
            ValidationInfo::Absent => {}
            ValidationInfo::Message(message) if message.is_empty() => {}
            ValidationInfo::Message(message) => joined.push(message),
            ValidationInfo::Messages(messages) => joined.extend(messages),
        }
    }
    if joined.is_empty() {
        ValidationInfo::Absent
    } else {
        ValidationInfo::Messages(joined)
    }
}

/// What a validator hands back for one value.
pub enum Validation {
    /// Result known immediately.
    Ready(ValidationInfo),
    /// Result produced by a future, e.g. a remote uniqueness check.
    Pending(BoxFuture<'static, ValidationInfo>),
    /// A sequence of results; every item replaces the previous one.
    Stream(BoxStream<'static, ValidationInfo>),
}

impl Validation {
    pub fn ready(info: impl Into<ValidationInfo>) -> Self {
        Self::Ready(info.into())
    }

    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = ValidationInfo> + Send + 'static,
    {
        Self::Pending(future.boxed())
    }

    /// Wraps a fallible future. An `Err` is reported as
    /// [`VALIDATION_UNAVAILABLE`] instead of ending the error stream.
    pub fn try_future<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<ValidationInfo, E>> + Send + 'static,
        E: fmt::Display,
    {
        Self::Pending(
            future
                .map(|result| {
                    result.unwrap_or_else(|err| {
                        warn!(
                            event = events::VALIDATOR_FAULT,
                            component = COMPONENT,
                            reason = fields::REASON_FAILED,
                            err = %err,
                            "validator returned an error"
                        );
                        ValidationInfo::unavailable()
                    })
                })
                .boxed(),
        )
    }

    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = ValidationInfo> + Send + 'static,
    {
        Self::Stream(stream.boxed())
    }

    /// Converts into a stream, converting panics raised while it is polled
    /// into [`VALIDATION_UNAVAILABLE`].
    pub(crate) fn into_stream(self) -> BoxStream<'static, ValidationInfo> {
        match self {
            Self::Ready(info) => stream::once(future::ready(info)).boxed(),
            Self::Pending(future) => AssertUnwindSafe(future)
                .catch_unwind()
                .map(|result| result.unwrap_or_else(|payload| fault(payload.as_ref())))
                .into_stream()
                .boxed(),
            Self::Stream(stream) => AssertUnwindSafe(stream)
                .catch_unwind()
                .map(|result| result.unwrap_or_else(|payload| fault(payload.as_ref())))
                .boxed(),
        }
    }
}

impl From<ValidationInfo> for Validation {
    fn from(info: ValidationInfo) -> Self {
        Self::Ready(info)
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(info) => f.debug_tuple("Ready").field(info).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A function from a value to its (possibly asynchronous) validation.
pub type Validator<T> = Arc<dyn Fn(&T) -> Validation + Send + Sync>;

/// Runs `validator` against `value`, converting a panic in the call itself
/// into [`VALIDATION_UNAVAILABLE`].
pub(crate) fn run_validator<T>(
    validator: &Validator<T>,
    value: &T,
) -> BoxStream<'static, ValidationInfo> {
    match panic::catch_unwind(AssertUnwindSafe(|| validator(value))) {
        Ok(validation) => validation.into_stream(),
        Err(payload) => stream::once(future::ready(fault(payload.as_ref()))).boxed(),
    }
}

fn fault(payload: &(dyn std::any::Any + Send)) -> ValidationInfo {
    warn!(
        event = events::VALIDATOR_FAULT,
        component = COMPONENT,
        reason = fields::REASON_PANIC,
        err = fields::format_panic_payload(payload).as_str(),
        "validator panicked"
    );
    ValidationInfo::unavailable()
}

#[cfg(test)]
mod tests {
    use super::{join_validation_info, run_validator, Validation, ValidationInfo, Validator};
    use super::VALIDATION_UNAVAILABLE;
    use futures::StreamExt;
    use std::sync::Arc;

    #[test]
    fn join_flattens_in_order_and_skips_absent() {
        let joined = join_validation_info([
            ValidationInfo::Absent,
            "E1".into(),
            vec!["E2", "E3"].into(),
            ValidationInfo::Absent,
        ]);
        assert_eq!(joined, ValidationInfo::from(vec!["E1", "E2", "E3"]));
    }

    #[test]
    fn join_of_nothing_is_absent() {
        assert_eq!(
            join_validation_info([ValidationInfo::Absent, ValidationInfo::Absent]),
            ValidationInfo::Absent
        );
        assert_eq!(
            join_validation_info([ValidationInfo::from(""), ValidationInfo::Absent]),
            ValidationInfo::Absent
        );
        assert_eq!(join_validation_info(Vec::new()), ValidationInfo::Absent);
    }

    #[test]
    fn display_joins_messages_with_commas() {
        assert_eq!(ValidationInfo::from("required").to_string(), "required");
        assert_eq!(ValidationInfo::from(vec!["a", "b"]).to_string(), "a,b");
        assert_eq!(ValidationInfo::Absent.to_string(), "");
    }

    #[test]
    fn option_conversion_maps_none_to_absent() {
        assert_eq!(ValidationInfo::from(None::<&str>), ValidationInfo::Absent);
        assert!(ValidationInfo::from(Some("bad")).is_error());
        assert!(!ValidationInfo::Messages(Vec::new()).is_error());
    }

    #[tokio::test]
    async fn panicking_validator_reports_unavailable() {
        let validator: Validator<u32> =
            Arc::new(|_: &u32| -> Validation { panic!("validator bug") });
        let results: Vec<_> = run_validator(&validator, &1).collect().await;
        assert_eq!(results, vec![ValidationInfo::from(VALIDATION_UNAVAILABLE)]);
    }

    #[tokio::test]
    async fn panicking_future_reports_unavailable() {
        let validator: Validator<u32> = Arc::new(|value: &u32| {
            let value = *value;
            Validation::future(async move {
                if value > 0 {
                    panic!("remote check exploded");
                }
                ValidationInfo::Absent
            })
        });
        let results: Vec<_> = run_validator(&validator, &3).collect().await;
        assert_eq!(results, vec![ValidationInfo::from(VALIDATION_UNAVAILABLE)]);
    }

    #[tokio::test]
    async fn failing_future_reports_unavailable() {
        let validator: Validator<u32> = Arc::new(|_: &u32| {
            Validation::try_future(async { Err::<ValidationInfo, _>("timeout") })
        });
        let results: Vec<_> = run_validator(&validator, &3).collect().await;
        assert_eq!(results, vec![ValidationInfo::from(VALIDATION_UNAVAILABLE)]);
    }

    #[tokio::test]
    async fn stream_validation_yields_every_result() {
        let validator: Validator<u32> = Arc::new(|_: &u32| {
            Validation::stream(futures::stream::iter(vec![
                ValidationInfo::from("checking"),
                ValidationInfo::Absent,
            ]))
        });
        let results: Vec<_> = run_validator(&validator, &3).collect().await;
        assert_eq!(results, vec![ValidationInfo::from("checking"), ValidationInfo::Absent]);
    }
}
