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

//! Switch-latest flattening.

use crate::observability::events;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

const COMPONENT: &str = "switch_map";

/// Maps every item of `source` to an inner stream and forwards only the
/// inner stream of the most recent item.
///
/// A new source item drops the inner stream in flight, so results of a
/// superseded computation are never emitted. The combined stream ends once
/// the source has ended and the current inner stream has ended too.
pub(crate) fn switch_map<T, R, F>(
    source: BoxStream<'static, T>,
    project: F,
    label: &'static str,
) -> BoxStream<'static, R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(T) -> BoxStream<'static, R> + Send + Unpin + 'static,
{
    SwitchMap {
        source: Some(source),
        inner: None,
        project,
        generation: 0,
        label,
    }
    .boxed()
}

struct SwitchMap<T, R, F> {
    source: Option<BoxStream<'static, T>>,
    inner: Option<BoxStream<'static, R>>,
    project: F,
    generation: u64,
    label: &'static str,
}

impl<T, R, F> Stream for SwitchMap<T, R, F>
where
    F: FnMut(T) -> BoxStream<'static, R> + Unpin,
{
    type Item = R;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<R>> {
        let this = self.get_mut();

        while let Some(source) = this.source.as_mut() {
            match source.poll_next_unpin(cx) {
                Poll::Ready(Some(item)) => {
                    this.generation += 1;
                    if this.inner.is_some() {
                        debug!(
                            event = events::INNER_STREAM_SUPERSEDED,
                            component = COMPONENT,
                            label = this.label,
                            generation = this.generation,
                            "dropping superseded inner stream"
                        );
                    }
                    this.inner = Some((this.project)(item));
                }
                Poll::Ready(None) => this.source = None,
                Poll::Pending => break,
            }
        }

        if let Some(inner) = this.inner.as_mut() {
            match inner.poll_next_unpin(cx) {
                Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                Poll::Ready(None) => this.inner = None,
                Poll::Pending => return Poll::Pending,
            }
        }

        if this.source.is_none() {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
