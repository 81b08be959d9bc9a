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

//! Burst coalescing.

use futures::stream::{self, BoxStream};
use futures::{FutureExt, Stream, StreamExt};
use std::time::Duration;

/// Shortest timer tokio resolves; stands in for a zero-delay timeout.
const TIMER_BARRIER: Duration = Duration::from_millis(1);

/// How long [`settle`] waits for a burst to finish.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Barrier {
    /// Yield to the scheduler once; tasks already woken get to run first.
    Yield,
    /// Minimal timer; completes after all currently runnable work.
    Timer,
}

impl Barrier {
    async fn wait(self) {
        match self {
            Self::Yield => tokio::task::yield_now().await,
            Self::Timer => tokio::time::sleep(TIMER_BARRIER).await,
        }
    }
}

/// Collapses items that arrive before `barrier` passes into the last one.
///
/// After each item the barrier is awaited and anything that became ready in
/// the meantime replaces the pending item; the pending item is emitted once
/// a barrier passes with nothing new.
pub(crate) fn settle<S>(source: S, barrier: Barrier) -> BoxStream<'static, S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
{
    stream::unfold(Some(source.boxed()), move |source| async move {
        let mut source = source?;
        let mut pending = source.next().await?;
        loop {
            barrier.wait().await;
            match source.next().now_or_never() {
                Some(Some(item)) => pending = item,
                Some(None) => return Some((pending, None)),
                None => return Some((pending, Some(source))),
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::{settle, Barrier};
    use crate::stream::watch_stream;
    use futures::StreamExt;
    use tokio::sync::watch;

    #[tokio::test(start_paused = true)]
    async fn synchronous_burst_is_emitted_once() {
        let (sender, receiver) = watch::channel(0);
        let mut settled = settle(watch_stream(receiver), Barrier::Yield);
        assert_eq!(settled.next().await, Some(0));

        for value in 1..=5 {
            sender.send_replace(value);
        }
        assert_eq!(settled.next().await, Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_barrier_waits_for_spawned_work() {
        let (sender, receiver) = watch::channel(0);
        let mut settled = settle(watch_stream(receiver), Barrier::Timer);

        let task = tokio::spawn(async move {
            sender.send_replace(1);
            tokio::task::yield_now().await;
            sender.send_replace(2);
            sender
        });

        assert_eq!(settled.next().await, Some(2));
        drop(task.await);
    }

    #[tokio::test]
    async fn ending_source_flushes_pending_item() {
        let values: Vec<u8> = settle(futures::stream::iter(vec![1, 2, 3]), Barrier::Yield)
            .collect()
            .await;
        assert_eq!(values, vec![3]);
    }
}
