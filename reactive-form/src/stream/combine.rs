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

//! Latest-value combination of several sources.

use futures::future;
use futures::stream::{self, BoxStream};
use futures::StreamExt;

/// Emits the latest value of every source, in source order, once each source
/// has produced at least one value and again whenever any source produces a
/// new one. No sources means one empty emission.
pub(crate) fn combine_latest<T>(
    sources: Vec<BoxStream<'static, T>>,
) -> BoxStream<'static, Vec<T>>
where
    T: Clone + Send + 'static,
{
    if sources.is_empty() {
        return stream::once(future::ready(Vec::new())).boxed();
    }

    let latest: Vec<Option<T>> = vec![None; sources.len()];
    let tagged = stream::select_all(
        sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| source.map(move |value| (index, value)).boxed()),
    );

    stream::unfold((tagged, latest), |(mut tagged, mut latest)| async move {
        loop {
            let (index, value) = tagged.next().await?;
            latest[index] = Some(value);
            if latest.iter().all(Option::is_some) {
                let snapshot: Vec<T> = latest.iter().flatten().cloned().collect();
                return Some((snapshot, (tagged, latest)));
            }
        }
    })
    .boxed()
}
