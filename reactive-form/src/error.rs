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

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read submit config {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid submit config: {0}")]
    ConfigParse(#[from] json5::Error),
}

/// Why [`crate::submit_form`] could not produce an outcome.
#[derive(Debug, Error)]
pub enum SubmitError<E> {
    /// The submit handler failed; nothing is retried.
    #[error("submit handler failed")]
    Handler(#[source] E),
    /// The root value stream ended before producing a value.
    #[error("form value unavailable")]
    ValueUnavailable,
}
