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

mod common;

use clap::Parser;
use common::backend::{InMemoryBackend, SignupBackend};
use common::signup::SignupForm;
use futures::StreamExt;
use reactive_form::{
    submit_form, Control, Fields, SubmitConfig, SubmitOptions, SubmitOutcome,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_LATENCY_MS: u64 = 50;
const RESERVED_USERNAMES: [&str; 2] = ["admin", "root"];

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "")]
    username: String,
    #[arg(long, default_value = "")]
    password: String,
    /// Defaults to --password
    #[arg(long)]
    password_confirm: Option<String>,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long)]
    newsletter: bool,
    /// json5 object merged into the form after the flags, e.g. "{ email: 'a@b.c' }"
    #[arg(long)]
    prefill: Option<String>,
    /// json5 file with submit behaviour (scroll options, focus)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulated backend round-trip in milliseconds
    #[arg(long, default_value_t = DEFAULT_LATENCY_MS)]
    latency_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    let args = Args::parse();

    let backend: Arc<dyn SignupBackend> = Arc::new(InMemoryBackend::new(
        RESERVED_USERNAMES,
        Duration::from_millis(args.latency_ms),
    ));
    let form = SignupForm::new(backend.clone());

    let password_confirm = args
        .password_confirm
        .unwrap_or_else(|| args.password.clone());
    form.username.change(args.username);
    form.password.change(args.password);
    form.password_confirm.change(password_confirm);
    form.email.change(args.email);
    form.newsletter.change(args.newsletter);

    if let Some(prefill) = args.prefill {
        let fields: Fields<Value> = json5::from_str(&prefill)?;
        form.root.change(fields);
    }

    if let Some(hint) = form.password.metadata().next().await {
        info!(hint, "password hint");
    }

    let options: SubmitOptions = match args.config {
        Some(path) => SubmitConfig::from_file(path)?.into(),
        None => SubmitOptions::default(),
    };
    let options = options.with_on_error(|error| warn!(error, "signup rejected"));

    let outcome = submit_form(
        &form.root,
        |signup: Fields<Value>| async move { backend.register(&signup).await },
        options,
    )
    .await?;

    match outcome {
        SubmitOutcome::Submitted(id) => info!(id, "signup complete"),
        SubmitOutcome::Rejected(failure) => info!(error = %failure, "fix the form and try again"),
    }

    Ok(())
}
