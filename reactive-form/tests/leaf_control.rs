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

use form_test_utils::{init_logging, wait, Recorder};
use futures::StreamExt;
use reactive_form::{Control, ControlOptions, LeafControl, Metadata, ValidationInfo};

const MUST_START_WITH_14: &str = "must start with '14'";

#[derive(Clone, Debug, PartialEq)]
struct Hint {
    tooltip: &'static str,
}

fn card_number() -> LeafControl<String, Hint> {
    LeafControl::with_options(
        "test".to_string(),
        ControlOptions::new()
            .with_async_validator(|value: &String| {
                let valid = value.starts_with("14");
                async move {
                    wait(1).await;
                    if valid {
                        ValidationInfo::Absent
                    } else {
                        ValidationInfo::from(MUST_START_WITH_14)
                    }
                }
            })
            .with_middleware(|mut next: String, _prev: &String| {
                if next.ends_with("  ") {
                    next.pop();
                }
                next
            })
            .with_metadata(Metadata::constant(Hint {
                tooltip: "Must start by '14'",
            })),
    )
}

#[tokio::test(start_paused = true)]
async fn leaf_emits_value_error_and_metadata() {
    init_logging();
    let input = card_number();

    let values = Recorder::spawn(input.value());
    let errors = Recorder::spawn(input.error());
    let metadata = Recorder::spawn(input.metadata());
    wait(10).await;

    assert_eq!(values.values(), vec!["test"]);
    assert_eq!(errors.values(), vec![ValidationInfo::from(MUST_START_WITH_14)]);
    assert_eq!(
        metadata.values(),
        vec![Hint {
            tooltip: "Must start by '14'"
        }]
    );

    input.change("142851".to_string());
    wait(10).await;

    assert_eq!(values.values(), vec!["test", "142851"]);
    assert_eq!(
        errors.values(),
        vec![ValidationInfo::from(MUST_START_WITH_14), ValidationInfo::Absent]
    );

    input.change("42851".to_string());
    wait(10).await;

    assert_eq!(values.last().as_deref(), Some("42851"));
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.last(), Some(ValidationInfo::from(MUST_START_WITH_14)));
    assert_eq!(metadata.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn middleware_trims_one_trailing_space() {
    let input = card_number();
    input.change("14  ".to_string());
    assert_eq!(input.value().next().await.as_deref(), Some("14 "));
}

#[tokio::test]
async fn middleware_composes_in_call_order() {
    let input = LeafControl::with_options(
        "d".to_string(),
        ControlOptions::new()
            .with_middleware(|next: String, prev: &String| format!("m({next},{prev})")),
    );
    input.change("a".to_string());
    input.change("b".to_string());

    assert_eq!(input.value().next().await.as_deref(), Some("m(b,m(a,d))"));
}

#[tokio::test]
async fn late_subscriber_gets_most_recent_value() {
    let input = LeafControl::new(0u8);
    let early = Recorder::spawn(input.value());
    for value in 1..=5 {
        input.change(value);
    }

    let mut late = input.value();
    assert_eq!(late.next().await, Some(5));
    drop(early);
}

#[tokio::test(start_paused = true)]
async fn superseded_validation_is_never_reported() {
    init_logging();
    let input = card_number();
    let errors = Recorder::spawn(input.error());
    wait(10).await;

    input.change("142851".to_string());
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
    input.change("42851".to_string());
    wait(10).await;

    assert_eq!(
        errors.values(),
        vec![
            ValidationInfo::from(MUST_START_WITH_14),
            ValidationInfo::from(MUST_START_WITH_14)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn panicking_validator_keeps_error_stream_alive() {
    init_logging();
    let input = LeafControl::with_options(
        0u32,
        ControlOptions::new().with_validator(|value: &u32| {
            if *value == 13 {
                panic!("unlucky value");
            }
            ValidationInfo::Absent
        }),
    );
    let errors = Recorder::spawn(input.error());
    wait(1).await;

    input.change(13);
    wait(1).await;
    input.change(14);
    wait(1).await;

    assert_eq!(
        errors.values(),
        vec![
            ValidationInfo::Absent,
            ValidationInfo::from(reactive_form::VALIDATION_UNAVAILABLE),
            ValidationInfo::Absent
        ]
    );
}
