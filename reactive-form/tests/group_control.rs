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

mod support;

use form_test_utils::{init_logging, wait, Recorder};
use futures::StreamExt;
use reactive_form::{
    CompositeOptions, Control, ControlExt, Fields, GroupControl, HasRef, LeafControl, Metadata,
    ValidationInfo,
};
use serde_json::{json, Value};
use std::sync::Arc;
use support::{Journal, MockElement};

const USERNAME_REQUIRED: &str = "username is required";
const PASSWORDS_DIFFER: &str = "password confirmed must be identical to password";

fn json_fields(value: Value) -> Fields<Value> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("expected an object, got {other}"),
    }
}

fn login_form() -> GroupControl<Value, &'static str> {
    GroupControl::builder()
        .field("username", LeafControl::new(String::new()).json())
        .field("password", LeafControl::new(String::new()).json())
        .field("passwordConfirm", LeafControl::new(String::new()).json())
        .field("verifyCode", LeafControl::new(0u32).json())
        .field("rememberMe", LeafControl::new(false).json())
        .build(
            CompositeOptions::new()
                .with_async_validator(|value: &Fields<Value>| {
                    let passwords_differ = value.get("password") != value.get("passwordConfirm");
                    let username_missing = value
                        .get("username")
                        .and_then(Value::as_str)
                        .map_or(true, str::is_empty);
                    async move {
                        if passwords_differ {
                            ValidationInfo::from(PASSWORDS_DIFFER)
                        } else if username_missing {
                            ValidationInfo::from(USERNAME_REQUIRED)
                        } else {
                            ValidationInfo::Absent
                        }
                    }
                })
                .with_metadata(Metadata::constant("Must start by '14'")),
        )
}

#[tokio::test(start_paused = true)]
async fn group_combines_children_and_merges_changes() {
    init_logging();
    let form = login_form();

    let values = Recorder::spawn(form.value());
    let errors = Recorder::spawn(form.error());
    let metadata = Recorder::spawn(form.metadata());
    wait(10).await;

    assert_eq!(
        values.values(),
        vec![json_fields(json!({
            "username": "",
            "password": "",
            "passwordConfirm": "",
            "verifyCode": 0,
            "rememberMe": false,
        }))]
    );
    assert_eq!(errors.values(), vec![ValidationInfo::from(vec![USERNAME_REQUIRED])]);
    assert_eq!(metadata.values(), vec!["Must start by '14'"]);
    assert!(metadata.is_finished());

    form.change(json_fields(json!({
        "username": "11451  ",
        "password": "1919810",
        "passwordConfirm": "1919810",
        "rememberMe": true,
        "verifyCode": 1,
        "wagawaga": 1,
    })));
    wait(10).await;

    assert_eq!(values.len(), 2);
    let current = values.last().unwrap();
    assert!(!current.contains_key("wagawaga"));
    assert_eq!(
        current,
        json_fields(json!({
            "username": "11451  ",
            "password": "1919810",
            "passwordConfirm": "1919810",
            "verifyCode": 1,
            "rememberMe": true,
        }))
    );
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.last(), Some(ValidationInfo::Absent));
    assert_eq!(metadata.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn partial_change_leaves_other_fields_untouched() {
    let a = LeafControl::new(String::new());
    let b = LeafControl::new(String::new());
    let form = GroupControl::builder()
        .field("a", a.clone().json())
        .field("b", b.clone().json())
        .build(CompositeOptions::new());

    let values = Recorder::spawn(form.value());
    wait(1).await;
    form.change(json_fields(json!({ "a": "x" })));
    wait(1).await;

    assert_eq!(values.last(), Some(json_fields(json!({ "a": "x", "b": "" }))));
    assert_eq!(a.current(), "x");
    assert_eq!(b.current(), "");
}

#[tokio::test(start_paused = true)]
async fn nested_groups_and_child_errors_are_joined_in_order() {
    let street = LeafControl::with_options(
        String::new(),
        reactive_form::ControlOptions::new().with_validator(|value: &String| {
            ValidationInfo::from(value.is_empty().then_some("street is required"))
        }),
    );
    let tags = LeafControl::with_options(
        Vec::<String>::new(),
        reactive_form::ControlOptions::new().with_validator(|_: &Vec<String>| {
            ValidationInfo::from(vec!["tag a", "tag b"])
        }),
    );
    let address = GroupControl::builder()
        .field("street", street.clone().json())
        .build(CompositeOptions::new());
    let form = GroupControl::builder()
        .field("address", address.json())
        .field("tags", tags.json())
        .build(CompositeOptions::new());

    let errors = Recorder::spawn(form.error());
    wait(10).await;
    assert_eq!(
        errors.last(),
        Some(ValidationInfo::from(vec!["street is required", "tag a", "tag b"]))
    );

    street.change("Main St".to_string());
    wait(10).await;
    assert_eq!(errors.last(), Some(ValidationInfo::from(vec!["tag a", "tag b"])));
}

#[test]
fn group_dom_ref_round_trips() {
    let form = GroupControl::<Value>::builder().build(CompositeOptions::new());
    assert!(form.dom().is_none());

    let journal = Journal::default();
    let element = MockElement::bare("form", &journal).handle();
    form.dom_ref(Some(element.clone()));
    assert!(form.dom().is_some_and(|dom| Arc::ptr_eq(&dom, &element)));

    form.dom_ref(None);
    assert!(form.dom().is_none());
}

#[tokio::test(start_paused = true)]
async fn late_subscriber_starts_from_current_fields_while_another_listens() {
    init_logging();
    let name = LeafControl::new("old".to_string());
    let form = GroupControl::builder()
        .field("name", name.clone().json())
        .field("age", LeafControl::new(30u32).json())
        .build(CompositeOptions::new());
    let attached = Recorder::spawn(form.value());
    wait(1).await;

    name.change("new".to_string());

    let expected = json_fields(json!({ "name": "new", "age": 30 }));
    assert_eq!(form.value().next().await, Some(expected.clone()));
    wait(1).await;
    assert_eq!(attached.last(), Some(expected));
}

#[tokio::test(start_paused = true)]
async fn late_error_subscriber_reflects_current_children() {
    init_logging();
    let name = LeafControl::with_options(
        "ok".to_string(),
        reactive_form::ControlOptions::new().with_async_validator(|value: &String| {
            let empty = value.is_empty();
            async move {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                ValidationInfo::from(empty.then_some(USERNAME_REQUIRED))
            }
        }),
    );
    let form = GroupControl::builder()
        .field("name", name.clone())
        .build(CompositeOptions::new());
    let attached = Recorder::spawn(form.error());
    wait(60).await;
    assert_eq!(attached.values(), vec![ValidationInfo::Absent]);

    name.change(String::new());
    wait(5).await;

    assert_eq!(
        form.error().next().await,
        Some(ValidationInfo::from(vec![USERNAME_REQUIRED]))
    );
    wait(5).await;
    assert_eq!(
        attached.last(),
        Some(ValidationInfo::from(vec![USERNAME_REQUIRED]))
    );
}
