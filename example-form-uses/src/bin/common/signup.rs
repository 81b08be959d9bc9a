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

use super::backend::{BackendError, SignupBackend};
use super::console::ConsoleElement;
use reactive_form::{
    CompositeOptions, ControlExt, ControlOptions, Fields, GroupControl, HasRef, LeafControl,
    Metadata, Validation, ValidationInfo,
};
use serde_json::Value;
use std::sync::Arc;

const MIN_PASSWORD_LEN: usize = 8;

/// The signup form and direct handles to its fields.
pub(crate) struct SignupForm {
    pub(crate) root: GroupControl<Value>,
    pub(crate) username: LeafControl<String>,
    pub(crate) password: LeafControl<String, &'static str>,
    pub(crate) password_confirm: LeafControl<String>,
    pub(crate) email: LeafControl<String>,
    pub(crate) newsletter: LeafControl<bool>,
}

impl SignupForm {
    pub(crate) fn new(backend: Arc<dyn SignupBackend>) -> Self {
        let username = LeafControl::with_options(
            String::new(),
            ControlOptions::new()
                .with_middleware(|next: String, _prev: &String| next.trim().to_lowercase())
                .with_validator(move |username: &String| {
                    if username.is_empty() {
                        return Validation::ready("username is required");
                    }
                    let backend = backend.clone();
                    let username = username.clone();
                    Validation::try_future(async move {
                        let taken = backend.username_taken(&username).await?;
                        Ok::<_, BackendError>(ValidationInfo::from(
                            taken.then(|| format!("username `{username}` is taken")),
                        ))
                    })
                }),
        );

        let password = LeafControl::with_options(
            String::new(),
            ControlOptions::new()
                .with_validator(|password: &String| {
                    let mut problems = Vec::new();
                    if password.chars().count() < MIN_PASSWORD_LEN {
                        problems.push(format!(
                            "password needs at least {MIN_PASSWORD_LEN} characters"
                        ));
                    }
                    if !password.chars().any(|c| c.is_ascii_digit()) {
                        problems.push("password needs a digit".to_string());
                    }
                    ValidationInfo::from(problems)
                })
                .with_metadata(Metadata::constant("use at least 8 characters and a digit")),
        );

        let password_confirm = LeafControl::new(String::new());

        let email = LeafControl::with_options(
            String::new(),
            ControlOptions::new().with_validator(|email: &String| {
                ValidationInfo::from((!email.contains('@')).then_some("email must contain @"))
            }),
        );

        let newsletter = LeafControl::new(false);

        for (label, control) in [
            ("username", &username as &dyn HasRef),
            ("password", &password),
            ("password_confirm", &password_confirm),
            ("email", &email),
        ] {
            control.dom_ref(Some(ConsoleElement::new(label)));
        }

        let root = GroupControl::builder()
            .field("username", username.clone().json())
            .field("password", password.clone().json())
            .field("password_confirm", password_confirm.clone().json())
            .field("email", email.clone().json())
            .field("newsletter", newsletter.clone().json())
            .build(CompositeOptions::new().with_validator(|signup: &Fields<Value>| {
                ValidationInfo::from(
                    (signup.get("password") != signup.get("password_confirm"))
                        .then_some("passwords do not match"),
                )
            }));
        root.dom_ref(Some(ConsoleElement::new("signup")));

        Self {
            root,
            username,
            password,
            password_confirm,
            email,
            newsletter,
        }
    }
}
