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

//! # reactive-form
//!
//! `reactive-form` keeps form state as streams. A form is a tree of
//! controls: [`LeafControl`] holds one input value, [`GroupControl`] combines
//! a fixed set of named children and [`ListControl`] combines a keyed,
//! mutable sequence of children. Every control exposes its value, its
//! validation result and its metadata as `futures` streams, and takes new
//! values through [`Control::change`].
//!
//! ```
//! use futures::StreamExt;
//! use reactive_form::{
//!     CompositeOptions, Control, ControlExt, ControlOptions, GroupControl, LeafControl,
//!     ValidationInfo,
//! };
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let email = LeafControl::with_options(
//!     String::new(),
//!     ControlOptions::new().with_validator(|value: &String| {
//!         ValidationInfo::from((!value.contains('@')).then_some("email is invalid"))
//!     }),
//! );
//! let form = GroupControl::builder()
//!     .field("email", email.clone().json())
//!     .field("newsletter", LeafControl::new(false).json())
//!     .build(CompositeOptions::new());
//!
//! assert_eq!(
//!     form.error().next().await,
//!     Some(ValidationInfo::from(vec!["email is invalid"]))
//! );
//!
//! email.change("ada@example.com".to_string());
//! let value = form.value().next().await.unwrap();
//! assert_eq!(value["email"], "ada@example.com");
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - Stream plumbing: replay-latest sharing, latest-value combination,
//!   burst settling and switch-latest flattening
//! - Controls: leaf, group and list, plus value adapters
//! - Submission: first-error traversal and the submit driver
//! - Configuration: json5 submit settings
//!
//! Derived streams run on tokio tasks; poll them inside a tokio runtime.
//!
//! ## Observability model
//!
//! The crate uses `tracing` for events. Library code never initializes a
//! global subscriber; binaries and tests do that once at their boundary.

mod adapt;
pub use adapt::{ControlExt, MappedControl};

mod config;
pub use config::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, SubmitConfig};

mod control;
pub use control::{AnyControl, Control, FormNode, NodeKind, NodeSnapshot};

mod dom;
pub use dom::{DomElement, DomHandle, Focusable, HasRef};

mod error;
pub use error::{FormError, SubmitError};

mod group;
pub use group::{Fields, GroupBuilder, GroupControl};

mod leaf;
pub use leaf::LeafControl;

mod list;
pub use list::{ListControl, ListEntry};

mod metadata;
pub use metadata::Metadata;

#[doc(hidden)]
pub mod observability;

mod options;
pub use options::{CompositeOptions, ControlOptions, Middleware};

mod stream;

mod submit;
pub use submit::{
    submit_form, validate_form_control, SubmitOptions, SubmitOutcome, ValidationFailure,
};

mod validation;
pub use validation::{
    join_validation_info, Validation, ValidationInfo, Validator, VALIDATION_UNAVAILABLE,
};
