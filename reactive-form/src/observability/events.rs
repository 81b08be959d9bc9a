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

//! Canonical structured event names used across `reactive-form`.

// Shared computation lifecycle.
pub const SHARED_STREAM_START: &str = "shared_stream_start";
pub const SHARED_STREAM_STOP: &str = "shared_stream_stop";
pub const SHARED_STREAM_ATTACH: &str = "shared_stream_attach";
pub const SHARED_STREAM_DETACH: &str = "shared_stream_detach";

// Switch-latest and validator invocation.
pub const INNER_STREAM_SUPERSEDED: &str = "inner_stream_superseded";
pub const VALIDATOR_FAULT: &str = "validator_fault";

// Control mutations.
pub const LEAF_CHANGE: &str = "leaf_change";
pub const GROUP_CHANGE: &str = "group_change";
pub const GROUP_CHANGE_IGNORED_KEY: &str = "group_change_ignored_key";
pub const GROUP_FIELD_REPLACED: &str = "group_field_replaced";
pub const LIST_MUTATION: &str = "list_mutation";
pub const LIST_INDEX_OUT_OF_RANGE: &str = "list_index_out_of_range";
pub const MAPPED_CHANGE_REJECTED: &str = "mapped_change_rejected";
pub const MAPPED_VALUE_UNREPRESENTABLE: &str = "mapped_value_unrepresentable";

// Traversal and submission.
pub const TRAVERSAL_FAILURE_FOUND: &str = "traversal_failure_found";
pub const SUBMIT_START: &str = "submit_start";
pub const SUBMIT_REJECTED: &str = "submit_rejected";
pub const SUBMIT_OK: &str = "submit_ok";
pub const SUBMIT_FAILED: &str = "submit_failed";
pub const SUBMIT_VALUE_UNAVAILABLE: &str = "submit_value_unavailable";

// Configuration.
pub const CONFIG_LOADED: &str = "config_loaded";
