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

//! Canonical field values and value-format helpers.

use crate::validation::ValidationInfo;

pub const NONE: &str = "none";
pub const REASON_PANIC: &str = "panic";
pub const REASON_FAILED: &str = "failed";

/// Renders a validation result for log output; absent renders as `none`.
pub fn format_validation(info: &ValidationInfo) -> String {
    if info.is_error() {
        info.to_string()
    } else {
        NONE.to_string()
    }
}

/// Renders list keys as `[k0,k1,...]`.
pub fn format_keys<I>(keys: I) -> String
where
    I: IntoIterator<Item = u64>,
{
    let rendered: Vec<String> = keys.into_iter().map(|key| key.to_string()).collect();
    format!("[{}]", rendered.join(","))
}

/// Best-effort description of a caught panic payload.
pub fn format_panic_payload(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        REASON_PANIC.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{format_keys, format_panic_payload, format_validation};
    use crate::validation::ValidationInfo;

    #[test]
    fn keys_render_in_order() {
        assert_eq!(format_keys([2, 1, 0]), "[2,1,0]");
        assert_eq!(format_keys(Vec::new()), "[]");
    }

    #[test]
    fn absent_validation_renders_as_none() {
        assert_eq!(format_validation(&ValidationInfo::Absent), "none");
        assert_eq!(
            format_validation(&ValidationInfo::from(vec!["a", "b"])),
            "a,b"
        );
    }

    #[test]
    fn panic_payloads_are_described() {
        let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(format_panic_payload(payload.as_ref()), "boom");
    }
}
