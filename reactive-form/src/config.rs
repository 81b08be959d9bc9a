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

use crate::error::FormError;
use crate::observability::events;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const COMPONENT: &str = "config";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
    Instant,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScrollLogicalPosition {
    Start,
    #[default]
    Center,
    End,
    Nearest,
}

/// How a failing element is scrolled into view.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollLogicalPosition,
    pub inline: ScrollLogicalPosition,
}

/// Submission behaviour read from a json5 file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SubmitConfig {
    #[serde(default)]
    pub scroll: ScrollIntoViewOptions,
    #[serde(default = "default_focus_first_input")]
    pub focus_first_input: bool,
}

fn default_focus_first_input() -> bool {
    true
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollIntoViewOptions::default(),
            focus_first_input: default_focus_first_input(),
        }
    }
}

impl SubmitConfig {
    pub fn from_json5_str(contents: &str) -> Result<Self, FormError> {
        Ok(json5::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| FormError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json5_str(&contents)?;
        info!(
            event = events::CONFIG_LOADED,
            component = COMPONENT,
            path = %path.display(),
            "loaded submit config"
        );
        Ok(config)
    }
}
