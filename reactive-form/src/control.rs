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

//! The contract shared by every control and the tree view used to walk it.

use crate::dom::DomHandle;
use crate::validation::ValidationInfo;
use futures::stream::BoxStream;
use std::fmt;

/// A node of a form: a value, its validation result and its metadata as
/// streams, plus an imperative `change`.
///
/// Controls are cheap handles; clones share state.
pub trait Control: Send + Sync + 'static {
    type Value: Clone + Send + Sync + 'static;
    type Meta: Clone + Send + Sync + 'static;

    /// Latest value first, then every later one.
    fn value(&self) -> BoxStream<'static, Self::Value>;

    /// Latest validation result first, then every later one.
    fn error(&self) -> BoxStream<'static, ValidationInfo>;

    fn metadata(&self) -> BoxStream<'static, Self::Meta>;

    fn change(&self, value: Self::Value);

    /// Shape of this control as seen by [`crate::validate_form_control`].
    ///
    /// Controls outside this crate are [`FormNode::Foreign`] and skipped.
    fn node(&self) -> FormNode {
        FormNode::Foreign
    }
}

/// A [`Control`] with its metadata type erased, so controls with different
/// metadata can sit side by side in one group.
pub trait AnyControl<V>: Send + Sync {
    fn dyn_value(&self) -> BoxStream<'static, V>;
    fn dyn_error(&self) -> BoxStream<'static, ValidationInfo>;
    fn dyn_change(&self, value: V);
    fn dyn_node(&self) -> FormNode;
}

impl<C: Control> AnyControl<C::Value> for C {
    fn dyn_value(&self) -> BoxStream<'static, C::Value> {
        self.value()
    }

    fn dyn_error(&self) -> BoxStream<'static, ValidationInfo> {
        self.error()
    }

    fn dyn_change(&self, value: C::Value) {
        self.change(value)
    }

    fn dyn_node(&self) -> FormNode {
        self.node()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    Leaf,
    Group,
    List,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Group => "group",
            Self::List => "list",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What traversal needs from one node.
pub struct NodeSnapshot {
    pub error: BoxStream<'static, ValidationInfo>,
    pub dom: Option<DomHandle>,
}

/// A control tree, taken at one point in time. List children are the ones
/// present when the snapshot was taken.
pub enum FormNode {
    Leaf(NodeSnapshot),
    Group(NodeSnapshot, Vec<FormNode>),
    List(NodeSnapshot, Vec<FormNode>),
    Foreign,
}

impl FormNode {
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Self::Leaf(_) => Some(NodeKind::Leaf),
            Self::Group(..) => Some(NodeKind::Group),
            Self::List(..) => Some(NodeKind::List),
            Self::Foreign => None,
        }
    }

    pub fn children(&self) -> &[FormNode] {
        match self {
            Self::Group(_, children) | Self::List(_, children) => children,
            Self::Leaf(_) | Self::Foreign => &[],
        }
    }
}

impl fmt::Debug for FormNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(_) => f.write_str("Leaf"),
            Self::Group(_, children) => f.debug_tuple("Group").field(children).finish(),
            Self::List(_, children) => f.debug_tuple("List").field(children).finish(),
            Self::Foreign => f.write_str("Foreign"),
        }
    }
}
