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

//! A fixed set of named child controls.

use crate::control::{AnyControl, Control, FormNode, NodeSnapshot};
use crate::dom::{DomHandle, DomSlot, HasRef};
use crate::metadata::Metadata;
use crate::observability::events;
use crate::options::CompositeOptions;
use crate::stream::{combine_latest, settle, switch_map, Barrier};
use crate::validation::{join_validation_info, run_validator, ValidationInfo, Validator};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "group";

/// Value of a group: each child's value under its field name.
pub type Fields<V> = BTreeMap<String, V>;

type Children<V> = Arc<[(String, Arc<dyn AnyControl<V>>)]>;

/// Collects the children of a [`GroupControl`] in field order.
pub struct GroupBuilder<V> {
    children: Vec<(String, Arc<dyn AnyControl<V>>)>,
}

impl<V> GroupBuilder<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Adds `control` under `name`. Registering a name twice keeps the later
    /// control in the earlier position.
    pub fn field<C>(mut self, name: impl Into<String>, control: C) -> Self
    where
        C: Control<Value = V>,
    {
        let name = name.into();
        let control: Arc<dyn AnyControl<V>> = Arc::new(control);
        match self.children.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => {
                warn!(
                    event = events::GROUP_FIELD_REPLACED,
                    component = COMPONENT,
                    field = name.as_str(),
                    "field registered twice, keeping the later control"
                );
                slot.1 = control;
            }
            None => self.children.push((name, control)),
        }
        self
    }

    pub fn build<M>(self, options: CompositeOptions<Fields<V>, M>) -> GroupControl<V, M>
    where
        M: Clone + Send + Sync + 'static,
    {
        GroupControl::from_children(self.children.into(), options)
    }
}

/// Combines a fixed set of named children into one control.
///
/// The value is emitted once per burst of child updates, after the burst
/// settles. The error joins every child's error with the result of the
/// group's own validator run against the group value. Both are combined
/// afresh for every subscriber, starting from the children's current state.
/// [`Control::change`] is a merge: only fields present in the argument are
/// forwarded, and unknown fields are ignored.
pub struct GroupControl<V, M = ()> {
    inner: Arc<GroupInner<V, M>>,
}

struct GroupInner<V, M> {
    children: Children<V>,
    validator: Option<Validator<Fields<V>>>,
    metadata: Metadata<M>,
    dom: DomSlot,
}

impl<V, M> Clone for GroupControl<V, M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V> GroupControl<V, ()>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn builder() -> GroupBuilder<V> {
        GroupBuilder {
            children: Vec::new(),
        }
    }
}

impl<V, M> GroupControl<V, M>
where
    V: Clone + Send + Sync + 'static,
    M: Clone + Send + Sync + 'static,
{
    fn from_children(children: Children<V>, options: CompositeOptions<Fields<V>, M>) -> Self {
        Self {
            inner: Arc::new(GroupInner {
                children,
                validator: options.validator,
                metadata: options.metadata,
                dom: DomSlot::default(),
            }),
        }
    }

    /// Field names in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.children.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.inner.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.children.is_empty()
    }
}

fn combine_fields<V>(children: &Children<V>) -> BoxStream<'static, Fields<V>>
where
    V: Clone + Send + Sync + 'static,
{
    let names: Vec<String> = children.iter().map(|(name, _)| name.clone()).collect();
    let values = children.iter().map(|(_, child)| child.dyn_value()).collect();
    settle(combine_latest(values), Barrier::Yield)
        .map(move |values| names.iter().cloned().zip(values).collect::<Fields<V>>())
        .boxed()
}

impl<V, M> Control for GroupControl<V, M>
where
    V: Clone + Send + Sync + 'static,
    M: Clone + Send + Sync + 'static,
{
    type Value = Fields<V>;
    type Meta = M;

    fn value(&self) -> BoxStream<'static, Fields<V>> {
        combine_fields(&self.inner.children)
    }

    fn error(&self) -> BoxStream<'static, ValidationInfo> {
        let children = &self.inner.children;
        let mut errors: Vec<BoxStream<'static, ValidationInfo>> =
            children.iter().map(|(_, child)| child.dyn_error()).collect();
        if let Some(validator) = self.inner.validator.clone() {
            errors.push(switch_map(
                combine_fields(children),
                move |value: Fields<V>| run_validator(&validator, &value),
                "group.validator",
            ));
        }
        settle(combine_latest(errors), Barrier::Timer)
            .map(join_validation_info)
            .boxed()
    }

    fn metadata(&self) -> BoxStream<'static, M> {
        self.inner.metadata.subscribe()
    }

    fn change(&self, value: Fields<V>) {
        let mut forwarded = 0usize;
        for (name, field_value) in value {
            match self.inner.children.iter().find(|(field, _)| *field == name) {
                Some((_, child)) => {
                    child.dyn_change(field_value);
                    forwarded += 1;
                }
                None => debug!(
                    event = events::GROUP_CHANGE_IGNORED_KEY,
                    component = COMPONENT,
                    field = name.as_str(),
                    "ignoring change for unknown field"
                ),
            }
        }
        debug!(
            event = events::GROUP_CHANGE,
            component = COMPONENT,
            forwarded,
            "group change forwarded to children"
        );
    }

    fn node(&self) -> FormNode {
        let children = self
            .inner
            .children
            .iter()
            .map(|(_, child)| child.dyn_node())
            .collect();
        FormNode::Group(
            NodeSnapshot {
                error: self.error(),
                dom: self.dom(),
            },
            children,
        )
    }
}

impl<V, M> HasRef for GroupControl<V, M> {
    fn dom(&self) -> Option<DomHandle> {
        self.inner.dom.get()
    }

    fn dom_ref(&self, element: Option<DomHandle>) {
        self.inner.dom.set(element);
    }
}

#[cfg(test)]
mod tests {
    use super::{Fields, GroupControl};
    use crate::control::{Control, FormNode};
    use crate::leaf::LeafControl;
    use crate::options::CompositeOptions;
    use crate::validation::ValidationInfo;
    use futures::StreamExt;

    fn fields(pairs: &[(&str, &str)]) -> Fields<String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn change_is_a_merge() {
        let a = LeafControl::new(String::new());
        let b = LeafControl::new(String::new());
        let group = GroupControl::builder()
            .field("a", a.clone())
            .field("b", b.clone())
            .build(CompositeOptions::new());

        group.change(fields(&[("a", "x")]));

        assert_eq!(group.value().next().await, Some(fields(&[("a", "x"), ("b", "")])));
        assert_eq!(b.current(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_fields_are_ignored() {
        let group = GroupControl::builder()
            .field("a", LeafControl::new(String::new()))
            .build(CompositeOptions::new());

        group.change(fields(&[("a", "1"), ("extra", "2")]));

        assert_eq!(group.value().next().await, Some(fields(&[("a", "1")])));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_group_emits_empty_value_and_no_error() {
        let group = GroupControl::<String>::builder().build(CompositeOptions::new());
        assert!(group.is_empty());
        assert_eq!(group.value().next().await, Some(Fields::new()));
        assert_eq!(group.error().next().await, Some(ValidationInfo::Absent));
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_field_keeps_later_control_in_place() {
        let group = GroupControl::builder()
            .field("a", LeafControl::new("first".to_string()))
            .field("b", LeafControl::new("b".to_string()))
            .field("a", LeafControl::new("second".to_string()))
            .build(CompositeOptions::new());

        assert_eq!(group.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            group.value().next().await,
            Some(fields(&[("a", "second"), ("b", "b")]))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn error_joins_children_then_own_validator() {
        let child = LeafControl::with_options(
            String::new(),
            crate::options::ControlOptions::new().with_validator(|value: &String| {
                ValidationInfo::from(value.is_empty().then_some("child required"))
            }),
        );
        let group = GroupControl::builder()
            .field("name", child)
            .build(CompositeOptions::new().with_validator(|_: &Fields<String>| {
                ValidationInfo::from("group rule")
            }));

        assert_eq!(
            group.error().next().await,
            Some(ValidationInfo::from(vec!["child required", "group rule"]))
        );
    }

    #[tokio::test]
    async fn node_lists_children_in_field_order() {
        let group = GroupControl::builder()
            .field("z", LeafControl::new(0u8))
            .field("a", LeafControl::new(0u8))
            .build(CompositeOptions::new());

        let node = group.node();
        assert!(matches!(node, FormNode::Group(..)));
        assert_eq!(node.children().len(), 2);
    }
}
