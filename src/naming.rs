//! Entity name resolution for override configuration screens.
//!
//! Labels are presentation only; nothing here feeds an authorization decision.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{EntityType, GroupPermissionOverride, OverrideScope};
use crate::snapshot::NameDirectory;

/// Looks up display labels in the resource stores.
#[async_trait]
pub trait EntityNameResolver: Send + Sync {
    /// One entry per id, in input order; `None` when the entity no longer exists.
    async fn resolve_names(&self, entity_type: EntityType, ids: &[String]) -> Vec<Option<String>>;
}

/// Resolver backed by a fixed directory of labels.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNameResolver {
    directory: NameDirectory,
}

impl InMemoryNameResolver {
    pub fn new(directory: NameDirectory) -> Self {
        Self { directory }
    }

    pub fn with_name(mut self, entity_type: EntityType, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.directory
            .entry(entity_type)
            .or_default()
            .insert(id.into(), label.into());
        self
    }
}

#[async_trait]
impl EntityNameResolver for InMemoryNameResolver {
    async fn resolve_names(&self, entity_type: EntityType, ids: &[String]) -> Vec<Option<String>> {
        let labels = self.directory.get(&entity_type);
        ids.iter()
            .map(|id| labels.and_then(|labels| labels.get(id)).cloned())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TargetLabel {
    pub id: String,
    pub label: String,
}

/// What an override points at, split into live and stale ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct OverrideTargets {
    pub labels: Vec<TargetLabel>,
    /// Ids whose entity no longer exists. Callers may offer to prune them.
    pub orphaned_ids: Vec<String>,
}

pub async fn describe_override(
    resolver: &dyn EntityNameResolver,
    override_rule: &GroupPermissionOverride,
) -> OverrideTargets {
    if override_rule.scope == OverrideScope::All || override_rule.specific_entity_ids.is_empty() {
        return OverrideTargets::default();
    }

    let ids = &override_rule.specific_entity_ids;
    let names = resolver.resolve_names(override_rule.entity_type, ids).await;

    let mut targets = OverrideTargets::default();
    for (index, id) in ids.iter().enumerate() {
        match names.get(index).cloned().flatten() {
            Some(label) => targets.labels.push(TargetLabel {
                id: id.clone(),
                label,
            }),
            None => targets.orphaned_ids.push(id.clone()),
        }
    }

    if !targets.orphaned_ids.is_empty() {
        tracing::warn!(
            override_id = %override_rule.id,
            entity_type = %override_rule.entity_type,
            orphaned = ?targets.orphaned_ids,
            "override references missing entities"
        );
    }

    targets
}

/// Copy of `override_rule` without the given ids. Never applied automatically.
pub fn prune_orphans(override_rule: &GroupPermissionOverride, orphaned_ids: &[String]) -> GroupPermissionOverride {
    let mut pruned = override_rule.clone();
    pruned
        .specific_entity_ids
        .retain(|id| !orphaned_ids.contains(id));
    pruned
}
