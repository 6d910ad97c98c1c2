// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance Resolution Service
//!
//! Turns a [`NodeDescriptor`] into the Metal device backing it and answers the
//! orchestrator's three per-node questions.
//!
//! # Lookup Precedence
//!
//! ```text
//! providerID set?  ── yes ──> parse ──> find_by_key ──> record | NotFound
//!       │                      │
//!       no                     └── invalid ──> InvalidIdentifier (no fallback)
//!       │
//! name set?        ── yes ──> find_by_name ──> record | NotFound
//!       │
//!       no ──> EmptyNodeName
//! ```
//!
//! A malformed or unmatched providerID is a hard failure; the name is only
//! consulted when no providerID was given.
//!
//! # Operation Semantics
//!
//! | Operation        | empty providerID     | unknown device | found                 |
//! |------------------|----------------------|----------------|-----------------------|
//! | `resolve`        | falls back to name   | `NotFound`     | record                |
//! | `exists`         | `EmptyIdentifier`    | `Ok(false)`    | `Ok(true)`            |
//! | `shutdown_state` | falls back to name   | `NotFound`     | `state == inactive`   |
//!
//! `exists` reports a missing device as `false` so the orchestrator can tell a
//! decommissioned node apart from a broken identifier.

use async_trait::async_trait;
use tracing::debug;

use crate::directory::DeviceDirectory;
use crate::domain::{DeviceKey, DeviceRecord, NodeDescriptor, ProviderId, ResolvedMetadata};
use crate::errors::{InstanceError, InstanceResult};
use crate::projection;

/// Orchestrator-facing instance contract
#[async_trait]
pub trait CloudInstances: Send + Sync {
    /// Addresses, instance type, topology and canonical providerID of a node
    async fn instance_metadata(&self, node: &NodeDescriptor) -> InstanceResult<ResolvedMetadata>;

    /// Whether the device behind the node's providerID still exists
    async fn instance_exists(&self, node: &NodeDescriptor) -> InstanceResult<bool>;

    /// Whether the device behind the node is powered off
    async fn instance_shutdown(&self, node: &NodeDescriptor) -> InstanceResult<bool>;
}

/// Resolves nodes against a device directory
///
/// Holds no mutable state; share it freely across tasks.
#[derive(Debug, Clone)]
pub struct InstanceResolver<D> {
    directory: D,
}

impl<D: DeviceDirectory> InstanceResolver<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Locate the device backing `node`
    pub async fn resolve(&self, node: &NodeDescriptor) -> InstanceResult<DeviceRecord> {
        self.lookup("resolve", node).await
    }

    /// Check whether the device referenced by the node's providerID exists
    ///
    /// Only the providerID is considered. A well-formed identifier with no
    /// matching device yields `Ok(false)`.
    pub async fn exists(&self, node: &NodeDescriptor) -> InstanceResult<bool> {
        let id = ProviderId::parse(&node.provider_id)?;
        let found = self.find_by_key("exists", id.key()).await?.is_some();

        debug!("Instance {} exists: {}", id, found);
        Ok(found)
    }

    /// Check whether the device backing `node` is shut down
    pub async fn shutdown_state(&self, node: &NodeDescriptor) -> InstanceResult<bool> {
        let device = self.lookup("shutdown_state", node).await?;
        let down = device.state.is_shut_down();

        debug!("Instance {} is {} (shut down: {})", device.id, device.state, down);
        Ok(down)
    }

    async fn lookup(
        &self,
        operation: &'static str,
        node: &NodeDescriptor,
    ) -> InstanceResult<DeviceRecord> {
        if node.has_provider_id() {
            let id = ProviderId::parse(&node.provider_id)?;
            if id.is_legacy() {
                debug!("Node {} uses legacy providerID {}", node.name, node.provider_id);
            }

            return self
                .find_by_key(operation, id.key())
                .await?
                .ok_or_else(|| InstanceError::NotFound {
                    lookup: format!("providerID {}", node.provider_id),
                });
        }

        if node.name.is_empty() {
            return Err(InstanceError::EmptyNodeName);
        }

        self.find_by_name(operation, &node.name)
            .await?
            .ok_or_else(|| InstanceError::NotFound {
                lookup: format!("node name {}", node.name),
            })
    }

    async fn find_by_key(
        &self,
        operation: &'static str,
        key: &DeviceKey,
    ) -> InstanceResult<Option<DeviceRecord>> {
        debug!("{}: querying directory for device {}", operation, key);

        self.directory
            .find_by_key(key)
            .await
            .map_err(|source| InstanceError::Directory {
                operation,
                target: format!("device {}", key),
                source,
            })
    }

    async fn find_by_name(
        &self,
        operation: &'static str,
        name: &str,
    ) -> InstanceResult<Option<DeviceRecord>> {
        debug!("{}: querying directory for hostname {}", operation, name);

        self.directory
            .find_by_name(name)
            .await
            .map_err(|source| InstanceError::Directory {
                operation,
                target: format!("hostname {}", name),
                source,
            })
    }
}

#[async_trait]
impl<D: DeviceDirectory> CloudInstances for InstanceResolver<D> {
    async fn instance_metadata(&self, node: &NodeDescriptor) -> InstanceResult<ResolvedMetadata> {
        let device = self.resolve(node).await?;
        let metadata = projection::project(&device, node);

        debug!(
            "Resolved node {} to {} ({} addresses, zone {}, region {})",
            node.name,
            metadata.provider_id,
            metadata.node_addresses.len(),
            metadata.zone,
            metadata.region
        );
        Ok(metadata)
    }

    async fn instance_exists(&self, node: &NodeDescriptor) -> InstanceResult<bool> {
        self.exists(node).await
    }

    async fn instance_shutdown(&self, node: &NodeDescriptor) -> InstanceResult<bool> {
        self.shutdown_state(node).await
    }
}
