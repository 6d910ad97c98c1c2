// Copyright (c) 2025 - Cowboy AI, Inc.

//! Metadata Projection - DeviceRecord → ResolvedMetadata
//!
//! Pure mapping from a directory snapshot (plus the node's override address)
//! to the metadata the orchestrator stores on the node object.
//!
//! # Address Ordering
//!
//! ```text
//! 1. Hostname      record.hostname
//! 2. InternalIP    node override address (if any)
//! 3. InternalIP    private IPv4, directory order  ┐ interleaved as the
//!    ExternalIP    public IPv4, directory order   ┘ directory returns them
//! ```
//!
//! IPv6 assignments are not reported as node addresses.
//!
//! # Topology
//!
//! - zone   = facility code
//! - region = facility metro code, or empty when no metro is attached

use crate::domain::{
    AddressFamily, AddressScope, DeviceRecord, IpAssignment, NodeAddress, NodeDescriptor,
    ResolvedMetadata,
};

/// Project a resolved device into node metadata
pub fn project(record: &DeviceRecord, node: &NodeDescriptor) -> ResolvedMetadata {
    ResolvedMetadata {
        provider_id: record.id.provider_id(),
        instance_type: record.plan.slug.clone(),
        node_addresses: node_addresses(record, node),
        zone: record.facility.code.clone(),
        region: region(record),
    }
}

/// Ordered node addresses for a device
pub fn node_addresses(record: &DeviceRecord, node: &NodeDescriptor) -> Vec<NodeAddress> {
    let mut addresses = vec![NodeAddress::hostname(record.hostname.as_str())];

    if let Some(address) = node.override_address.as_deref().filter(|a| !a.is_empty()) {
        addresses.push(NodeAddress::internal_ip(address));
    }

    addresses.extend(record.network_addresses.iter().filter_map(classify));
    addresses
}

fn classify(assignment: &IpAssignment) -> Option<NodeAddress> {
    match (assignment.family, assignment.scope) {
        (AddressFamily::V4, AddressScope::Private) => {
            Some(NodeAddress::internal_ip(assignment.address.as_str()))
        }
        (AddressFamily::V4, AddressScope::Public) => {
            Some(NodeAddress::external_ip(assignment.address.as_str()))
        }
        (AddressFamily::V6, _) => None,
    }
}

fn region(record: &DeviceRecord) -> String {
    record
        .facility
        .metro
        .as_ref()
        .map(|metro| metro.code.clone())
        .unwrap_or_default()
}
