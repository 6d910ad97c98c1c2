// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance Domain Models
//!
//! Value objects and records that flow through instance resolution.
//!
//! # Value Objects with Invariants
//!
//! - [`DeviceKey`] - canonical hyphenated UUID of a Metal device
//! - [`ProviderId`] - scheme-prefixed node `providerID`, current or legacy
//!
//! # Records
//!
//! - [`NodeDescriptor`] - orchestrator input (name, providerID, override address)
//! - [`DeviceRecord`] - directory snapshot of one device
//! - [`ResolvedMetadata`] - addresses, instance type and topology reported back

pub mod device;
pub mod node;
pub mod provider_id;

pub use device::{
    AddressFamily, AddressScope, DeviceRecord, DeviceState, Facility, IpAssignment, Metro, Plan,
};
pub use node::{
    NodeAddress, NodeAddressType, NodeDescriptor, ResolvedMetadata, PROVIDED_NODE_IP_ANNOTATION,
};
pub use provider_id::{
    DeviceKey, ProviderId, ProviderIdError, ACCEPTED_SCHEMES, CURRENT_SCHEME, SCHEME_SEPARATOR,
};
