// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-metal-instances
//!
//! Deterministic devices and nodes for resolution tests. All UUIDs are fixed
//! constants so failures are reproducible.
#![allow(dead_code)]

use std::sync::Arc;

use cim_metal_instances::directory::InMemoryDirectory;
use cim_metal_instances::domain::{
    DeviceKey, DeviceRecord, DeviceState, Facility, IpAssignment, NodeDescriptor,
};
use cim_metal_instances::service::InstanceResolver;

// Fixed device keys
pub const ACTIVE_ID: &str = "01934f4a-1000-7000-8000-000000001000";
pub const INACTIVE_ID: &str = "01934f4a-1001-7000-8000-000000001001";
pub const UNKNOWN_STATE_ID: &str = "01934f4a-1002-7000-8000-000000001002";
pub const NO_METRO_ID: &str = "01934f4a-1003-7000-8000-000000001003";

/// Well-formed key with no device behind it
pub const RANDOM_ID: &str = "01934f4a-9999-7000-8000-000000009999";

pub const ACTIVE_NAME: &str = "node-a";
pub const INACTIVE_NAME: &str = "node-b";
pub const UNKNOWN_STATE_NAME: &str = "node-c";
pub const NO_METRO_NAME: &str = "node-d";

/// Node name with no device behind it
pub const NODE_NAME: &str = "thisdoesnotexist";

pub const PRIVATE_IP: &str = "10.0.0.5";
pub const PUBLIC_IP: &str = "203.0.113.9";
pub const PUBLIC_IPV6: &str = "2001:db8::9";
pub const KUBELET_NODE_IP: &str = "10.0.0.42";

pub const PLAN_SLUG: &str = "c3.small.x86";
pub const ZONE_CODE: &str = "ams1";
pub const REGION_CODE: &str = "am";

pub fn key(id: &str) -> DeviceKey {
    DeviceKey::new(id).expect("Invalid key in test fixture")
}

pub fn current(id: &str) -> String {
    format!("equinixmetal://{}", id)
}

pub fn legacy(id: &str) -> String {
    format!("packet://{}", id)
}

pub fn node(provider_id: impl Into<String>, name: &str) -> NodeDescriptor {
    NodeDescriptor::new(name, provider_id)
}

fn device(id: &str, hostname: &str, state: DeviceState) -> DeviceRecord {
    DeviceRecord::new(
        key(id),
        hostname,
        state,
        PLAN_SLUG,
        Facility::new(ZONE_CODE).with_metro(REGION_CODE),
    )
    .with_addresses(vec![
        IpAssignment::private_v4(PRIVATE_IP),
        IpAssignment::public_v4(PUBLIC_IP),
        IpAssignment::public_v6(PUBLIC_IPV6),
    ])
}

pub fn active_device() -> DeviceRecord {
    device(ACTIVE_ID, ACTIVE_NAME, DeviceState::Active)
}

pub fn inactive_device() -> DeviceRecord {
    device(INACTIVE_ID, INACTIVE_NAME, DeviceState::Inactive)
}

pub fn unknown_state_device() -> DeviceRecord {
    device(UNKNOWN_STATE_ID, UNKNOWN_STATE_NAME, DeviceState::Unknown)
}

pub fn no_metro_device() -> DeviceRecord {
    let mut device = device(NO_METRO_ID, NO_METRO_NAME, DeviceState::PoweringOff);
    device.facility = Facility::new("ewr1");
    device
}

pub fn directory() -> InMemoryDirectory {
    InMemoryDirectory::with_devices([
        active_device(),
        inactive_device(),
        unknown_state_device(),
        no_metro_device(),
    ])
}

pub fn resolver() -> InstanceResolver<InMemoryDirectory> {
    InstanceResolver::new(directory())
}

pub fn shared_resolver() -> Arc<InstanceResolver<Arc<InMemoryDirectory>>> {
    Arc::new(InstanceResolver::new(Arc::new(directory())))
}
