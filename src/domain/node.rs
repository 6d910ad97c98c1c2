// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Descriptor and Resolved Metadata

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Annotation the kubelet sets when started with `--node-ip`
pub const PROVIDED_NODE_IP_ANNOTATION: &str = "alpha.kubernetes.io/provided-node-ip";

/// The orchestrator's view of a node before resolution
///
/// # Examples
///
/// ```rust
/// use cim_metal_instances::domain::NodeDescriptor;
///
/// let node = NodeDescriptor::new("worker-1", "equinixmetal://6f8c5b7e-1d2a-4e8b-9c3d-0a1b2c3d4e5f")
///     .with_override_address("10.0.0.42");
/// assert!(node.has_provider_id());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    #[serde(default)]
    pub provider_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_address: Option<String>,
}

impl NodeDescriptor {
    pub fn new(name: impl Into<String>, provider_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider_id: provider_id.into(),
            override_address: None,
        }
    }

    /// Build from node name, providerID and the node's annotations
    pub fn from_annotations(
        name: impl Into<String>,
        provider_id: impl Into<String>,
        annotations: &HashMap<String, String>,
    ) -> Self {
        let override_address = annotations
            .get(PROVIDED_NODE_IP_ANNOTATION)
            .filter(|ip| !ip.is_empty())
            .cloned();

        Self {
            name: name.into(),
            provider_id: provider_id.into(),
            override_address,
        }
    }

    pub fn with_override_address(mut self, address: impl Into<String>) -> Self {
        self.override_address = Some(address.into());
        self
    }

    pub fn has_provider_id(&self) -> bool {
        !self.provider_id.is_empty()
    }
}

/// Node address type, named as the orchestrator names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeAddressType {
    Hostname,
    #[serde(rename = "InternalIP")]
    InternalIp,
    #[serde(rename = "ExternalIP")]
    ExternalIp,
}

impl fmt::Display for NodeAddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hostname => "Hostname",
            Self::InternalIp => "InternalIP",
            Self::ExternalIp => "ExternalIP",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
    #[serde(rename = "type")]
    pub address_type: NodeAddressType,
    pub address: String,
}

impl NodeAddress {
    pub fn hostname(address: impl Into<String>) -> Self {
        Self {
            address_type: NodeAddressType::Hostname,
            address: address.into(),
        }
    }

    pub fn internal_ip(address: impl Into<String>) -> Self {
        Self {
            address_type: NodeAddressType::InternalIp,
            address: address.into(),
        }
    }

    pub fn external_ip(address: impl Into<String>) -> Self {
        Self {
            address_type: NodeAddressType::ExternalIp,
            address: address.into(),
        }
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address_type, self.address)
    }
}

/// Metadata reported back to the orchestrator for one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    pub provider_id: String,
    pub instance_type: String,
    pub node_addresses: Vec<NodeAddress>,
    pub zone: String,
    pub region: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_annotations() {
        let mut annotations = HashMap::new();
        annotations.insert(
            PROVIDED_NODE_IP_ANNOTATION.to_string(),
            "10.0.0.42".to_string(),
        );

        let node = NodeDescriptor::from_annotations("worker-1", "", &annotations);
        assert_eq!(node.override_address.as_deref(), Some("10.0.0.42"));
        assert!(!node.has_provider_id());
    }

    #[test]
    fn test_empty_annotation_is_absent() {
        let mut annotations = HashMap::new();
        annotations.insert(PROVIDED_NODE_IP_ANNOTATION.to_string(), String::new());

        let node = NodeDescriptor::from_annotations("worker-1", "", &annotations);
        assert_eq!(node.override_address, None);
    }

    #[test]
    fn test_metadata_serialization() {
        let metadata = ResolvedMetadata {
            provider_id: "equinixmetal://6f8c5b7e-1d2a-4e8b-9c3d-0a1b2c3d4e5f".to_string(),
            instance_type: "c3.small.x86".to_string(),
            node_addresses: vec![
                NodeAddress::hostname("node-a"),
                NodeAddress::internal_ip("10.0.0.5"),
            ],
            zone: "ams1".to_string(),
            region: "am".to_string(),
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["instanceType"], "c3.small.x86");
        assert_eq!(json["nodeAddresses"][1]["type"], "InternalIP");
        assert_eq!(json["nodeAddresses"][0]["address"], "node-a");
    }

    #[test]
    fn test_address_display() {
        assert_eq!(NodeAddress::external_ip("203.0.113.9").to_string(), "ExternalIP:203.0.113.9");
    }
}
