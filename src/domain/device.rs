// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Record Domain Model
//!
//! Read-only snapshot of an Equinix Metal device as reported by the device
//! directory. The resolver holds a record only for the duration of one call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::provider_id::DeviceKey;

/// Device power/provisioning state
///
/// Closed set of the states the directory reports today. Anything else
/// deserializes to [`DeviceState::Unknown`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    Queued,
    Provisioning,
    Active,
    Inactive,
    PoweringOn,
    PoweringOff,
    Reinstalling,
    Deprovisioning,
    Failed,
    #[serde(other)]
    Unknown,
}

impl DeviceState {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Provisioning => "provisioning",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::PoweringOn => "powering_on",
            Self::PoweringOff => "powering_off",
            Self::Reinstalling => "reinstalling",
            Self::Deprovisioning => "deprovisioning",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    /// Map a raw directory state string; unrecognized values become `Unknown`
    pub fn from_api(state: &str) -> Self {
        match state {
            "queued" => Self::Queued,
            "provisioning" => Self::Provisioning,
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "powering_on" => Self::PoweringOn,
            "powering_off" => Self::PoweringOff,
            "reinstalling" => Self::Reinstalling,
            "deprovisioning" => Self::Deprovisioning,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Whether the device is powered off
    pub fn is_shut_down(&self) -> bool {
        matches!(self, Self::Inactive)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    V4,
    V6,
}

/// Whether an address is reachable from outside the provider network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressScope {
    Private,
    Public,
}

/// An address assigned to a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpAssignment {
    pub address: String,
    pub family: AddressFamily,
    pub scope: AddressScope,
}

impl IpAssignment {
    pub fn new(address: impl Into<String>, family: AddressFamily, scope: AddressScope) -> Self {
        Self {
            address: address.into(),
            family,
            scope,
        }
    }

    /// Private IPv4 address
    pub fn private_v4(address: impl Into<String>) -> Self {
        Self::new(address, AddressFamily::V4, AddressScope::Private)
    }

    /// Public IPv4 address
    pub fn public_v4(address: impl Into<String>) -> Self {
        Self::new(address, AddressFamily::V4, AddressScope::Public)
    }

    /// Public IPv6 address
    pub fn public_v6(address: impl Into<String>) -> Self {
        Self::new(address, AddressFamily::V6, AddressScope::Public)
    }

    /// Private IPv6 address
    pub fn private_v6(address: impl Into<String>) -> Self {
        Self::new(address, AddressFamily::V6, AddressScope::Private)
    }
}

/// Hardware plan
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plan {
    pub slug: String,
}

/// Metro area containing a facility
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metro {
    pub code: String,
}

/// Facility (data center) hosting a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Facility {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metro: Option<Metro>,
}

impl Facility {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            metro: None,
        }
    }

    pub fn with_metro(mut self, code: impl Into<String>) -> Self {
        self.metro = Some(Metro { code: code.into() });
        self
    }
}

/// Resolved device snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: DeviceKey,
    pub hostname: String,
    pub state: DeviceState,
    pub plan: Plan,
    /// Addresses in the order the directory returned them
    #[serde(default)]
    pub network_addresses: Vec<IpAssignment>,
    pub facility: Facility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DeviceRecord {
    /// Create a record with no addresses in the given state
    pub fn new(
        id: DeviceKey,
        hostname: impl Into<String>,
        state: DeviceState,
        plan_slug: impl Into<String>,
        facility: Facility,
    ) -> Self {
        Self {
            id,
            hostname: hostname.into(),
            state,
            plan: Plan {
                slug: plan_slug.into(),
            },
            network_addresses: Vec::new(),
            facility,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_addresses(mut self, addresses: Vec<IpAssignment>) -> Self {
        self.network_addresses = addresses;
        self
    }
}
