// Copyright (c) 2025 - Cowboy AI, Inc.

//! Equinix Metal API Device Directory
//!
//! Read-only [`DeviceDirectory`] over the Equinix Metal REST API.
//!
//! ```text
//! find_by_key(k)   = GET /devices/{k}?include=facility.metro,plan
//! find_by_name(n)  = GET /projects/{project}/devices?hostname={n}&page={p}
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_metal_instances::adapters::MetalApiDirectory;
//! use cim_metal_instances::config::MetalConfig;
//! use cim_metal_instances::service::{CloudInstances, InstanceResolver};
//! use cim_metal_instances::domain::NodeDescriptor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = MetalApiDirectory::new(MetalConfig::from_env()?)?;
//!     let resolver = InstanceResolver::new(directory);
//!
//!     let node = NodeDescriptor::new("worker-1", "");
//!     let metadata = resolver.instance_metadata(&node).await?;
//!     println!("{:?}", metadata);
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MetalConfig;
use crate::directory::DeviceDirectory;
use crate::domain::{
    AddressFamily, AddressScope, DeviceKey, DeviceRecord, DeviceState, Facility, IpAssignment,
    Metro, Plan,
};
use crate::errors::{DirectoryError, DirectoryResult};

const DEVICE_INCLUDES: &str = "facility.metro,plan";
const PAGE_SIZE: u32 = 100;
const MAX_PAGES: u32 = 50;

/// Metal API device representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalDevice {
    pub id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub plan: Option<MetalPlan>,
    #[serde(default)]
    pub facility: Option<MetalFacility>,
    #[serde(default)]
    pub metro: Option<MetalMetro>,
    #[serde(default)]
    pub ip_addresses: Vec<MetalIpAddress>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalPlan {
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalFacility {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub metro: Option<MetalMetro>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalMetro {
    #[serde(default)]
    pub code: String,
}

/// Metal API IP assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalIpAddress {
    pub address: String,
    pub address_family: u8,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub management: bool,
}

/// Paged device listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalDeviceList {
    #[serde(default)]
    pub devices: Vec<MetalDevice>,
    #[serde(default)]
    pub meta: Option<MetalMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalMeta {
    #[serde(default)]
    pub next: Option<serde_json::Value>,
}

impl TryFrom<MetalDevice> for DeviceRecord {
    type Error = DirectoryError;

    fn try_from(device: MetalDevice) -> Result<Self, Self::Error> {
        let id = DeviceKey::new(&device.id)
            .map_err(|e| DirectoryError::Decode(format!("device id: {}", e)))?;

        let state = DeviceState::from_api(&device.state);
        if state == DeviceState::Unknown {
            warn!("Device {} reports unrecognized state {:?}", id, device.state);
        }

        // The facility's metro is authoritative; older responses only carry
        // it on the device.
        let (code, facility_metro) = device
            .facility
            .map(|facility| (facility.code, facility.metro))
            .unwrap_or_default();
        let facility = Facility {
            code,
            metro: facility_metro
                .or(device.metro)
                .map(|metro| Metro { code: metro.code }),
        };

        let network_addresses = device
            .ip_addresses
            .into_iter()
            .filter_map(|ip| {
                let family = match ip.address_family {
                    4 => AddressFamily::V4,
                    6 => AddressFamily::V6,
                    other => {
                        warn!("Skipping address {} with family {}", ip.address, other);
                        return None;
                    }
                };
                let scope = if ip.public {
                    AddressScope::Public
                } else {
                    AddressScope::Private
                };
                Some(IpAssignment::new(ip.address, family, scope))
            })
            .collect();

        Ok(DeviceRecord {
            id,
            hostname: device.hostname,
            state,
            plan: Plan {
                slug: device.plan.map(|plan| plan.slug).unwrap_or_default(),
            },
            network_addresses,
            facility,
            created_at: device.created_at,
            updated_at: device.updated_at,
        })
    }
}

/// Device directory backed by the Metal API
pub struct MetalApiDirectory {
    config: MetalConfig,
    client: Client,
}

impl MetalApiDirectory {
    /// Create a new API directory
    pub fn new(config: MetalConfig) -> DirectoryResult<Self> {
        info!("Using Equinix Metal API at {}", config.base_url());

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    "X-Auth-Token",
                    config.auth_token.parse().map_err(|e| {
                        DirectoryError::Transport(format!("Invalid API token: {}", e))
                    })?,
                );
                headers.insert(
                    "Accept",
                    "application/json".parse().map_err(|e| {
                        DirectoryError::Transport(format!("Invalid header: {}", e))
                    })?,
                );
                headers
            })
            .build()
            .map_err(|e| {
                DirectoryError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &MetalConfig {
        &self.config
    }

    fn device_url(&self, key: &DeviceKey) -> String {
        format!(
            "{}/devices/{}?include={}",
            self.config.base_url(),
            key,
            DEVICE_INCLUDES
        )
    }

    fn project_devices_url(&self, name: &str, page: u32) -> String {
        format!(
            "{}/projects/{}/devices?hostname={}&include={}&per_page={}&page={}",
            self.config.base_url(),
            urlencoding::encode(&self.config.project_id),
            urlencoding::encode(name),
            DEVICE_INCLUDES,
            PAGE_SIZE,
            page
        )
    }

    async fn get(&self, url: &str) -> DirectoryResult<Option<reqwest::Response>> {
        let response = self.client.get(url).send().await.map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DirectoryError::Api {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

fn transport_error(err: reqwest::Error) -> DirectoryError {
    if err.is_timeout() {
        DirectoryError::Timeout(err.to_string())
    } else if err.is_decode() {
        DirectoryError::Decode(err.to_string())
    } else {
        DirectoryError::Transport(err.to_string())
    }
}

#[async_trait]
impl DeviceDirectory for MetalApiDirectory {
    async fn find_by_key(&self, key: &DeviceKey) -> DirectoryResult<Option<DeviceRecord>> {
        let Some(response) = self.get(&self.device_url(key)).await? else {
            debug!("Metal API has no device {}", key);
            return Ok(None);
        };

        let device: MetalDevice = response.json().await.map_err(transport_error)?;
        DeviceRecord::try_from(device).map(Some)
    }

    async fn find_by_name(&self, name: &str) -> DirectoryResult<Option<DeviceRecord>> {
        let mut found: Option<MetalDevice> = None;
        let mut page = 1;

        loop {
            let Some(response) = self.get(&self.project_devices_url(name, page)).await? else {
                return Err(DirectoryError::Api {
                    status: StatusCode::NOT_FOUND.as_u16(),
                    body: format!("project {} not found", self.config.project_id),
                });
            };

            let list: MetalDeviceList = response.json().await.map_err(transport_error)?;
            let page_was_empty = list.devices.is_empty();
            let has_next = list
                .meta
                .as_ref()
                .and_then(|meta| meta.next.as_ref())
                .is_some_and(|next| !next.is_null());
            debug!(
                "Metal API page {} for hostname {}: {} devices",
                page,
                name,
                list.devices.len()
            );

            for device in list.devices.into_iter().filter(|d| d.hostname == name) {
                match &found {
                    Some(first) => warn!(
                        "Hostname {} matches devices {} and {}, using {}",
                        name, first.id, device.id, first.id
                    ),
                    None => found = Some(device),
                }
            }

            if !has_next || page_was_empty {
                break;
            }
            if page >= MAX_PAGES {
                return Err(DirectoryError::Decode(format!(
                    "device listing for hostname {} did not end after {} pages",
                    name, MAX_PAGES
                )));
            }
            page += 1;
        }

        found.map(DeviceRecord::try_from).transpose()
    }
}
