//! Equinix Metal instance resolution for the Composable Information Machine
//!
//! Resolves cluster nodes to the Metal devices backing them and reports node
//! addresses, instance type and topology back to the orchestrator.

pub mod adapters;
pub mod config;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod projection;
pub mod service;

// Re-export commonly used types
pub use config::{ConfigError, MetalConfig};
pub use directory::{DeviceDirectory, InMemoryDirectory};
pub use domain::{DeviceKey, DeviceRecord, NodeDescriptor, ProviderId, ResolvedMetadata};
pub use errors::{DirectoryError, DirectoryResult, ErrorKind, InstanceError, InstanceResult};
pub use service::{CloudInstances, InstanceResolver};
