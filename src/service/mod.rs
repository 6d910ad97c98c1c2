// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Instance Resolution
//!
//! # Architecture
//!
//! ```text
//! Orchestrator (per node, on a polling interval)
//!     ↓
//! CloudInstances (this module)
//!     ↓
//! InstanceResolver → ProviderId::parse → DeviceDirectory
//!     ↓
//! projection::project → ResolvedMetadata
//! ```
//!
//! # Example
//!
//! ```rust
//! use cim_metal_instances::directory::InMemoryDirectory;
//! use cim_metal_instances::domain::NodeDescriptor;
//! use cim_metal_instances::service::{CloudInstances, InstanceResolver};
//!
//! # tokio_test::block_on(async {
//! let resolver = InstanceResolver::new(InMemoryDirectory::new());
//!
//! let node = NodeDescriptor::new("worker-1", "equinixmetal://6f8c5b7e-1d2a-4e8b-9c3d-0a1b2c3d4e5f");
//! assert_eq!(resolver.instance_exists(&node).await.unwrap(), false);
//! # });
//! ```

pub mod instances;

pub use instances::{CloudInstances, InstanceResolver};
