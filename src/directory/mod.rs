// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Directory Query Interface
//!
//! The resolver never talks to the provider directly; it asks a
//! [`DeviceDirectory`] for a device by key or by hostname.
//!
//! ```text
//! InstanceResolver ──find_by_key / find_by_name──> DeviceDirectory
//!                                                     │
//!                                   ┌─────────────────┴──────────────┐
//!                             InMemoryDirectory              MetalApiDirectory
//!                             (tests, embedding)             (feature = "api")
//! ```
//!
//! Implementations own transport concerns (timeouts, auth, pagination).
//! Absence is `Ok(None)`, never an error.

pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{DeviceKey, DeviceRecord};
use crate::errors::DirectoryResult;

pub use memory::InMemoryDirectory;

/// Read-only query capability over the device inventory
#[async_trait]
pub trait DeviceDirectory: Send + Sync {
    /// Look up a device by its key
    async fn find_by_key(&self, key: &DeviceKey) -> DirectoryResult<Option<DeviceRecord>>;

    /// Look up a device by exact hostname
    async fn find_by_name(&self, name: &str) -> DirectoryResult<Option<DeviceRecord>>;
}

#[async_trait]
impl<D: DeviceDirectory + ?Sized> DeviceDirectory for Arc<D> {
    async fn find_by_key(&self, key: &DeviceKey) -> DirectoryResult<Option<DeviceRecord>> {
        (**self).find_by_key(key).await
    }

    async fn find_by_name(&self, name: &str) -> DirectoryResult<Option<DeviceRecord>> {
        (**self).find_by_name(name).await
    }
}
