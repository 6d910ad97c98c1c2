// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory device directory

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use super::DeviceDirectory;
use crate::domain::{DeviceKey, DeviceRecord, DeviceState};
use crate::errors::{DirectoryError, DirectoryResult};

/// Device directory backed by a local list
///
/// Hostname lookups are exact and return the first match in insertion order.
/// A failure injected with [`fail_with`](Self::fail_with) is returned by every
/// query until [`clear_failure`](Self::clear_failure) is called.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    devices: RwLock<Vec<DeviceRecord>>,
    failure: RwLock<Option<DirectoryError>>,
    key_queries: AtomicUsize,
    name_queries: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with devices
    pub fn with_devices(devices: impl IntoIterator<Item = DeviceRecord>) -> Self {
        Self {
            devices: RwLock::new(devices.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Insert a device, replacing any existing record with the same key
    pub async fn insert(&self, device: DeviceRecord) {
        let mut devices = self.devices.write().await;
        match devices.iter_mut().find(|d| d.id == device.id) {
            Some(existing) => *existing = device,
            None => devices.push(device),
        }
    }

    /// Change a device's state; returns false if the key is unknown
    pub async fn update_state(&self, key: &DeviceKey, state: DeviceState) -> bool {
        let mut devices = self.devices.write().await;
        match devices.iter_mut().find(|d| &d.id == key) {
            Some(device) => {
                device.state = state;
                true
            }
            None => false,
        }
    }

    /// Remove a device; returns the removed record
    pub async fn remove(&self, key: &DeviceKey) -> Option<DeviceRecord> {
        let mut devices = self.devices.write().await;
        let index = devices.iter().position(|d| &d.id == key)?;
        Some(devices.remove(index))
    }

    /// Make every subsequent query fail with `error`
    pub async fn fail_with(&self, error: DirectoryError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    /// Number of `find_by_key` calls received
    pub fn key_queries(&self) -> usize {
        self.key_queries.load(Ordering::SeqCst)
    }

    /// Number of `find_by_name` calls received
    pub fn name_queries(&self) -> usize {
        self.name_queries.load(Ordering::SeqCst)
    }

    /// Total queries received
    pub fn total_queries(&self) -> usize {
        self.key_queries() + self.name_queries()
    }

    async fn injected_failure(&self) -> DirectoryResult<()> {
        match self.failure.read().await.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DeviceDirectory for InMemoryDirectory {
    async fn find_by_key(&self, key: &DeviceKey) -> DirectoryResult<Option<DeviceRecord>> {
        self.key_queries.fetch_add(1, Ordering::SeqCst);
        self.injected_failure().await?;

        let devices = self.devices.read().await;
        let found = devices.iter().find(|d| &d.id == key).cloned();
        debug!("In-memory lookup by key {}: found={}", key, found.is_some());
        Ok(found)
    }

    async fn find_by_name(&self, name: &str) -> DirectoryResult<Option<DeviceRecord>> {
        self.name_queries.fetch_add(1, Ordering::SeqCst);
        self.injected_failure().await?;

        let devices = self.devices.read().await;
        let found = devices.iter().find(|d| d.hostname == name).cloned();
        debug!("In-memory lookup by name {}: found={}", name, found.is_some());
        Ok(found)
    }
}
