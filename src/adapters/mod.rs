// Copyright (c) 2025 - Cowboy AI, Inc.

//! Device directory adapter implementations
//!
//! Concrete implementations of the DeviceDirectory trait for remote
//! inventories.

#[cfg(feature = "api")]
pub mod metal_api;

#[cfg(feature = "api")]
pub use metal_api::{MetalApiDirectory, MetalDevice};
