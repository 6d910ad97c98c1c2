// Copyright (c) 2025 - Cowboy AI, Inc.
//! Metal Instance Resolver
//!
//! Resolves one node against the Equinix Metal API and prints its metadata,
//! existence and shutdown state.
//!
//! Run with: cargo run --bin metal-resolve --features api
//!
//! Prerequisites:
//! 1. METAL_API_KEY and METAL_PROJECT_ID set
//! 2. NODE_NAME and/or NODE_PROVIDER_ID set to the node to resolve
//! 3. Optionally NODE_IP for the kubelet-provided node address

use anyhow::{Context, Result};
use cim_metal_instances::{
    adapters::MetalApiDirectory,
    config::MetalConfig,
    domain::NodeDescriptor,
    service::{CloudInstances, InstanceResolver},
};
use tracing::{info, warn};

/// Read the node to resolve from environment variables
fn node_from_env() -> NodeDescriptor {
    let name = std::env::var("NODE_NAME").unwrap_or_default();
    let provider_id = std::env::var("NODE_PROVIDER_ID").unwrap_or_default();

    let node = NodeDescriptor::new(name, provider_id);
    match std::env::var("NODE_IP") {
        Ok(ip) if !ip.is_empty() => node.with_override_address(ip),
        _ => node,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = MetalConfig::from_env().context("Failed to load Metal configuration")?;
    info!("Configuration loaded:");
    info!("  - API URL: {}", config.base_url());
    info!("  - Project: {}", config.project_id);
    info!("  - Timeout: {}s", config.timeout_secs);

    let directory = MetalApiDirectory::new(config).context("Failed to create Metal API client")?;
    let resolver = InstanceResolver::new(directory);

    let node = node_from_env();
    info!(
        "Resolving node name={:?} providerID={:?}",
        node.name, node.provider_id
    );

    let metadata = resolver
        .instance_metadata(&node)
        .await
        .context("Failed to resolve instance metadata")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&metadata).context("Failed to encode metadata")?
    );

    // Existence and shutdown checks always go through the canonical providerID
    let canonical = NodeDescriptor::new(node.name.clone(), metadata.provider_id.clone());

    match resolver.instance_exists(&canonical).await {
        Ok(exists) => info!("Instance exists: {}", exists),
        Err(e) => warn!("Existence check failed: {}", e),
    }

    match resolver.instance_shutdown(&canonical).await {
        Ok(down) => info!("Instance shut down: {}", down),
        Err(e) => warn!("Shutdown check failed: {}", e),
    }

    Ok(())
}
