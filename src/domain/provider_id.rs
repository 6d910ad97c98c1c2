// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Identifier Value Objects
//!
//! A node's `spec.providerID` references the Equinix Metal device that backs it.
//! Two spellings are accepted:
//!
//! ```text
//! equinixmetal://<device-uuid>    current scheme
//! packet://<device-uuid>          legacy alias (pre-rename clusters)
//! <device-uuid>                   bare key
//! ```
//!
//! Whatever the caller supplied, outward-facing identifiers are always
//! rendered with the current scheme.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Current provider scheme
pub const CURRENT_SCHEME: &str = "equinixmetal";

/// Separator between scheme and device key
pub const SCHEME_SEPARATOR: &str = "://";

/// Accepted schemes, mapped to the canonical scheme they stand for.
///
/// Adding or retiring a scheme is a change to this table only.
pub const ACCEPTED_SCHEMES: &[(&str, &str)] = &[
    (CURRENT_SCHEME, CURRENT_SCHEME),
    ("packet", CURRENT_SCHEME),
];

/// Provider identifier validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderIdError {
    #[error("providerID cannot be empty")]
    Empty,

    #[error("provider name from providerID should be equinixmetal, got {scheme:?}")]
    UnsupportedScheme { scheme: String },

    #[error("{key} is not a valid UUID")]
    MalformedKey { key: String },
}

/// Device key value object
///
/// Invariants:
/// - Canonical hyphenated UUID (`8-4-4-4-12` hex digits)
/// - Accepted case-insensitively, always rendered lowercase
///
/// # Examples
///
/// ```rust
/// use cim_metal_instances::domain::DeviceKey;
///
/// let key = DeviceKey::new("6F8C5B7E-1D2A-4E8B-9C3D-0A1B2C3D4E5F").unwrap();
/// assert_eq!(key.to_string(), "6f8c5b7e-1d2a-4e8b-9c3d-0a1b2c3d4e5f");
///
/// assert!(DeviceKey::new("123").is_err());
/// assert!(DeviceKey::new("6f8c5b7e1d2a4e8b9c3d0a1b2c3d4e5f").is_err()); // not hyphenated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceKey(Uuid);

impl DeviceKey {
    /// Length of the canonical hyphenated form
    pub const HYPHENATED_LENGTH: usize = 36;

    /// Create a device key with validation
    pub fn new(key: impl AsRef<str>) -> Result<Self, ProviderIdError> {
        let key = key.as_ref();

        // uuid also accepts simple, braced and urn forms; only the hyphenated
        // form is exactly 36 characters long.
        if key.len() != Self::HYPHENATED_LENGTH {
            return Err(ProviderIdError::MalformedKey {
                key: key.to_string(),
            });
        }

        Uuid::try_parse(key)
            .map(Self)
            .map_err(|_| ProviderIdError::MalformedKey {
                key: key.to_string(),
            })
    }

    /// Wrap an already-parsed UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Canonical provider identifier for this device
    pub fn provider_id(&self) -> String {
        format!("{}{}{}", CURRENT_SCHEME, SCHEME_SEPARATOR, self)
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for DeviceKey {
    type Err = ProviderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceKey {
    type Error = ProviderIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceKey> for String {
    fn from(key: DeviceKey) -> Self {
        key.to_string()
    }
}

/// Parsed provider identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderId {
    scheme: Option<&'static str>,
    key: DeviceKey,
}

impl ProviderId {
    /// Parse a raw `spec.providerID` value
    ///
    /// # Errors
    /// - [`ProviderIdError::Empty`] for an empty string
    /// - [`ProviderIdError::UnsupportedScheme`] for a scheme missing from [`ACCEPTED_SCHEMES`]
    /// - [`ProviderIdError::MalformedKey`] when the key is not a hyphenated UUID
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cim_metal_instances::domain::ProviderId;
    ///
    /// let id = ProviderId::parse("packet://6f8c5b7e-1d2a-4e8b-9c3d-0a1b2c3d4e5f").unwrap();
    /// assert_eq!(id.scheme(), Some("packet"));
    /// assert_eq!(id.canonical(), "equinixmetal://6f8c5b7e-1d2a-4e8b-9c3d-0a1b2c3d4e5f");
    ///
    /// assert!(ProviderId::parse("aws://6f8c5b7e-1d2a-4e8b-9c3d-0a1b2c3d4e5f").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ProviderIdError> {
        if raw.is_empty() {
            return Err(ProviderIdError::Empty);
        }

        let Some((scheme, key)) = raw.split_once(SCHEME_SEPARATOR) else {
            return Ok(Self {
                scheme: None,
                key: DeviceKey::new(raw)?,
            });
        };

        let scheme = Self::lookup_scheme(scheme)?;

        Ok(Self {
            scheme: Some(scheme),
            key: DeviceKey::new(key)?,
        })
    }

    fn lookup_scheme(scheme: &str) -> Result<&'static str, ProviderIdError> {
        ACCEPTED_SCHEMES
            .iter()
            .find(|(accepted, _)| *accepted == scheme)
            .map(|(accepted, _)| *accepted)
            .ok_or_else(|| ProviderIdError::UnsupportedScheme {
                scheme: scheme.to_string(),
            })
    }

    /// Scheme as written by the caller (`None` for a bare key)
    pub fn scheme(&self) -> Option<&'static str> {
        self.scheme
    }

    /// Canonical scheme this identifier maps to
    pub fn canonical_scheme(&self) -> &'static str {
        self.scheme
            .and_then(|scheme| {
                ACCEPTED_SCHEMES
                    .iter()
                    .find(|(accepted, _)| *accepted == scheme)
                    .map(|(_, canonical)| *canonical)
            })
            .unwrap_or(CURRENT_SCHEME)
    }

    /// Whether the caller used a legacy alias
    pub fn is_legacy(&self) -> bool {
        self.scheme
            .map(|scheme| scheme != self.canonical_scheme())
            .unwrap_or(false)
    }

    /// The device key
    pub fn key(&self) -> &DeviceKey {
        &self.key
    }

    /// Consume into the device key
    pub fn into_key(self) -> DeviceKey {
        self.key
    }

    /// Render with the canonical scheme
    pub fn canonical(&self) -> String {
        format!("{}{}{}", self.canonical_scheme(), SCHEME_SEPARATOR, self.key)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl FromStr for ProviderId {
    type Err = ProviderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
