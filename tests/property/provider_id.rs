// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for providerID Parsing

use cim_metal_instances::domain::{
    DeviceKey, ProviderId, ProviderIdError, ACCEPTED_SCHEMES, CURRENT_SCHEME,
};
use proptest::prelude::*;
use uuid::Uuid;

// ============================================================================
// Strategies
// ============================================================================

fn any_uuid() -> impl Strategy<Value = Uuid> {
    any::<[u8; 16]>().prop_map(Uuid::from_bytes)
}

fn accepted_scheme() -> impl Strategy<Value = &'static str> {
    prop::sample::select(ACCEPTED_SCHEMES.iter().map(|(s, _)| *s).collect::<Vec<_>>())
}

fn unsupported_scheme() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9+.-]{0,15}".prop_filter("scheme must not be accepted", |s| {
        !ACCEPTED_SCHEMES.iter().any(|(accepted, _)| *accepted == s.as_str())
    })
}

/// Text that can never be a hyphenated UUID
fn non_uuid_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,35}",
        "[a-zA-Z0-9-]{37,48}",
        "[g-z]{36}",
        any_uuid().prop_map(|u| u.simple().to_string()),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_accepted_schemes_yield_same_key(uuid in any_uuid(), scheme in accepted_scheme()) {
        let raw = format!("{}://{}", scheme, uuid.hyphenated());
        let id = ProviderId::parse(&raw).unwrap();

        prop_assert_eq!(id.key(), &DeviceKey::from_uuid(uuid));
        prop_assert_eq!(id.scheme(), Some(scheme));
        prop_assert_eq!(id.canonical(), format!("{}://{}", CURRENT_SCHEME, uuid.hyphenated()));
    }

    #[test]
    fn prop_bare_key_equals_prefixed_key(uuid in any_uuid()) {
        let bare = ProviderId::parse(&uuid.hyphenated().to_string()).unwrap();
        let prefixed = ProviderId::parse(&format!("equinixmetal://{}", uuid.hyphenated())).unwrap();

        prop_assert_eq!(bare.key(), prefixed.key());
        prop_assert_eq!(bare.canonical(), prefixed.canonical());
    }

    #[test]
    fn prop_key_case_insensitive(uuid in any_uuid()) {
        let upper = uuid.hyphenated().to_string().to_uppercase();
        let key = DeviceKey::new(&upper).unwrap();

        prop_assert_eq!(key.to_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn prop_unsupported_scheme_rejected(scheme in unsupported_scheme(), uuid in any_uuid()) {
        let raw = format!("{}://{}", scheme, uuid.hyphenated());

        prop_assert_eq!(
            ProviderId::parse(&raw),
            Err(ProviderIdError::UnsupportedScheme { scheme: scheme.clone() })
        );
    }

    #[test]
    fn prop_malformed_key_rejected(scheme in accepted_scheme(), key in non_uuid_key()) {
        let raw = format!("{}://{}", scheme, key);

        prop_assert_eq!(
            ProviderId::parse(&raw),
            Err(ProviderIdError::MalformedKey { key: key.clone() })
        );
    }

    #[test]
    fn prop_parse_never_panics(raw in ".*") {
        let _ = ProviderId::parse(&raw);
    }
}
