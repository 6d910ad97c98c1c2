// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Instance Resolution
//!
//! Every validation failure is decided before the directory is queried, and
//! the exists/resolve asymmetry holds for any unmatched key.

use cim_metal_instances::domain::{DeviceKey, NodeAddressType, ACCEPTED_SCHEMES};
use cim_metal_instances::errors::ErrorKind;
use cim_metal_instances::service::CloudInstances;
use proptest::prelude::*;
use uuid::Uuid;

use crate::fixtures::*;

fn any_uuid() -> impl Strategy<Value = Uuid> {
    any::<[u8; 16]>()
        .prop_map(Uuid::from_bytes)
        .prop_filter("must not collide with a fixture device", |u| {
            ![ACTIVE_ID, INACTIVE_ID, UNKNOWN_STATE_ID, NO_METRO_ID]
                .iter()
                .any(|id| DeviceKey::from_uuid(*u) == key(id))
        })
}

fn accepted_scheme() -> impl Strategy<Value = &'static str> {
    prop::sample::select(ACCEPTED_SCHEMES.iter().map(|(s, _)| *s).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn prop_unsupported_scheme_never_reaches_directory(
        scheme in "[a-z]{2,10}".prop_filter("unsupported", |s| {
            !ACCEPTED_SCHEMES.iter().any(|(accepted, _)| *accepted == s.as_str())
        }),
        name in prop::sample::select(vec!["", ACTIVE_NAME, NODE_NAME]),
    ) {
        let resolver = resolver();
        let node = node(format!("{}://{}", scheme, ACTIVE_ID), name);

        let err = tokio_test::block_on(resolver.resolve(&node)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::UnsupportedScheme);
        prop_assert!(err.to_string().contains(&scheme));
        prop_assert_eq!(resolver.directory().total_queries(), 0);
    }

    #[test]
    fn prop_unmatched_key_exists_false_resolve_not_found(
        uuid in any_uuid(),
        scheme in accepted_scheme(),
    ) {
        let resolver = resolver();
        let node = node(format!("{}://{}", scheme, uuid.hyphenated()), ACTIVE_NAME);

        prop_assert_eq!(tokio_test::block_on(resolver.instance_exists(&node)).unwrap(), false);
        prop_assert_eq!(
            tokio_test::block_on(resolver.resolve(&node)).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        prop_assert_eq!(
            tokio_test::block_on(resolver.instance_shutdown(&node)).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn prop_override_address_follows_hostname(
        octets in any::<[u8; 4]>(),
        scheme in accepted_scheme(),
    ) {
        let resolver = resolver();
        let override_ip = format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3]);
        let node = node(format!("{}://{}", scheme, ACTIVE_ID), NODE_NAME)
            .with_override_address(override_ip.clone());

        let metadata = tokio_test::block_on(resolver.instance_metadata(&node)).unwrap();
        let addresses = metadata.node_addresses;

        prop_assert_eq!(addresses[0].address_type, NodeAddressType::Hostname);
        prop_assert_eq!(addresses[1].address_type, NodeAddressType::InternalIp);
        prop_assert_eq!(&addresses[1].address, &override_ip);
        prop_assert_eq!(&addresses[2].address, PRIVATE_IP);
        prop_assert_eq!(metadata.provider_id, current(ACTIVE_ID));
    }
}
