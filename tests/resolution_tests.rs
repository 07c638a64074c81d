//! Tests for override resolution against the product variable schema

use prodvar::*;

fn product_schema() -> VariableSchema {
    VariableSchema::builder()
        .group("vendor-init-lib")
        .string_list("whole-static-libs", &[], Channel::Libraries)
        .group("shim-libs")
        .string_list("cppflags", &["-DDEFAULT_SHIM"], Channel::Flags)
        .group("surfaceflinger-fod-lib")
        .string("library", "", Channel::Libraries)
        .string_list("cflags", &[], Channel::Flags)
        .group("prebuilt-dynamic-partitions")
        .boolean(
            "cflags-enabled",
            false,
            Channel::Flags,
            &["-DPREBUILT_DYNAMIC_PARTITIONS"],
        )
        .build()
        .unwrap()
}

mod totality {
    use super::*;

    #[test]
    fn test_every_setting_resolves_without_overrides() {
        let schema = product_schema();
        let resolved = Resolver::new(&schema)
            .resolve(&OverrideConfig::empty())
            .unwrap();

        assert_eq!(resolved.len(), schema.setting_count());
    }

    #[test]
    fn test_every_setting_resolves_with_partial_overrides() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .string("surfaceflinger-fod-lib", "library", "libfod")
            .build();

        let resolved = Resolver::new(&schema).resolve(&overrides).unwrap();
        assert_eq!(resolved.len(), schema.setting_count());
        assert_eq!(
            resolved.string("surfaceflinger-fod-lib", "library").unwrap(),
            "libfod"
        );
        // Untouched settings resolve to their declared defaults.
        assert_eq!(
            resolved.string_list("shim-libs", "cppflags").unwrap(),
            &["-DDEFAULT_SHIM".to_string()]
        );
    }
}

mod precedence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_supplied_values_win_over_defaults() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .string_list("shim-libs", "cppflags", &["-DVENDOR_SHIM"])
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled", true)
            .build();

        let resolved = Resolver::new(&schema).resolve(&overrides).unwrap();
        assert_eq!(
            resolved.string_list("shim-libs", "cppflags").unwrap(),
            &["-DVENDOR_SHIM".to_string()]
        );
        assert!(resolved
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled")
            .unwrap());
    }

    #[test]
    fn test_zero_values_still_win() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .string_list("shim-libs", "cppflags", &[])
            .string("surfaceflinger-fod-lib", "library", "")
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled", false)
            .build();

        let resolved = Resolver::new(&schema).resolve(&overrides).unwrap();
        assert!(resolved
            .string_list("shim-libs", "cppflags")
            .unwrap()
            .is_empty());
        assert_eq!(
            resolved.string("surfaceflinger-fod-lib", "library").unwrap(),
            ""
        );
        assert!(!resolved
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled")
            .unwrap());
    }
}

mod strictness {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_unknown_group_fails_whole_invocation() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .string_list("shim-libs", "cppflags", &["-DOK"])
            .boolean("typo-group", "cflags-enabled", true)
            .build();

        assert_matches!(
            Resolver::new(&schema).resolve(&overrides),
            Err(Error::UnknownGroup(g)) if g == "typo-group"
        );
    }

    #[test]
    fn test_unknown_setting_names_the_offender() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .boolean("shim-libs", "cppflag", true)
            .build();

        match Resolver::new(&schema).resolve(&overrides) {
            Err(Error::UnknownSetting { group, setting }) => {
                assert_eq!(group, "shim-libs");
                assert_eq!(setting, "cppflag");
            }
            other => panic!("expected UnknownSetting, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_wrong_kind_fails_whole_invocation() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .string("prebuilt-dynamic-partitions", "cflags-enabled", "yes")
            .build();

        assert_matches!(
            Resolver::new(&schema).resolve(&overrides),
            Err(Error::KindMismatch { expected, actual, .. })
                if expected == SettingKind::Bool && actual == SettingKind::String
        );
    }
}

mod round_trip {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides_resolve_identically_after_json_round_trip() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .string_list("vendor-init-lib", "whole-static-libs", &["libfoo"])
            .string_list("shim-libs", "cppflags", &[])
            .build();

        let restored = OverrideConfig::from_json(&overrides.to_json().unwrap()).unwrap();

        let resolver = Resolver::new(&schema);
        assert_eq!(
            resolver.resolve(&overrides).unwrap(),
            resolver.resolve(&restored).unwrap()
        );
    }

    #[test]
    fn test_overrides_resolve_identically_after_toml_round_trip() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .string("surfaceflinger-fod-lib", "library", "libfod")
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled", true)
            .build();

        let restored = OverrideConfig::from_toml(&overrides.to_toml().unwrap()).unwrap();

        let resolver = Resolver::new(&schema);
        assert_eq!(
            resolver.resolve(&overrides).unwrap(),
            resolver.resolve(&restored).unwrap()
        );
    }

    #[test]
    fn test_serialized_resolution_is_byte_identical() {
        let schema = product_schema();
        let overrides = OverrideConfig::builder()
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled", true)
            .string_list("vendor-init-lib", "whole-static-libs", &["libfoo"])
            .build();

        let resolver = Resolver::new(&schema);
        let first = resolver.resolve(&overrides).unwrap().to_json().unwrap();
        let second = resolver.resolve(&overrides).unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }
}
