//! Validation tests for the setup path
//!
//! These exercise the ordered checks end to end: which category fires
//! first, the length boundaries, and the pure tax-id normalization.

use proptest::prelude::*;
use signing_config::{validate_setup, ConfigError, normalize_tax_id};

const NAME: &str = "Office token";
const IP: &str = "127.0.0.1";

fn minimal_config() -> serde_json::Value {
    serde_json::json!({
        "token_serial": "ABCDE",
        "serial_number": "12345",
        "pin": "123456",
        "access_token": {
            "access_token": "x",
            "expires_in": 1,
            "refresh_token": "y",
            "scope": "z",
            "token_type": "bearer"
        },
        "app": "XHDO",
        "tax_ids": ["0123456789"]
    })
}

fn validate(config: &serde_json::Value) -> Result<signing_config::Credential, ConfigError> {
    validate_setup(NAME, IP, &config.to_string())
}

#[test]
fn minimal_well_formed_config_is_accepted() {
    let cred = validate(&minimal_config()).unwrap();
    assert_eq!(cred.token_serial, "ABCDE");
    assert_eq!(cred.serial_number, "12345");
    assert_eq!(cred.tax_ids, vec!["0123456789".to_string()]);
    assert_eq!(cred.slug(), "office_token");
}

#[test]
fn serials_are_normalized_to_uppercase() {
    let mut config = minimal_config();
    config["token_serial"] = "abc123x".into();
    config["serial_number"] = "xyz999".into();
    let cred = validate(&config).unwrap();
    assert_eq!(cred.token_serial, "ABC123X");
    assert_eq!(cred.serial_number, "XYZ999");
}

#[test]
fn short_name_is_rejected_before_anything_else() {
    let err = validate_setup("ab", IP, "not even json").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidName));
}

#[test]
fn bad_ip_address_is_rejected_before_the_blob_is_parsed() {
    let err = validate_setup(NAME, "999.0.0.1", "not even json").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidIpAddress));
}

#[test]
fn malformed_json_reports_invalid_config() {
    let err = validate_setup(NAME, IP, "{ nope").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConfig(_)));
}

#[test]
fn every_required_field_is_checked_for_presence() {
    for field in ["token_serial", "serial_number", "pin", "access_token", "app"] {
        let mut config = minimal_config();
        config.as_object_mut().unwrap().remove(field);
        let err = validate(&config).unwrap_err();
        match err {
            ConfigError::InvalidConfig(msg) => {
                assert!(msg.contains(field), "error for {field} was: {msg}")
            }
            other => panic!("dropping {field} gave {other:?}"),
        }
    }
}

#[test]
fn serial_number_bound_fires_before_token_serial() {
    let mut config = minimal_config();
    config["serial_number"] = "1234".into();
    config["token_serial"] = "ABCD".into();
    let err = validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSerialNumber));

    config["serial_number"] = "12345".into();
    let err = validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTokenSerial));
}

#[test]
fn pin_length_boundaries() {
    for (pin, ok) in [
        ("12345", false),
        ("123456", true),
        ("123456789", true),
        ("1234567890", false),
    ] {
        let mut config = minimal_config();
        config["pin"] = pin.into();
        let result = validate(&config);
        assert_eq!(result.is_ok(), ok, "pin {pin:?}");
        if !ok {
            assert!(matches!(result.unwrap_err(), ConfigError::InvalidPin));
        }
    }
}

#[test]
fn non_numeric_pin_is_rejected() {
    let mut config = minimal_config();
    config["pin"] = "12345a".into();
    assert!(matches!(
        validate(&config).unwrap_err(),
        ConfigError::InvalidPin
    ));
}

#[test]
fn incomplete_access_token_is_its_own_category() {
    let mut config = minimal_config();
    config["access_token"]["refresh_token"] = "".into();
    assert!(matches!(
        validate(&config).unwrap_err(),
        ConfigError::InvalidAccessToken
    ));

    let mut config = minimal_config();
    config["access_token"] = serde_json::json!({"access_token": "x"});
    assert!(matches!(
        validate(&config).unwrap_err(),
        ConfigError::InvalidAccessToken
    ));
}

#[test]
fn recognized_app_tags_pass_and_unknown_ones_fail() {
    let mut config = minimal_config();
    config["app"] = "XHDO;BHXH".into();
    assert!(validate(&config).is_ok());

    config["app"] = "XHDO;FOO".into();
    assert!(matches!(
        validate(&config).unwrap_err(),
        ConfigError::InvalidApp(tag) if tag == "FOO"
    ));
}

#[test]
fn tax_list_must_be_non_empty_after_filtering() {
    let mut config = minimal_config();
    config["tax_ids"] = serde_json::json!(["12-34", "abc"]);
    assert!(matches!(
        validate(&config).unwrap_err(),
        ConfigError::InvalidTaxList
    ));

    // One valid entry is enough; invalid ones are dropped silently.
    config["tax_ids"] = serde_json::json!(["12-34", "012-345-6789"]);
    let cred = validate(&config).unwrap();
    assert_eq!(cred.tax_ids, vec!["0123456789".to_string()]);
}

proptest! {
    #[test]
    fn normalization_only_ever_strips_hyphens(raw in "[0-9-]{0,24}") {
        if let Some(normalized) = normalize_tax_id(&raw) {
            let stripped = raw.replace('-', "");
            prop_assert_eq!(normalized.as_str(), stripped.as_str());
            prop_assert!((10..=16).contains(&normalized.len()));
            prop_assert!(normalized.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn pure_digit_strings_accepted_exactly_on_length(raw in "[0-9]{1,24}") {
        let accepted = normalize_tax_id(&raw).is_some();
        prop_assert_eq!(accepted, (10..=16).contains(&raw.len()));
    }
}
