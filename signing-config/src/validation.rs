use crate::credential::{AccessToken, AppTag, Credential, RawTokenConfig};
use crate::error::{ConfigError, Result};
use tracing::debug;

const MIN_NAME_LEN: usize = 3;
const MIN_SERIAL_LEN: usize = 5;
const PIN_LEN: std::ops::RangeInclusive<usize> = 6..=9;
const TAX_ID_LEN: std::ops::RangeInclusive<usize> = 10..=16;

/// Validate the setup input and build a [`Credential`].
///
/// Checks run in a fixed order and the first failure wins, so the caller
/// can map the error category straight onto the offending form field. No
/// partially populated credential ever escapes this function.
pub fn validate_setup(name: &str, api_ip_address: &str, raw_json: &str) -> Result<Credential> {
    if name.len() < MIN_NAME_LEN {
        return Err(ConfigError::InvalidName);
    }

    if !is_dotted_quad(api_ip_address) {
        return Err(ConfigError::InvalidIpAddress);
    }

    // Structured decode names the missing field in the error message.
    let raw: RawTokenConfig =
        serde_json::from_str(raw_json).map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;

    if raw.serial_number.len() < MIN_SERIAL_LEN {
        return Err(ConfigError::InvalidSerialNumber);
    }

    if raw.token_serial.len() < MIN_SERIAL_LEN {
        return Err(ConfigError::InvalidTokenSerial);
    }

    if !PIN_LEN.contains(&raw.pin.len()) || !raw.pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidPin);
    }

    let access_token: AccessToken = serde_json::from_value(raw.access_token)
        .ok()
        .filter(AccessToken::is_complete)
        .ok_or(ConfigError::InvalidAccessToken)?;

    let apps = parse_app_tags(&raw.app)?;

    let tax_ids: Vec<String> = raw
        .tax_ids
        .iter()
        .filter_map(|id| normalize_tax_id(id))
        .collect();
    if tax_ids.is_empty() {
        return Err(ConfigError::InvalidTaxList);
    }

    debug!(name, serial_number = %raw.serial_number, "setup input validated");

    Ok(Credential {
        name: name.to_string(),
        api_ip_address: api_ip_address.to_string(),
        token_serial: raw.token_serial.to_uppercase(),
        serial_number: raw.serial_number.to_uppercase(),
        pin: raw.pin,
        access_token,
        apps,
        tax_ids,
        pdf_options: raw.pdf_options,
    })
}

/// Normalize one taxpayer identifier.
///
/// Hyphens are stripped; the remainder must be purely numeric with a
/// length of 10 to 16 digits, otherwise the identifier is discarded.
pub fn normalize_tax_id(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| *c != '-').collect();
    if TAX_ID_LEN.contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

fn parse_app_tags(app: &str) -> Result<Vec<AppTag>> {
    app.split(';')
        .map(|tag| {
            tag.parse::<AppTag>()
                .map_err(ConfigError::InvalidApp)
        })
        .collect()
}

fn is_dotted_quad(address: &str) -> bool {
    let octets: Vec<&str> = address.split('.').collect();
    octets.len() == 4 && octets.iter().all(|o| o.parse::<u8>().is_ok())
}
