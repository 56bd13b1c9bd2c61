use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Display name is too short")]
    InvalidName,

    #[error("Signing service address is not a valid IPv4 address")]
    InvalidIpAddress,

    #[error("Configuration blob is malformed: {0}")]
    InvalidConfig(String),

    #[error("Serial number is too short")]
    InvalidSerialNumber,

    #[error("Token serial is too short")]
    InvalidTokenSerial,

    #[error("PIN must be a numeric string of 6 to 9 digits")]
    InvalidPin,

    #[error("Access token is missing one or more required fields")]
    InvalidAccessToken,

    #[error("Unrecognized app tag: {0}")]
    InvalidApp(String),

    #[error("No valid tax identifier remains after normalization")]
    InvalidTaxList,

    #[error("Token serial is not known to the signing service")]
    SerialNotAvailable,

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
