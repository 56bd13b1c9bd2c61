use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document category a token is allowed to auto-sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppTag {
    /// Customs declarations
    Xhdo,
    /// Social-insurance filings
    Bhxh,
    /// Tax filings
    Thue,
    /// Anything else the service recognizes
    Khac,
}

impl AppTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppTag::Xhdo => "XHDO",
            AppTag::Bhxh => "BHXH",
            AppTag::Thue => "THUE",
            AppTag::Khac => "KHAC",
        }
    }
}

impl FromStr for AppTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XHDO" => Ok(AppTag::Xhdo),
            "BHXH" => Ok(AppTag::Bhxh),
            "THUE" => Ok(AppTag::Thue),
            "KHAC" => Ok(AppTag::Khac),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for AppTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth-style token forwarded verbatim to the signing service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub scope: String,
    pub token_type: String,
}

impl AccessToken {
    /// Every field must carry a usable value before the token is forwarded.
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty()
            && self.expires_in != 0
            && !self.refresh_token.is_empty()
            && !self.scope.is_empty()
            && !self.token_type.is_empty()
    }
}

/// Horizontal anchor for the PDF signature stamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StampAnchorX {
    Left,
    Right,
}

/// Vertical anchor for the PDF signature stamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StampAnchorY {
    Top,
    Bottom,
}

/// Optional PDF stamping configuration attached to signing requests.
///
/// Malformed options never fail credential validation; they are dropped
/// when the signing request is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PdfOptions {
    pub x: StampAnchorX,
    pub y: StampAnchorY,
    pub page: u32,
    pub opacity: f64,
    pub placement: String,
    pub image_content: String,
}

impl PdfOptions {
    /// Shape checks beyond what deserialization enforces.
    pub fn is_well_formed(&self) -> bool {
        self.page >= 1
            && (0.0..=1.0).contains(&self.opacity)
            && !self.placement.is_empty()
            && !self.image_content.is_empty()
    }
}

/// Raw shape of the persisted configuration blob.
///
/// `access_token` and `pdf_options` stay untyped here so an incomplete
/// access token or a malformed stamping block is reported under its own
/// category instead of as a decode failure.
#[derive(Debug, Deserialize)]
pub struct RawTokenConfig {
    pub token_serial: String,
    pub serial_number: String,
    pub pin: String,
    pub access_token: serde_json::Value,
    pub app: String,
    pub tax_ids: Vec<String>,
    #[serde(default)]
    pub pdf_options: Option<serde_json::Value>,
}

/// Validated signing credential, immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub name: String,
    pub api_ip_address: String,
    pub token_serial: String,
    pub serial_number: String,
    pub pin: String,
    pub access_token: AccessToken,
    pub apps: Vec<AppTag>,
    pub tax_ids: Vec<String>,
    pub pdf_options: Option<serde_json::Value>,
}

impl Credential {
    /// Stable identifier derived from the display name.
    pub fn slug(&self) -> String {
        self.name.replace(' ', "_").to_lowercase()
    }

    /// App tags joined for display, e.g. "XHDO, THUE".
    pub fn app_label(&self) -> String {
        self.apps
            .iter()
            .map(AppTag::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
