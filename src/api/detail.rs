//! Company Detail
//!
//! Result of a detail lookup by ICO.

use crate::api::xml::{self, date, flag, text};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Company record returned by a detail lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResult {
    /// National company identification number
    pub ico: String,

    /// Registered company name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Business activity description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,

    /// Industry classification code (CZ-NACE / SK NACE)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cz_nace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_form: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_type: Option<String>,

    /// Employee count band as reported by Finstat, e.g. "10-19"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<String>,

    /// Founding date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<NaiveDateTime>,

    /// Cancellation date, if the company was dissolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<NaiveDateTime>,

    /// Canonical Finstat page for the company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Set when the company appears in the insolvency register
    #[serde(default)]
    pub warning: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_url: Option<String>,
}

impl DetailResult {
    /// Parse a `<DetailResult>` XML document
    pub fn from_xml(body: &str) -> Result<Self> {
        let wire: DetailXml = xml::from_xml(body, "DetailResult")?;
        wire.into_result()
    }

    /// Whether the company has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct DetailXml {
    ico: Option<String>,
    name: Option<String>,
    street: Option<String>,
    street_number: Option<String>,
    zip_code: Option<String>,
    city: Option<String>,
    district: Option<String>,
    region: Option<String>,
    activity: Option<String>,
    #[serde(rename = "CZNACE")]
    cz_nace: Option<String>,
    legal_form: Option<String>,
    ownership_type: Option<String>,
    employee_count: Option<String>,
    created: Option<String>,
    cancelled: Option<String>,
    url: Option<String>,
    warning: Option<String>,
    warning_url: Option<String>,
}

impl DetailXml {
    fn into_result(self) -> Result<DetailResult> {
        Ok(DetailResult {
            ico: text(self.ico).unwrap_or_default(),
            name: text(self.name).unwrap_or_default(),
            street: text(self.street),
            street_number: text(self.street_number),
            zip_code: text(self.zip_code),
            city: text(self.city),
            district: text(self.district),
            region: text(self.region),
            activity: text(self.activity),
            cz_nace: text(self.cz_nace),
            legal_form: text(self.legal_form),
            ownership_type: text(self.ownership_type),
            employee_count: text(self.employee_count),
            created: date("Created", self.created)?,
            cancelled: date("Cancelled", self.cancelled)?,
            url: text(self.url),
            warning: flag("Warning", self.warning)?,
            warning_url: text(self.warning_url),
        })
    }
}
