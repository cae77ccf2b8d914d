//! Autocomplete Search
//!
//! Company name/ICO suggestions for a partial query.

use crate::api::xml::{self, flag, text};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Lightweight company entry in an autocomplete response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub ico: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub cancelled: bool,
}

/// Matching companies plus suggested search strings, both in server order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoCompleteResult {
    pub results: Vec<CompanySummary>,
    pub suggestions: Vec<String>,
}

impl AutoCompleteResult {
    /// Parse an `<AutoCompleteResult>` XML document
    pub fn from_xml(body: &str) -> Result<Self> {
        let wire: AutoCompleteXml = xml::from_xml(body, "AutoCompleteResult")?;

        let results = wire
            .results
            .map(|r| r.companies)
            .unwrap_or_default()
            .into_iter()
            .map(CompanyXml::into_summary)
            .collect::<Result<Vec<_>>>()?;

        let suggestions = wire
            .suggestions
            .map(|s| s.items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| text(Some(s)))
            .collect();

        Ok(Self {
            results,
            suggestions,
        })
    }

    /// True when neither companies nor suggestions were returned
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.suggestions.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct AutoCompleteXml {
    results: Option<CompanyListXml>,
    suggestions: Option<SuggestionListXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CompanyListXml {
    #[serde(rename = "Company")]
    companies: Vec<CompanyXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuggestionListXml {
    #[serde(rename = "string")]
    items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct CompanyXml {
    ico: Option<String>,
    name: Option<String>,
    city: Option<String>,
    cancelled: Option<String>,
}

impl CompanyXml {
    fn into_summary(self) -> Result<CompanySummary> {
        Ok(CompanySummary {
            ico: text(self.ico).unwrap_or_default(),
            name: text(self.name).unwrap_or_default(),
            city: text(self.city),
            cancelled: flag("Cancelled", self.cancelled)?,
        })
    }
}
