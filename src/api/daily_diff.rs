//! Daily Diffs
//!
//! Listing of the registry change files the service publishes each day.

use crate::api::xml::{self, date, number, text};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One published diff file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDiff {
    /// Name to pass to `download_daily_diff`
    pub file_name: String,

    /// Size in bytes
    pub file_size: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_date: Option<NaiveDateTime>,
}

/// Files available for download, in server order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDiffList {
    /// API schema version
    pub version: String,
    pub files: Vec<DailyDiff>,
}

impl DailyDiffList {
    /// Parse a `<DailyDiffList>` XML document
    pub fn from_xml(body: &str) -> Result<Self> {
        let wire: DailyDiffListXml = xml::from_xml(body, "DailyDiffList")?;

        let files = wire
            .files
            .map(|f| f.diffs)
            .unwrap_or_default()
            .into_iter()
            .map(DailyDiffXml::into_diff)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version: text(wire.version).unwrap_or_default(),
            files,
        })
    }

    /// Look up a file by name
    pub fn find(&self, file_name: &str) -> Option<&DailyDiff> {
        self.files.iter().find(|f| f.file_name == file_name)
    }

    /// The most recently generated file
    pub fn latest(&self) -> Option<&DailyDiff> {
        self.files
            .iter()
            .filter(|f| f.generated_date.is_some())
            .max_by_key(|f| f.generated_date)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct DailyDiffListXml {
    version: Option<String>,
    files: Option<FileListXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileListXml {
    #[serde(rename = "DailyDiff")]
    diffs: Vec<DailyDiffXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct DailyDiffXml {
    file_name: Option<String>,
    file_size: Option<String>,
    generated_date: Option<String>,
}

impl DailyDiffXml {
    fn into_diff(self) -> Result<DailyDiff> {
        Ok(DailyDiff {
            file_name: text(self.file_name).unwrap_or_default(),
            file_size: number("FileSize", self.file_size)?,
            generated_date: date("GeneratedDate", self.generated_date)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinstatError;
    use chrono::NaiveDate;

    const LIST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<DailyDiffList>
  <Version>1.2</Version>
  <Files>
    <DailyDiff>
      <FileName>diff_2024-01-14.zip</FileName>
      <FileSize>183422</FileSize>
      <GeneratedDate>2024-01-14T05:10:00</GeneratedDate>
    </DailyDiff>
    <DailyDiff>
      <FileName>diff_2024-01-15.zip</FileName>
      <FileSize>201877</FileSize>
      <GeneratedDate>2024-01-15T05:12:31.437</GeneratedDate>
    </DailyDiff>
    <DailyDiff>
      <FileName>diff_pending.zip</FileName>
      <FileSize>0</FileSize>
      <GeneratedDate />
    </DailyDiff>
  </Files>
</DailyDiffList>"#;

    #[test]
    fn test_parse_list() {
        let list = DailyDiffList::from_xml(LIST).unwrap();

        assert_eq!(list.version, "1.2");
        assert_eq!(list.files.len(), 3);
        assert_eq!(list.files[0].file_name, "diff_2024-01-14.zip");
        assert_eq!(list.files[0].file_size, 183422);
        assert_eq!(
            list.files[0].generated_date,
            NaiveDate::from_ymd_opt(2024, 1, 14).unwrap().and_hms_opt(5, 10, 0)
        );
        assert_eq!(list.files[2].generated_date, None);
    }

    #[test]
    fn test_find_and_latest() {
        let list = DailyDiffList::from_xml(LIST).unwrap();

        assert_eq!(list.find("diff_2024-01-14.zip").unwrap().file_size, 183422);
        assert!(list.find("missing.zip").is_none());
        assert_eq!(list.latest().unwrap().file_name, "diff_2024-01-15.zip");
    }

    #[test]
    fn test_empty_list() {
        let list = DailyDiffList::from_xml("<DailyDiffList><Version>1.2</Version><Files /></DailyDiffList>")
            .unwrap();
        assert_eq!(list.version, "1.2");
        assert!(list.files.is_empty());
        assert!(list.latest().is_none());
    }

    #[test]
    fn test_invalid_size() {
        let xml = "<DailyDiffList><Files><DailyDiff><FileName>a</FileName><FileSize>big</FileSize></DailyDiff></Files></DailyDiffList>";
        assert!(matches!(
            DailyDiffList::from_xml(xml),
            Err(FinstatError::Parse(_))
        ));
    }

    #[test]
    fn test_other_document_is_parse_error() {
        let result = DailyDiffList::from_xml("<Error><Message>Service unavailable</Message></Error>");
        assert!(matches!(result, Err(FinstatError::Parse(_))));
    }
}
