//! Finstat Client
//!
//! Client for the Finstat company registry API: signed company detail lookups,
//! autocomplete search, and daily diff listing and download.
//!
//! ```rust,no_run
//! use finstat_client::{ClientConfig, FinstatClient, SK_API_URL};
//!
//! # async fn run() -> finstat_client::Result<()> {
//! let config = ClientConfig::new(SK_API_URL, "api-key", "private-key")
//!     .with_station("billing", "Billing backend");
//! let client = FinstatClient::new(config)?;
//!
//! let detail = client.detail("35757442").await?;
//! println!("{} ({:?} requests left today)", detail.data.name, detail.limits.daily.remaining());
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub mod api;
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;

pub use api::{AutoCompleteResult, CompanySummary, DailyDiff, DailyDiffList, DetailResult};
pub use client::{LimitCounter, RateLimits};
pub use config::{ClientConfig, ConfigLoader, CZ_API_URL, SK_API_URL};
pub use error::{FinstatError, Result};

use client::{verification_hash, HttpClient};

const AUTOCOMPLETE_PATH: &str = "autocomplete";
const LIST_OF_DIFFS_PATH: &str = "GetListOfDiffs";
const GET_FILE_PATH: &str = "GetFile";

/// A parsed result together with the quota headers of the response it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub limits: RateLimits,
}

impl<T> ApiResponse<T> {
    /// Drop the limits and keep the result
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// The main Finstat client
pub struct FinstatClient {
    /// Keys, station identity and base URL
    config: ClientConfig,

    /// HTTP client
    http_client: HttpClient,
}

impl FinstatClient {
    /// Create a client from an explicit config
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = HttpClient::new(config.timeout)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a client from `.env`, the default config files and `FINSTAT_*` variables
    pub fn from_env() -> Result<Self> {
        Self::new(ConfigLoader::new()?.into_client_config()?)
    }

    /// Create a client with a custom config path
    pub fn with_config_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(ConfigLoader::from_path(path)?.into_client_config()?)
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Common form fields plus the operation parameter, if any
    fn signed_form<'a>(
        &'a self,
        hash: &'a str,
        parameter: Option<(&'a str, &'a str)>,
    ) -> Vec<(&'a str, &'a str)> {
        let mut form = vec![
            ("apiKey", self.config.api_key.as_str()),
            ("Hash", hash),
            ("StationId", self.config.station_id.as_str()),
            ("StationName", self.config.station_name.as_str()),
        ];
        form.extend(parameter);
        form
    }

    fn hash(&self, parameter: Option<&str>) -> String {
        verification_hash(&self.config.api_key, &self.config.private_key, parameter)
    }

    /// Look up a company by its ICO
    pub async fn detail(&self, ico: &str) -> Result<ApiResponse<DetailResult>> {
        let hash = self.hash(Some(ico));
        let form = self.signed_form(&hash, Some(("ico", ico)));
        let url = self.config.base_url.as_str();

        let (body, limits) = self.http_client.post_form_text(url, &form, Some(ico)).await?;
        Ok(ApiResponse {
            data: DetailResult::from_xml(&body)?,
            limits,
        })
    }

    /// Search companies by partial name or ICO
    pub async fn autocomplete(&self, query: &str) -> Result<ApiResponse<AutoCompleteResult>> {
        let hash = self.hash(Some(query));
        let form = self.signed_form(&hash, Some(("query", query)));
        let url = self.endpoint(AUTOCOMPLETE_PATH);

        let (body, limits) = self
            .http_client
            .post_form_text(&url, &form, Some(query))
            .await?;
        Ok(ApiResponse {
            data: AutoCompleteResult::from_xml(&body)?,
            limits,
        })
    }

    /// List the daily diff files available for download
    pub async fn daily_diffs(&self) -> Result<ApiResponse<DailyDiffList>> {
        let hash = self.hash(None);
        let form = self.signed_form(&hash, None);
        let url = self.endpoint(LIST_OF_DIFFS_PATH);

        let (body, limits) = self.http_client.post_form_text(&url, &form, None).await?;
        let data = DailyDiffList::from_xml(&body)?;

        tracing::debug!(files = data.files.len(), version = %data.version, "listed daily diffs");
        Ok(ApiResponse { data, limits })
    }

    /// Download a daily diff file to `destination`, returning the bytes written.
    ///
    /// The destination is only created once the whole body has been received;
    /// a failed transfer leaves no file behind.
    pub async fn download_daily_diff(
        &self,
        file_name: &str,
        destination: impl AsRef<Path>,
    ) -> Result<ApiResponse<u64>> {
        let destination = destination.as_ref();
        let hash = self.hash(Some(file_name));
        let form = self.signed_form(&hash, Some(("fileName", file_name)));
        let url = self.endpoint(GET_FILE_PATH);

        let (response, limits) = self
            .http_client
            .post_form(&url, &form, Some(file_name))
            .await?;

        let written = save_stream(response.bytes_stream(), destination).await?;

        tracing::debug!(
            file_name,
            bytes = written,
            destination = %destination.display(),
            "downloaded daily diff"
        );
        Ok(ApiResponse {
            data: written,
            limits,
        })
    }

    /// Quota state reported by the most recently completed request
    pub fn rate_limits(&self) -> Result<RateLimits> {
        self.http_client.rate_limiter().last()
    }
}

/// Write `chunks` to a sibling `.part` file and move it over `destination`
/// once complete. The partial file is removed on any failure.
async fn save_stream<S, E>(chunks: S, destination: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    FinstatError: From<E>,
{
    let partial = partial_path(destination);

    let result = match write_chunks(chunks, &partial).await {
        Ok(written) => tokio::fs::rename(&partial, destination)
            .await
            .map(|_| written)
            .map_err(<FinstatError as From<std::io::Error>>::from),
        Err(err) => Err(err),
    };

    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(&partial).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %partial.display(), error = %e, "failed to remove partial download");
            }
        }
    }
    result
}

async fn write_chunks<S, E>(chunks: S, path: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    FinstatError: From<E>,
{
    let mut chunks = std::pin::pin!(chunks);
    let mut file = tokio::fs::File::create(path).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> FinstatClient {
        let config = ClientConfig::new(base_url, "key", "secret").with_station("id", "name");
        FinstatClient::new(config).unwrap()
    }

    #[test]
    fn test_endpoint_joining() {
        assert_eq!(
            client("https://www.finstat.sk/api/").endpoint(GET_FILE_PATH),
            "https://www.finstat.sk/api/GetFile"
        );
        assert_eq!(
            client(SK_API_URL).endpoint(LIST_OF_DIFFS_PATH),
            "https://www.finstat.sk/api/GetListOfDiffs"
        );
    }

    #[test]
    fn test_signed_form_fields() {
        let client = client(SK_API_URL);
        let hash = client.hash(Some("35757442"));
        let form = client.signed_form(&hash, Some(("ico", "35757442")));

        assert_eq!(
            form,
            vec![
                ("apiKey", "key"),
                ("Hash", hash.as_str()),
                ("StationId", "id"),
                ("StationName", "name"),
                ("ico", "35757442"),
            ]
        );
        assert_eq!(client.signed_form(&hash, None).len(), 4);
    }

    #[test]
    fn test_rate_limits_before_any_call() {
        assert!(matches!(
            client(SK_API_URL).rate_limits(),
            Err(FinstatError::LimitsUnavailable)
        ));
    }

    #[test]
    fn test_partial_path_is_sibling() {
        assert_eq!(
            partial_path(Path::new("/tmp/diffs/diff.zip")),
            PathBuf::from("/tmp/diffs/diff.zip.part")
        );
    }

    #[tokio::test]
    async fn test_save_stream_moves_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("diff.zip");
        let chunks = futures::stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"PK\x03\x04")),
            Ok(Bytes::from_static(b"rest")),
        ]);

        let written = save_stream(chunks, &destination).await.unwrap();
        assert_eq!(written, 8);
        assert_eq!(std::fs::read(&destination).unwrap(), b"PK\x03\x04rest");
        assert!(!partial_path(&destination).exists());
    }

    #[tokio::test]
    async fn test_save_stream_interrupted_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("diff.zip");
        std::fs::write(&destination, b"previous").unwrap();

        let chunks = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::other("connection reset")),
        ]);

        let err = save_stream(chunks, &destination).await.unwrap_err();
        assert!(matches!(err, FinstatError::Io(_)));
        assert_eq!(std::fs::read(&destination).unwrap(), b"previous");
        assert!(!partial_path(&destination).exists());
    }
}
