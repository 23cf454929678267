use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::entities::Upload;
use crate::error::{configuration_error, unexpected_error, Error};
use crate::storage::BlobStore;

const UPLOAD_BASE: &str = "https://storage.googleapis.com/upload/storage/v1/b";
const PUBLIC_BASE: &str = "https://storage.googleapis.com";
const TIMEOUT: Duration = Duration::from_secs(60);

/// Google Cloud Storage through its JSON API. Objects are uploaded with a
/// public-read ACL so the returned URL resolves without credentials.
pub struct CloudStorage {
    client: reqwest::Client,
    bucket: Option<String>,
    access_token: Option<String>,
}

impl CloudStorage {
    pub fn new(bucket: Option<String>, access_token: Option<String>) -> Result<Self, Error> {
        Ok(Self {
            client: super::http_client(TIMEOUT)?,
            bucket,
            access_token,
        })
    }

    fn credentials(&self) -> Result<(&str, &str), Error> {
        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| configuration_error("STORAGE_BUCKET"))?;
        let token = self
            .access_token
            .as_deref()
            .ok_or_else(|| configuration_error("STORAGE_ACCESS_TOKEN"))?;

        Ok((bucket, token))
    }

    #[tracing::instrument(skip(self, token, file), fields(bytes = file.bytes.len()))]
    async fn upload_one(
        &self,
        bucket: &str,
        token: &str,
        name: String,
        file: &Upload,
    ) -> Result<String, Error> {
        let res = self
            .client
            .post(format!("{}/{}/o", UPLOAD_BASE, bucket))
            .bearer_auth(token)
            .query(&[
                ("uploadType", "media"),
                ("name", name.as_str()),
                ("predefinedAcl", "publicRead"),
            ])
            .header(CONTENT_TYPE, file.content_type.as_str())
            .body(file.bytes.clone())
            .send()
            .await?;

        super::read_success("cloud storage", res).await?;

        public_url(bucket, &name)
    }
}

/// Keeps object names URL- and path-safe.
fn sanitize(filename: &str) -> String {
    let name: String = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.trim_matches(['.', '_']).is_empty() {
        "file".into()
    } else {
        name
    }
}

fn object_name(prefix: &str, at: DateTime<Utc>, index: usize, filename: &str) -> String {
    format!(
        "{}/{}_{}_{}",
        prefix,
        at.format("%Y%m%d%H%M%S"),
        index,
        sanitize(filename)
    )
}

fn public_url(bucket: &str, name: &str) -> Result<String, Error> {
    let mut url = Url::parse(PUBLIC_BASE).map_err(|e| unexpected_error(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| unexpected_error("storage base URL cannot hold a path"))?
        .push(bucket)
        .extend(name.split('/'));

    Ok(url.to_string())
}

#[async_trait]
impl BlobStore for CloudStorage {
    #[tracing::instrument(skip(self, files), fields(files = files.len()))]
    async fn upload(&self, prefix: &str, files: &[Upload]) -> Result<Vec<String>, Error> {
        let (bucket, token) = self.credentials()?;
        let now = Utc::now();

        let uploads = files.iter().enumerate().map(|(index, file)| {
            let name = object_name(prefix, now, index, &file.filename);
            self.upload_one(bucket, token, name, file)
        });

        try_join_all(uploads).await
    }
}
