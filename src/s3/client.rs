// Implements the S3 Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use aws_sdk_s3::client::Client as S3Client;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::types::{
    Delete,
    Object,
    ObjectIdentifier,
};
use aws_smithy_types_convert::date_time::DateTimeExt;
use aws_types::SdkConfig;
use crate::common::{
    ClientConfig,
    FailedDeletion,
    ObjectPage,
    ObjectRecord,
};
use tracing::debug;

/// The S3 `Client`.
pub struct Client {
    /// The AWS SDK `S3Client`.
    pub client: S3Client,

    /// Bucket that is listed.
    pub bucket_name: String,

    /// Key prefix that listings are restricted to, if any.
    pub prefix: Option<String>,

    /// Region the `S3Client` was created in.
    pub region: String,
}

/// Build an `S3Client` from the shared `SdkConfig`, optionally overriding the
/// region and endpoint.
fn s3_client(
    sdk_config: &SdkConfig,
    region: Option<String>,
    endpoint: Option<&str>,
) -> S3Client {
    let mut builder = S3ConfigBuilder::from(sdk_config);

    if let Some(region) = region {
        builder = builder.region(aws_sdk_s3::config::Region::new(region));
    }

    // Most S3 compatible stores don't support virtual hosted buckets.
    if let Some(endpoint) = endpoint {
        builder = builder
            .endpoint_url(endpoint)
            .force_path_style(true);
    }

    S3Client::from_conf(builder.build())
}

/// Returns the region name for a bucket location constraint.
///
/// Location constraints for sufficiently old buckets in S3 may not quite meet
/// expectations. An empty constraint means `us-east-1` and `EU` means
/// `eu-west-1`.
pub fn region_for_location(location: &str) -> String {
    match location {
        ""   => "us-east-1".to_string(),
        "EU" => "eu-west-1".to_string(),
        _    => location.to_string(),
    }
}

impl Client {
    /// Return a new S3 `Client` with the given `ClientConfig`.
    ///
    /// Unless a custom endpoint is configured, the bucket location is looked
    /// up and the returned client is created in the bucket's region.
    pub async fn new(config: &ClientConfig) -> Result<Self> {
        let region = &config.region;

        debug!("new: Loading AWS config for region '{}'", region.name());

        let sdk_config = aws_config::from_env()
            .region(region.provider())
            .load()
            .await;

        Self::from_sdk_config(&sdk_config, config).await
    }

    /// Return a new S3 `Client` built from an already loaded `SdkConfig`.
    pub async fn from_sdk_config(
        sdk_config: &SdkConfig,
        config: &ClientConfig,
    ) -> Result<Self> {
        let endpoint = config.endpoint.as_deref();

        let region = sdk_config.region()
            .map(|r| r.as_ref().to_string())
            .unwrap_or_default();

        debug!("from_sdk_config: Creating S3Client in region '{}'", region);

        let mut client = Self {
            client:      s3_client(sdk_config, None, endpoint),
            bucket_name: config.bucket_name.clone(),
            prefix:      config.prefix.clone(),
            region:      region,
        };

        if endpoint.is_none() {
            let location = client.get_bucket_location(&config.bucket_name)
                .await
                .context("Failed to get bucket location")?;

            debug!("from_sdk_config: Recreating S3Client in region '{}'", location);

            client.client = s3_client(sdk_config, Some(location.clone()), None);
            client.region = location;
        }

        Ok(client)
    }

    /// Return the region name for the given `bucket`.
    pub async fn get_bucket_location(&self, bucket: &str) -> Result<String> {
        debug!("get_bucket_location for '{}'", bucket);

        let output = self.client.get_bucket_location()
            .bucket(bucket)
            .send()
            .await?;

        let location = output.location_constraint()
            .map(|l| l.as_str())
            .unwrap_or_default();

        debug!("GetBucketLocation API returned '{}'", location);

        Ok(region_for_location(location))
    }

    /// Return a single page of the bucket listing.
    pub async fn list_objects_v2(
        &self,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage> {
        debug!(
            "list_objects_v2 for '{}' from {:?}",
            self.bucket_name,
            continuation_token,
        );

        let output = self.client.list_objects_v2()
            .bucket(&self.bucket_name)
            .set_prefix(self.prefix.clone())
            .set_continuation_token(continuation_token)
            .send()
            .await?;

        let objects = output.contents()
            .unwrap_or_default()
            .iter()
            .map(object_record)
            .collect::<Result<Vec<_>>>()?;

        // If the output was truncated we should have a
        // next_continuation_token, otherwise we're done.
        let continuation_token = output.next_continuation_token()
            .map(ToOwned::to_owned);

        Ok(ObjectPage {
            objects,
            continuation_token,
        })
    }

    /// Delete the objects with the given `keys` using a single quiet
    /// DeleteObjects request.
    pub async fn delete_keys(
        &self,
        keys: Vec<String>,
    ) -> Result<Vec<FailedDeletion>> {
        debug!("delete_keys: Deleting {} objects", keys.len());

        let objects = keys.into_iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect();

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build();

        let output = self.client.delete_objects()
            .bucket(&self.bucket_name)
            .delete(delete)
            .send()
            .await?;

        let failed = output.errors()
            .unwrap_or_default()
            .iter()
            .map(|e| {
                FailedDeletion {
                    key:     e.key().unwrap_or_default().to_string(),
                    message: e.message().unwrap_or_default().to_string(),
                }
            })
            .collect();

        Ok(failed)
    }
}

/// Convert an SDK `Object` into our `ObjectRecord`.
fn object_record(object: &Object) -> Result<ObjectRecord> {
    let key = object.key().unwrap_or_default().to_string();

    // Sizes are never negative, but the SDK models them as i64.
    let size = u64::try_from(object.size())
        .with_context(|| format!("Invalid size for '{}'", key))?;

    let last_modified = match object.last_modified() {
        Some(date) => {
            date.to_chrono_utc()
                .with_context(|| format!("Invalid date for '{}'", key))?
        },
        None => Default::default(),
    };

    let storage_class = object.storage_class()
        .map(|s| s.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(ObjectRecord {
        key,
        size,
        last_modified,
        storage_class,
    })
}
