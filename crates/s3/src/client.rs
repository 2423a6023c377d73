//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectLister trait from sl-core.
//! The adapter never retries: failures map straight into the sl-core
//! taxonomy and retry policy stays with the caller.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;

use sl_core::{BucketInfo, Endpoint, Error, ObjectDescriptor, ObjectLister, ObjectPage, Result};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from an endpoint configuration
    pub async fn new(endpoint: &Endpoint) -> Result<Self> {
        let credentials = aws_credential_types::Credentials::new(
            endpoint.access_key.clone(),
            endpoint.secret_key.clone(),
            None, // session token
            None, // expiry
            "sl-static-credentials",
        );

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(endpoint.region.clone()))
            .endpoint_url(&endpoint.url)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(endpoint.path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

#[async_trait]
impl ObjectLister for S3Client {
    async fn list_page(&self, bucket: &str, continuation: Option<String>) -> Result<ObjectPage> {
        let mut request = self.inner.list_objects_v2().bucket(bucket);

        if let Some(token) = continuation {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            bucket,
            count = response.key_count().unwrap_or(0),
            "listed objects page"
        );

        let objects = response
            .contents()
            .iter()
            .map(|object| {
                ObjectDescriptor::new(object.key().unwrap_or_default(), object.size().unwrap_or(0))
            })
            .collect();

        // A continuation token is only meaningful on a truncated response.
        let continuation = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ObjectPage {
            objects,
            continuation,
        })
    }

    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| classify_error(DisplayErrorContext(&e).to_string()))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|bucket| {
                let mut info = BucketInfo::new(bucket.name().unwrap_or_default());
                if let Some(created) = bucket.creation_date() {
                    info.created = jiff::Timestamp::from_second(created.secs()).ok();
                }
                info
            })
            .collect();

        Ok(buckets)
    }
}

/// Map an SDK error message onto the sl-core taxonomy.
///
/// The SDK surfaces service error codes in the rendered error chain;
/// anything not recognizably "missing" or "denied" is treated as
/// retryable.
fn classify_error(message: String) -> Error {
    if message.contains("NoSuchBucket") || message.contains("NotFound") {
        Error::BucketNotFound(message)
    } else if message.contains("AccessDenied")
        || message.contains("InvalidAccessKeyId")
        || message.contains("SignatureDoesNotMatch")
    {
        Error::AccessDenied(message)
    } else {
        Error::Transient(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_missing_bucket() {
        let err = classify_error("service error: NoSuchBucket: the bucket does not exist".into());
        assert!(matches!(err, Error::BucketNotFound(_)));

        let err = classify_error("NotFound".into());
        assert!(matches!(err, Error::BucketNotFound(_)));
    }

    #[test]
    fn test_classify_denied() {
        let err = classify_error("AccessDenied: insufficient permissions".into());
        assert!(matches!(err, Error::AccessDenied(_)));

        let err = classify_error("InvalidAccessKeyId".into());
        assert!(matches!(err, Error::AccessDenied(_)));

        let err = classify_error("SignatureDoesNotMatch".into());
        assert!(matches!(err, Error::AccessDenied(_)));
    }

    #[test]
    fn test_classify_everything_else_as_transient() {
        let err = classify_error("dispatch failure: timeout".into());
        assert!(matches!(err, Error::Transient(_)));
        assert!(err.is_retryable());
    }
}
