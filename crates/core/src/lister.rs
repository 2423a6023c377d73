//! Exhaustive object enumeration
//!
//! Drives the paginated listing capability until the backend reports no
//! more pages, materializing the complete object set in memory. Memory
//! therefore grows linearly with object count; that is an accepted
//! constraint of the analysis design.

use crate::error::{Error, Result};
use crate::traits::{ObjectDescriptor, ObjectLister};

/// List every object in a bucket, following continuation tokens.
///
/// The bucket name is validated before the first listing call. Any page
/// failure propagates immediately and discards pages already fetched;
/// no partial object set is ever returned. Dropping the returned future
/// between page fetches abandons the listing.
pub async fn list_all_objects(
    lister: &dyn ObjectLister,
    bucket: &str,
) -> Result<Vec<ObjectDescriptor>> {
    validate_bucket_name(bucket)?;

    let mut objects = Vec::new();
    let mut continuation: Option<String> = None;

    loop {
        let page = lister.list_page(bucket, continuation.take()).await?;
        tracing::debug!(bucket, page_len = page.objects.len(), "fetched listing page");
        objects.extend(page.objects);

        match page.continuation {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    tracing::debug!(bucket, total = objects.len(), "listing complete");
    Ok(objects)
}

/// Validate a bucket name against the common S3 naming rules.
///
/// Length 3-63, lowercase alphanumerics plus `-` and `.` only.
fn validate_bucket_name(name: &str) -> Result<()> {
    if name.len() < 3 || name.len() > 63 {
        return Err(Error::InvalidBucketName(name.to_string()));
    }

    let valid = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
    if !valid {
        return Err(Error::InvalidBucketName(name.to_string()));
    }

    Ok(())
}
