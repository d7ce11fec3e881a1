//! S3-compatible storage client
//!
//! Wraps the AWS SDK for marker-based object listing. Alibaba OSS, MinIO and
//! AWS S3 all answer the ListObjects (v1) call used here.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    config::{Credentials, Region},
    error::DisplayErrorContext,
    types::Object,
    Client,
};
use chrono::DateTime;

use crate::config::StorageConfig;
use crate::error::ListError;

use super::traits::{ObjectLister, ObjectStore};
use super::types::{ObjectDescriptor, Page};

/// S3-compatible object store
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Create a new store from configuration
    pub async fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.access_key_secret,
            None,
            None,
            "oss-exporter",
        );

        let region = config
            .region
            .clone()
            .unwrap_or_else(|| "us-east-1".to_string());

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(region))
            .credentials_provider(credentials)
            .force_path_style(config.force_path_style)
            .build();

        let client = Client::from_conf(s3_config);

        match client.head_bucket().bucket(&config.bucket).send().await {
            Ok(_) => {
                tracing::info!("Connected to bucket: {}", config.bucket);
            }
            Err(e) => {
                tracing::warn!(
                    "Could not verify bucket {}: {}. Probes will report failures until it is reachable.",
                    config.bucket,
                    DisplayErrorContext(&e)
                );
            }
        }

        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket(&self, name: &str) -> Result<Box<dyn ObjectLister>, ListError> {
        if name.is_empty() {
            return Err(ListError::Bucket {
                bucket: String::new(),
                message: "bucket name is empty".to_string(),
            });
        }

        Ok(Box::new(S3BucketLister {
            client: self.client.clone(),
            bucket: name.to_string(),
        }))
    }
}

/// Lister bound to one S3 bucket
pub struct S3BucketLister {
    client: Client,
    bucket: String,
}

#[async_trait]
impl ObjectLister for S3BucketLister {
    async fn list_page(&self, prefix: &str, marker: &str) -> Result<Page, ListError> {
        let mut request = self.client.list_objects().bucket(&self.bucket);

        if !prefix.is_empty() {
            request = request.prefix(prefix);
        }

        if !marker.is_empty() {
            request = request.marker(marker);
        }

        let response = request.send().await.map_err(|e| ListError::Request {
            prefix: prefix.to_string(),
            marker: marker.to_string(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

        let objects = response
            .contents()
            .iter()
            .map(descriptor_from)
            .collect::<Result<Vec<_>, _>>()?;

        let is_truncated = response.is_truncated().unwrap_or(false);
        let next_marker = if is_truncated {
            resume_marker(response.next_marker(), &objects)?
        } else {
            String::new()
        };

        Ok(Page {
            objects,
            is_truncated,
            next_marker,
        })
    }
}

fn descriptor_from(obj: &Object) -> Result<ObjectDescriptor, ListError> {
    let key = obj
        .key()
        .ok_or_else(|| ListError::MalformedResponse("object without key".to_string()))?;

    let last_modified = obj
        .last_modified()
        .and_then(|dt| DateTime::from_timestamp(dt.secs(), dt.subsec_nanos()))
        .ok_or_else(|| {
            ListError::MalformedResponse(format!("object {} has no valid last modified date", key))
        })?;

    Ok(ObjectDescriptor {
        key: key.to_string(),
        size: obj.size().unwrap_or(0),
        last_modified,
    })
}

/// Marker for the page after a truncated response.
///
/// S3 only sends `NextMarker` when a delimiter was requested; otherwise the
/// last key of the page is the marker.
fn resume_marker(next_marker: Option<&str>, objects: &[ObjectDescriptor]) -> Result<String, ListError> {
    match next_marker.filter(|m| !m.is_empty()) {
        Some(marker) => Ok(marker.to_string()),
        None => objects
            .last()
            .map(|obj| obj.key.clone())
            .ok_or_else(|| {
                ListError::MalformedResponse(
                    "truncated listing without marker or objects".to_string(),
                )
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::primitives::DateTime as SmithyDateTime;

    fn object(key: &str, size: i64, secs: i64) -> Object {
        Object::builder()
            .key(key)
            .size(size)
            .last_modified(SmithyDateTime::from_secs(secs))
            .build()
    }

    #[test]
    fn test_descriptor_from_object() {
        let descriptor = descriptor_from(&object("one", 1234, 1_560_459_600)).unwrap();

        assert_eq!(descriptor.key, "one");
        assert_eq!(descriptor.size, 1234);
        assert_eq!(descriptor.last_modified.timestamp(), 1_560_459_600);
    }

    #[test]
    fn test_descriptor_requires_key_and_date() {
        let no_key = Object::builder()
            .size(1)
            .last_modified(SmithyDateTime::from_secs(0))
            .build();
        assert!(matches!(
            descriptor_from(&no_key),
            Err(ListError::MalformedResponse(_))
        ));

        let no_date = Object::builder().key("k").size(1).build();
        assert!(matches!(
            descriptor_from(&no_date),
            Err(ListError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_resume_marker_prefers_next_marker() {
        let objects = vec![descriptor_from(&object("a", 1, 0)).unwrap()];
        assert_eq!(resume_marker(Some("zz"), &objects).unwrap(), "zz");
    }

    #[test]
    fn test_resume_marker_falls_back_to_last_key() {
        let objects = vec![
            descriptor_from(&object("a", 1, 0)).unwrap(),
            descriptor_from(&object("b", 1, 0)).unwrap(),
        ];
        assert_eq!(resume_marker(None, &objects).unwrap(), "b");
        assert_eq!(resume_marker(Some(""), &objects).unwrap(), "b");
    }

    #[test]
    fn test_resume_marker_without_anything_is_malformed() {
        assert!(matches!(
            resume_marker(None, &[]),
            Err(ListError::MalformedResponse(_))
        ));
    }
}
