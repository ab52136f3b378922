use std::env;

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::store::{ObjectStore, StoreError};
use crate::utils::data_uri::EncodedImage;

pub fn create_s3_client() -> (Client, String, String) {
    let access_key = env::var("AWS_ACCESS_KEY_ID").expect("AWS_ACCESS_KEY_ID must be set");
    let secret_key = env::var("AWS_SECRET_ACCESS_KEY").expect("AWS_SECRET_ACCESS_KEY must be set");
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string());
    let bucket_name = env::var("MY_BUCKET_NAME").expect("MY_BUCKET_NAME must be set");

    let credentials = Credentials::new(access_key, secret_key, None, None, "static");

    let config = aws_sdk_s3::Config::builder()
        .region(Region::new(region.clone()))
        .credentials_provider(credentials)
        .build();

    (Client::from_conf(config), bucket_name, region)
}

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    region: String,
}

impl S3ObjectStore {
    pub fn from_env() -> Self {
        let (client, bucket, region) = create_s3_client();
        Self {
            client,
            bucket,
            region,
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(&self, path: &str, image: &EncodedImage) -> Result<String, StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(image.mime().essence_str())
            .body(ByteStream::from(image.bytes().to_vec()))
            .send()
            .await
            .map_err(|e| StoreError::Upload(e.to_string()))?;

        Ok(format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, path
        ))
    }
}
