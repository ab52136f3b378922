pub mod data_uri;
pub mod s3;
