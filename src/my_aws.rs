use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::{Region, RetryConfig};
use aws_smithy_http::endpoint::Endpoint;
use aws_smithy_http::result::SdkError;
use aws_types::{credentials::SharedCredentialsProvider, Credentials, SdkConfig};
use lambda_http::http::Uri;
use log::debug;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::store::{NicknameStore, StoreError};
use crate::types::UserRecord;

const KEY_ATTRIBUTE: &str = "firstName";
const NICKNAME_ATTRIBUTE: &str = "nickname";

pub struct MyAwsConfig {}
impl MyAwsConfig {
    pub fn new(origin: &str) -> Result<aws_types::SdkConfig> {
        match origin {
            "env" => MyAwsConfig::from_env(),
            "offline" => Ok(MyAwsConfig::from_offline()),
            _ => Err(anyhow!("unknown AWS_ORIGIN {}", origin)),
        }
    }

    pub fn from_offline() -> aws_types::SdkConfig {
        let region = Region::new("local");
        let endpoint = Endpoint::immutable(Uri::from_static("http://localhost:8000/"));
        let credential = Credentials::new(
            "localAccessKey",
            "localSecretAccessKey",
            None,
            None,
            "local",
        );

        let mut builder = Self::skel();
        builder.set_region(region);
        builder.set_endpoint_resolver(Some(Arc::new(endpoint)));
        builder.set_credentials_provider(Some(SharedCredentialsProvider::new(credential)));
        builder.build()
    }

    pub fn from_env() -> Result<aws_types::SdkConfig> {
        let aws_access_key_id = env::var("AWS_ACCESS_KEY_ID").context("AWS_ACCESS_KEY_ID")?;
        let aws_secret_access_key =
            env::var("AWS_SECRET_ACCESS_KEY").context("AWS_SECRET_ACCESS_KEY")?;
        let aws_session_token = env::var("AWS_SESSION_TOKEN").ok();

        let credentials = Credentials::new(
            aws_access_key_id,
            aws_secret_access_key,
            aws_session_token,
            None,
            "env",
        );

        let aws_region = env::var("AWS_REGION").context("AWS_REGION")?;
        let region = Region::new(aws_region);

        let mut builder = Self::skel();
        builder.set_region(region);
        builder.set_credentials_provider(Some(SharedCredentialsProvider::new(credentials)));
        Ok(builder.build())
    }

    fn skel() -> aws_types::sdk_config::Builder {
        // a single store fault fails the request
        let retry_config = RetryConfig::new().with_max_attempts(1);

        let mut builder = SdkConfig::builder();
        builder.set_retry_config(Some(retry_config));
        builder
    }
}

#[derive(Clone)]
pub struct MyDynamoDb {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}
impl MyDynamoDb {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: &str) -> Self {
        MyDynamoDb {
            client,
            table_name: table_name.to_owned(),
        }
    }

    pub fn from_config(config: &SdkConfig, table_name: &str) -> Self {
        Self::new(aws_sdk_dynamodb::Client::new(config), table_name)
    }
}

#[async_trait]
impl NicknameStore for MyDynamoDb {
    async fn fetch(&self, first_name: &str) -> Result<Option<UserRecord>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(first_name.to_owned()))
            .send()
            .await
            .map_err(store_error)?;
        debug!("get_item {}: found={}", first_name, output.item().is_some());

        Ok(output.item().map(|item| to_record(first_name, item)))
    }

    async fn upsert(&self, first_name: &str, nickname: &str) -> Result<(), StoreError> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(first_name.to_owned()))
            .update_expression(format!("SET {} = :nickname", NICKNAME_ATTRIBUTE))
            .expression_attribute_values(":nickname", AttributeValue::S(nickname.to_owned()))
            .send()
            .await
            .map_err(store_error)?;
        debug!("update_item {}", first_name);
        Ok(())
    }
}

fn to_record(first_name: &str, item: &HashMap<String, AttributeValue>) -> UserRecord {
    let first_name = item
        .get(KEY_ATTRIBUTE)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_else(|| first_name.to_owned());
    let nickname = item
        .get(NICKNAME_ATTRIBUTE)
        .and_then(|v| v.as_s().ok())
        .cloned();

    UserRecord {
        first_name,
        nickname,
    }
}

fn store_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_with_nickname() {
        let item = HashMap::from([
            (KEY_ATTRIBUTE.to_string(), AttributeValue::S("Alice".to_string())),
            (NICKNAME_ATTRIBUTE.to_string(), AttributeValue::S("Al".to_string())),
        ]);
        let record = to_record("Alice", &item);
        assert_eq!(record.first_name, "Alice");
        assert_eq!(record.nickname.as_deref(), Some("Al"));
    }

    #[test]
    fn item_without_nickname() {
        let item = HashMap::from([(
            KEY_ATTRIBUTE.to_string(),
            AttributeValue::S("Alice".to_string()),
        )]);
        let record = to_record("Alice", &item);
        assert_eq!(record.nickname, None);
        assert_eq!(record.display_name(), "Alice");
    }

    #[test]
    fn non_string_nickname_is_ignored() {
        let item = HashMap::from([(
            NICKNAME_ATTRIBUTE.to_string(),
            AttributeValue::N("7".to_string()),
        )]);
        let record = to_record("Bob", &item);
        assert_eq!(record.first_name, "Bob");
        assert_eq!(record.nickname, None);
    }

    #[test]
    fn unknown_origin_is_rejected() {
        let err = MyAwsConfig::new("offlien").err().expect("origin accepted");
        assert!(err.to_string().contains("offlien"));
    }

    #[test]
    fn offline_origin_has_local_region() {
        let config = MyAwsConfig::new("offline").unwrap();
        assert_eq!(
            config.region().map(|r| r.to_string()),
            Some("local".to_string())
        );
    }

    #[test]
    fn offline_config_has_local_region() {
        let config = MyAwsConfig::from_offline();
        assert_eq!(
            config.region().map(|r| r.to_string()),
            Some("local".to_string())
        );
    }
}
