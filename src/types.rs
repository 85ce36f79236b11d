use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserRecord {
    pub first_name: String,
    pub nickname: Option<String>,
}

impl UserRecord {
    /// Name shown in a greeting. A record without a nickname greets by first name.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.first_name)
    }
}

fn default_aws_origin() -> String {
    "env".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub dynamodb_table: String,
    #[serde(default = "default_aws_origin")]
    pub aws_origin: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("greeter").required(false))
            .add_source(Environment::default())
            .build()?;

        Self::from_config(s)
    }

    pub fn from_config(s: Config) -> Result<Self, ConfigError> {
        s.try_deserialize()
    }
}
