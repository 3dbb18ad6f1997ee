use core::fmt;
use std::env;
use std::str::FromStr;

use service_core::ddb::Adapter;

pub(crate) enum ContextKey {
    DynamoDbEndpoint,
    UsersTableName,
    CoursesTableName,
    CategoriesTableName,
    EnrollmentsTableName,
    TokenSigningKey,
    BindAddress,
}

pub(crate) struct Context {
    pub dynamodb_adapter: Adapter,
    pub users_table_name: String,
    pub courses_table_name: String,
    pub categories_table_name: String,
    pub enrollments_table_name: String,
    pub token_signing_key: String,
    pub bind_address: String,
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DynamoDbEndpoint => write!(f, "DYNAMODB_ENDPOINT"),
            Self::UsersTableName => write!(f, "USERS_TABLE_NAME"),
            Self::CoursesTableName => write!(f, "COURSES_TABLE_NAME"),
            Self::CategoriesTableName => write!(f, "CATEGORIES_TABLE_NAME"),
            Self::EnrollmentsTableName => write!(f, "ENROLLMENTS_TABLE_NAME"),
            Self::TokenSigningKey => write!(f, "TOKEN_SIGNING_KEY"),
            Self::BindAddress => write!(f, "BIND_ADDRESS"),
        }
    }
}

impl Context {
    pub async fn from_env() -> Self {
        let shared_config = aws_config::load_from_env().await;

        let dynamodb_config = if let Some(endpoint) = Context::key(&ContextKey::DynamoDbEndpoint) {
            log::info!("Using DynamoDB with endpoint: {}.", endpoint);
            let uri = http::Uri::from_str(&endpoint)
                .unwrap_or_else(|_| panic!("Invalid URI in {}.", ContextKey::DynamoDbEndpoint));
            aws_sdk_dynamodb::config::Builder::from(&shared_config)
                .endpoint_resolver(aws_sdk_dynamodb::Endpoint::immutable(uri))
                .build()
        } else {
            aws_sdk_dynamodb::config::Config::new(&shared_config)
        };

        let client = aws_sdk_dynamodb::Client::from_conf(dynamodb_config);
        Context {
            dynamodb_adapter: client.into(),
            users_table_name: Context::require(&ContextKey::UsersTableName),
            courses_table_name: Context::require(&ContextKey::CoursesTableName),
            categories_table_name: Context::require(&ContextKey::CategoriesTableName),
            enrollments_table_name: Context::require(&ContextKey::EnrollmentsTableName),
            token_signing_key: Context::require(&ContextKey::TokenSigningKey),
            bind_address: Context::key(&ContextKey::BindAddress).unwrap_or_else(|| "0.0.0.0:8080".to_string()),
        }
    }

    pub fn key(key: &ContextKey) -> Option<String> {
        env::var(key.to_string()).ok()
    }

    fn require(key: &ContextKey) -> String {
        Context::key(key).unwrap_or_else(|| panic!("Environment variable {} not set.", key))
    }
}
