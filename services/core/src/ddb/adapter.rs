use aws_sdk_dynamodb::Client as RawClient;

/// Thin wrapper around the DynamoDB SDK client.
///
/// Repositories talk to the per-operation traits (`GetItem`, `PutItem`, ...)
/// instead of the raw client, so they stay mockable in tests.
#[derive(Debug, Clone)]
pub struct Adapter {
    pub(crate) raw: RawClient,
}

impl From<RawClient> for Adapter {
    fn from(raw: RawClient) -> Self {
        Adapter { raw }
    }
}
