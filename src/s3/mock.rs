// Mock S3 clients replaying canned responses
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_sdk_s3::client::Client as S3Client;
use aws_sdk_s3::config::Config as S3Config;
use aws_sdk_s3::config::Credentials;
use aws_smithy_client::erase::DynConnector;
use aws_smithy_client::test_connection::TestConnection;
use aws_smithy_http::body::SdkBody;
use aws_types::region::Region;
use aws_types::SdkConfig;
use std::fs;
use std::path::Path;
use super::client::Client;

pub enum ResponseType<'a> {
    FromFile(&'a str),
    WithStatus(u16),
}

fn credentials() -> Credentials {
    Credentials::from_keys(
        "ATESTCLIENT",
        "atestsecretkey",
        Some("atestsessiontoken".to_string()),
    )
}

// Create a test connection returning the given responses in order.
fn test_connection(responses: Vec<ResponseType<'_>>) -> TestConnection<SdkBody> {
    let events = responses
        .iter()
        .map(|r| {
            let (status, data) = match r {
                ResponseType::FromFile(file) => {
                    let path = Path::new("test-data").join(file);
                    let data = fs::read_to_string(path).unwrap();

                    (200, data)
                },
                ResponseType::WithStatus(status) => (*status, String::new()),
            };

            (
                http::Request::builder()
                    .body(SdkBody::from("request body"))
                    .unwrap(),

                http::Response::builder()
                    .status(status)
                    .body(SdkBody::from(data))
                    .unwrap(),
            )
        })
        .collect();

    TestConnection::new(events)
}

// Create a mock S3 client, returning the given responses in order.
pub fn mock_client(responses: Vec<ResponseType<'_>>) -> Client {
    let conn = DynConnector::new(test_connection(responses));

    let conf = S3Config::builder()
        .credentials_provider(credentials())
        .http_connector(conn)
        .region(aws_sdk_s3::config::Region::new("eu-west-1"))
        .build();

    Client {
        client:      S3Client::from_conf(conf),
        bucket_name: "test-bucket".into(),
        prefix:      None,
        region:      "eu-west-1".into(),
    }
}

// Create a shared AWS config in us-east-2 returning the given responses in
// order. The connection is returned so that requests can be inspected.
pub fn mock_sdk_config(
    responses: Vec<ResponseType<'_>>,
) -> (SdkConfig, TestConnection<SdkBody>) {
    let conn = test_connection(responses);

    let sdk_config = SdkConfig::builder()
        .credentials_provider(SharedCredentialsProvider::new(credentials()))
        .http_connector(DynConnector::new(conn.clone()))
        .region(Region::new("us-east-2"))
        .build();

    (sdk_config, conn)
}
