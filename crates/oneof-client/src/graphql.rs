use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::ClientError;

#[derive(Debug, Serialize)]
struct Request<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ResponseError>,
}

#[derive(Debug, Deserialize)]
struct ResponseError {
    message: String,
}

/// The HTTP client shared by searches and introspection. The timeout covers
/// the whole request, from connecting to reading the body.
pub(crate) fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// Posts a GraphQL request and returns its `data`. Any reported error fails
/// the request, even when partial data came along.
pub(crate) async fn execute<V, T>(
    client: &reqwest::Client,
    url: &Url,
    query: &str,
    variables: V,
) -> Result<T, ClientError>
where
    V: Serialize,
    T: DeserializeOwned,
{
    tracing::debug!(%url, "sending GraphQL request");

    let response: Response<T> = client
        .post(url.clone())
        .header(USER_AGENT, crate::USER_AGENT)
        .header(ACCEPT, "application/json")
        .json(&Request { query, variables })
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|error| error.message).collect();
        tracing::debug!(errors = ?messages, "GraphQL request returned errors");

        return Err(ClientError::GraphQL(messages));
    }

    response.data.ok_or(ClientError::NoData)
}
