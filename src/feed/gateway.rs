//! Remote data gateway: one POST of a fixed GraphQL query.

use serde::{Deserialize, Serialize};

use super::config::FeedConfig;
use super::error::FeedError;
use super::types::FeedItem;

/// The fixed query fetching the whole feed.
pub const GET_POSTS_QUERY: &str = r"
  query {
    posts {
      data {
        id
        title
        body
        user {
          id
          name
          username
          email
        }
      }
    }
  }
";

/// Fetch all posts.
///
/// # Errors
/// Returns an error if the request fails, the endpoint reports a GraphQL
/// error, or the response carries no posts data.
pub async fn fetch_posts(
    client: &reqwest::Client,
    config: &FeedConfig,
) -> Result<Vec<FeedItem>, FeedError> {
    let response = client
        .post(&config.endpoint)
        .json(&GraphQlRequest {
            query: GET_POSTS_QUERY,
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Api(format!(
            "graphql endpoint returned status {status}"
        )));
    }

    let body: GraphQlResponse = response.json().await?;
    parse_response(body)
}

/// Turn a GraphQL response into the post list, or the first reported error.
fn parse_response(body: GraphQlResponse) -> Result<Vec<FeedItem>, FeedError> {
    if let Some(first) = body.errors.into_iter().flatten().next() {
        let message = first
            .message
            .unwrap_or_else(|| "unknown graphql error".to_string());
        return Err(FeedError::Api(message));
    }

    body.data
        .and_then(|data| data.posts)
        .map(|page| page.data)
        .ok_or(FeedError::MissingData)
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: Option<String>,
}

#[derive(Deserialize)]
struct ResponseData {
    posts: Option<PostsPage>,
}

#[derive(Deserialize)]
struct PostsPage {
    data: Vec<FeedItem>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Vec<FeedItem>, FeedError> {
        parse_response(serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn test_parse_posts() {
        let raw = r#"{
            "data": {
                "posts": {
                    "data": [
                        { "id": "1", "title": "first", "body": "a" },
                        { "id": "2", "title": "second", "body": "b" }
                    ]
                }
            }
        }"#;
        let posts = parse(raw).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "first");
        assert_eq!(posts[1].id, "2");
    }

    #[test]
    fn test_parse_graphql_errors() {
        let raw = r#"{ "errors": [ { "message": "posts unavailable" } ] }"#;
        match parse(raw) {
            Err(FeedError::Api(message)) => assert_eq!(message, "posts unavailable"),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_data() {
        assert!(matches!(parse("{}"), Err(FeedError::MissingData)));
        assert!(matches!(
            parse(r#"{ "data": {} }"#),
            Err(FeedError::MissingData)
        ));
    }
}
