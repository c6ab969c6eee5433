//! Request and response bodies for the Notion REST API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::record::{Properties, Query};

/// Body of `POST /pages`.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePageRequest<'a> {
    pub parent: Parent<'a>,
    pub properties: &'a Properties,
}

/// Parent reference of a new page.
#[derive(Debug, Serialize)]
pub(crate) struct Parent<'a> {
    pub database_id: &'a str,
}

/// Builds the body of `POST /databases/{id}/query`.
pub(crate) fn query_body(query: &Query) -> Value {
    let mut body = Map::new();
    if let Some(filter) = &query.filter {
        body.insert("filter".into(), filter.to_json());
    }
    if let Some(cursor) = &query.start_cursor {
        body.insert("start_cursor".into(), Value::String(cursor.clone()));
    }
    if let Some(size) = query.page_size {
        body.insert("page_size".into(), Value::from(size));
    }
    Value::Object(body)
}

/// Decodes a successful response body.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(Into::into)
}

/// Error object returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    /// Error code (e.g., `object_not_found`).
    pub code: String,
    /// Error description.
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    /// Interprets a failed response body.
    ///
    /// Bodies that are not API error objects are kept verbatim.
    pub(crate) fn into_error(status: u16, body: &str) -> Error {
        match serde_json::from_str::<Self>(body) {
            Ok(response) if response.code == "object_not_found" || status == 404 => {
                Error::NotFound(response.message)
            }
            Ok(response) => Error::api_error(status, response.code, response.message),
            Err(_) if status == 404 => Error::NotFound(body.trim().to_string()),
            Err(_) => Error::api_error(status, "unknown", body.trim()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::property;
    use crate::record::Filter;
    use serde_json::json;

    #[test]
    fn test_create_request_serialization() {
        let mut properties = Properties::new();
        properties.insert("Sender".into(), property::rich_text("Richael"));

        let request = CreatePageRequest {
            parent: Parent {
                database_id: "db123",
            },
            properties: &properties,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "parent": { "database_id": "db123" },
                "properties": {
                    "Sender": { "rich_text": [{ "text": { "content": "Richael" } }] }
                }
            })
        );
    }

    #[test]
    fn test_query_body_first_page() {
        let query = Query::new().with_filter(Filter::text_equals("Recipient", "Santiago"));
        assert_eq!(
            query_body(&query),
            json!({ "filter": { "property": "Recipient", "rich_text": { "equals": "Santiago" } } })
        );
    }

    #[test]
    fn test_query_body_with_cursor() {
        let query = Query::new()
            .with_cursor(Some("next".into()))
            .with_page_size(50);
        assert_eq!(
            query_body(&query),
            json!({ "start_cursor": "next", "page_size": 50 })
        );
    }

    #[test]
    fn test_decode_query_page() {
        let body = br#"{"object":"list","results":[{"id":"p1","archived":true}],"next_cursor":null,"has_more":false}"#;
        let page: crate::record::QueryPage = decode(body).unwrap();
        assert_eq!(page.records.len(), 1);
        assert!(page.records[0].archived);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_decode_malformed_body() {
        let result = decode::<crate::record::Record>(b"<html>upstream error</html>");
        assert!(matches!(result, Err(Error::Json(_))));

        let result = decode::<crate::record::Record>(br#"{"object":"page"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_not_found_mapping() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find page"}"#;
        let error = ErrorResponse::into_error(404, body);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_api_error_mapping() {
        let body = r#"{"object":"error","status":401,"code":"unauthorized","message":"API token is invalid."}"#;
        match ErrorResponse::into_error(401, body) {
            Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 401);
                assert_eq!(code, "unauthorized");
                assert_eq!(message, "API token is invalid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body() {
        match ErrorResponse::into_error(502, "Bad Gateway\n") {
            Error::Api { code, message, .. } => {
                assert_eq!(code, "unknown");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
