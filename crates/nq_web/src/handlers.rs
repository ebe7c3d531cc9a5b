use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use async_graphql::{Value, Variables};
use serde::Deserialize;
use std::sync::Arc;
use crate::{AppState, HeadlineSchema};

/// JSON body accepted by `POST /query`.
///
/// `query` may be absent or `null` (treated as empty); `variables` must be
/// an object or `null` when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub operation_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryParams {
    #[serde(default)]
    query: String,
}

impl GraphQlRequest {
    /// Decode the first JSON value in `body`; anything after it is ignored.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        match serde_json::Deserializer::from_slice(body).into_iter::<Self>().next() {
            Some(result) => result,
            None => Err(serde::de::Error::custom("empty request body")),
        }
    }

    fn query_text(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    fn into_request(self) -> async_graphql::Request {
        let mut request = async_graphql::Request::new(self.query.unwrap_or_default());
        if let Some(variables) = self.variables {
            request = request.variables(Variables::from_json(serde_json::Value::Object(variables)));
        }
        if let Some(name) = self.operation_name {
            request = request.operation_name(name);
        }
        request
    }
}

/// Run `request` against the schema.
///
/// Blank query text selects nothing and returns an empty `data` object
/// without touching the schema.
pub async fn execute(schema: &HeadlineSchema, request: GraphQlRequest) -> async_graphql::Response {
    if request.query_text().trim().is_empty() {
        return async_graphql::Response::new(Value::Object(Default::default()));
    }
    schema.execute(request.into_request()).await
}

/// `/query` endpoint.
///
/// `GET` reads the query text from the `query` URL parameter; every other
/// method expects a JSON body. Execution runs inside this future, so a
/// client disconnect drops any in-flight resolver along with it.
pub async fn graphql(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let request = if method == Method::GET {
        let params = Query::<QueryParams>::try_from_uri(&uri)
            .map(|Query(params)| params)
            .unwrap_or_default();
        GraphQlRequest {
            query: Some(params.query),
            ..Default::default()
        }
    } else {
        match GraphQlRequest::from_body(&body) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Rejecting {} {}: {}", method, uri, e);
                return (StatusCode::BAD_REQUEST, "invalid json").into_response();
            }
        }
    };

    let response = execute(&state.schema, request).await;
    let status = if response.is_err() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Json(response)).into_response()
}
