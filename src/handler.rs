use lambda_http::{
    http::{header::CONTENT_TYPE, Response, StatusCode},
    Body, Request, RequestExt,
};
use lambda_runtime::Error;
use log::{info, warn};
use serde::Serialize;

use crate::schema::GreeterSchema;

pub const QUERY_PARAMETER: &str = "query";

/// Runs the `query` string parameter against the schema.
///
/// Resolver and validation errors come back inside a 200 response. Only a
/// failure to produce the response itself is returned as `Err`.
pub async fn handle(schema: &GreeterSchema, request: Request) -> Result<Response<Body>, Error> {
    let query = request
        .query_string_parameters()
        .get(QUERY_PARAMETER)
        .unwrap_or_default()
        .to_owned();

    let result = schema.execute(query).await;
    if result.errors.is_empty() {
        info!("query executed");
    } else {
        warn!("query executed with {} error(s)", result.errors.len());
    }

    envelope(&result)
}

/// Wraps a serialized execution result in a 200 JSON response.
pub fn envelope<T: Serialize>(result: &T) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(result)?;
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body));

    match response {
        Ok(data) => Ok(data),
        Err(error) => Err(error.into()),
    }
}
