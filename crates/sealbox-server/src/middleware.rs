//! HTTPS redirection middleware.
//!
//! The service is meant to sit behind a TLS-terminating proxy. The
//! proxy reports the original scheme in `x-forwarded-proto`; requests
//! that arrived over plain HTTP are redirected (308) to their HTTPS
//! equivalent so protected data never travels unencrypted. Requests
//! without the header (direct connections, tests) pass through.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Header set by the TLS-terminating proxy.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Redirect plain-HTTP requests to their HTTPS equivalent.
pub async fn redirect_to_https(request: Request, next: Next) -> Response {
    let plain_http = request
        .headers()
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("http"));

    if plain_http {
        if let Some(location) = https_location(&request) {
            tracing::debug!("redirecting plain-http request to {location}");
            return Redirect::permanent(&location).into_response();
        }
    }

    next.run(request).await
}

/// The HTTPS URI for this request, if the host is known.
fn https_location(request: &Request) -> Option<String> {
    let host = request.headers().get(header::HOST)?.to_str().ok()?;
    let path_and_query =
        request.uri().path_and_query().map_or("/", axum::http::uri::PathAndQuery::as_str);

    Some(format!("https://{host}{path_and_query}"))
}
