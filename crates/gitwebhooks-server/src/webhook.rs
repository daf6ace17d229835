//! Webhook entry point.

use actix_web::{
    http::{Method, StatusCode},
    web::{self, Data},
    HttpRequest, HttpResponse,
};
use gitwebhooks_core::{dispatch, IncomingWebhook, WebhookHeaders};
use tracing::debug;

use crate::{metrics::DISPATCH_RESULTS, server::AppContext};

fn collect_headers(req: &HttpRequest) -> WebhookHeaders {
    req.headers()
        .iter()
        .filter_map(|(name, value)| match value.to_str() {
            Ok(value) => Some((name.as_str(), value.to_owned())),
            Err(_) => {
                debug!(header = %name, "Dropping header with non-visible-ASCII value");
                None
            }
        })
        .collect()
}

fn status_response(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).body(status.canonical_reason().unwrap_or_default())
}

/// Runs POST requests on any path through the dispatcher; everything else is forbidden.
pub(crate) async fn webhook_route(
    req: HttpRequest,
    body: web::Bytes,
    ctx: Data<AppContext>,
) -> HttpResponse {
    if req.method() != Method::POST {
        debug!(method = %req.method(), path = req.path(), "Rejected non-POST request");
        return status_response(StatusCode::FORBIDDEN);
    }

    let webhook = IncomingWebhook::new(body.to_vec(), collect_headers(&req));
    let snapshot = ctx.snapshot.current();
    let result = dispatch(&webhook, &snapshot, ctx.executor.as_ref());

    DISPATCH_RESULTS.with_label_values(&[result.label()]).inc();

    let status =
        StatusCode::from_u16(result.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    status_response(status)
}
