//! Per-request pipeline.

use gitwebhooks_config::ConfigSnapshot;
use tracing::{debug, error, info, warn, Span};

use crate::{
    events::is_event_allowed, identify::identify, parser::parse, resolver::extract_repository,
    verify::verify, DeploymentExecutor, IncomingWebhook,
};

/// Terminal outcome of a webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Command launched for the repository.
    Accepted { repository: String },
    MalformedRequest,
    UnknownPlatform,
    BadSignature,
    EventNotAllowed,
    RepositoryUnknown,
}

impl DispatchResult {
    /// HTTP status code for the outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Accepted { .. } => 200,
            Self::MalformedRequest => 400,
            Self::BadSignature => 401,
            Self::RepositoryUnknown => 404,
            Self::EventNotAllowed => 406,
            Self::UnknownPlatform => 412,
        }
    }

    /// Short machine-friendly name, used as a metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted { .. } => "accepted",
            Self::MalformedRequest => "malformed_request",
            Self::BadSignature => "bad_signature",
            Self::RepositoryUnknown => "repository_unknown",
            Self::EventNotAllowed => "event_not_allowed",
            Self::UnknownPlatform => "unknown_platform",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Run a webhook through parsing, identification, verification, event
/// filtering and repository resolution, then launch its command.
///
/// The executor is only called on the accepted path.
#[tracing::instrument(
    skip_all,
    fields(platform = tracing::field::Empty, event = tracing::field::Empty, repository = tracing::field::Empty)
)]
pub fn dispatch(
    webhook: &IncomingWebhook,
    snapshot: &ConfigSnapshot,
    executor: &dyn DeploymentExecutor,
) -> DispatchResult {
    let span = Span::current();

    let payload = match parse(&webhook.body, &webhook.content_type) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Malformed request");
            return DispatchResult::MalformedRequest;
        }
    };

    let Some(identification) = identify(&webhook.headers, snapshot) else {
        warn!("Unknown platform");
        return DispatchResult::UnknownPlatform;
    };

    let platform = identification.platform;
    let event = identification.event.as_deref();
    span.record("platform", tracing::field::display(platform));
    if let Some(event) = event {
        span.record("event", event);
    }

    let config = snapshot.platform(platform);
    if config.verify {
        if let Err(failure) = verify(platform, webhook, snapshot) {
            if failure.is_configuration_fault() {
                error!(reason = %failure, "Verification misconfigured");
            } else {
                warn!(reason = %failure, "Verification failed");
            }
            return DispatchResult::BadSignature;
        }
    } else {
        debug!("Verification disabled");
    }

    if !is_event_allowed(event, config) {
        warn!("Event not allowed");
        return DispatchResult::EventNotAllowed;
    }

    let Some(repository) = extract_repository(&payload, platform, snapshot) else {
        warn!("Repository identifier not found in payload");
        return DispatchResult::RepositoryUnknown;
    };
    span.record("repository", repository.as_str());

    let Some(repository_config) = snapshot.repository(&repository) else {
        warn!("Repository not configured");
        return DispatchResult::RepositoryUnknown;
    };

    info!(cwd = %repository_config.cwd.display(), "Launching deployment command");
    executor.launch(&repository, repository_config);

    DispatchResult::Accepted { repository }
}
