use tracing::error;
use wayfinder_core::{RouterError, RouterResponse};
use wayfinder_intent::QueryRouter;

use super::build_router;

/// Input parameters for the Route command strategy.
#[derive(Debug, Clone)]
pub struct RouteInput {
    pub query: String,
}

/// Strategy for routing a single query.
///
/// Prints the response as pretty JSON on stdout; logs go to stderr.
#[derive(Debug, Clone, Copy)]
pub struct RouteStrategy;

impl super::CommandStrategy for RouteStrategy {
    type Input = RouteInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let router = build_router();
        let response = respond(router.as_ref(), &input.query).await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        if let Ok(router) = router {
            router.finish_pending_saves().await;
        }
        Ok(())
    }
}

/// Only a blank query is an error. A router that could not be built still
/// answers, with the degraded body.
async fn respond(
    router: Result<&QueryRouter, &anyhow::Error>,
    query: &str,
) -> Result<RouterResponse, RouterError> {
    if query.trim().is_empty() {
        return Err(RouterError::validation("Query is required"));
    }
    match router {
        Ok(router) => router.route(query).await,
        Err(e) => {
            error!("Router unavailable: {e:#}");
            Ok(RouterResponse::degraded(query))
        }
    }
}
