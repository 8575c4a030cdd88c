//! Application state and service initialization
//!
//! This module centralizes service wiring so handlers receive a fully built
//! research service and tests can construct one the same way.

use std::sync::Arc;

use crate::model::Config;
use crate::retriever::HttpFetcher;
use crate::service::{Classifier, LegalResearchService, PrecedentSource};

/// Application state containing all services
pub struct AppState {
    pub research_service: Arc<LegalResearchService>,
}

impl AppState {
    /// Validate configuration and build the service graph
    pub fn new(config: Config) -> Result<Self, AppError> {
        let precedents = config.sources.harassment_precedents;
        if precedents.link_fragment.is_empty() {
            return Err(AppError::InvalidConfig(
                "sources.harassment_precedents.link_fragment must not be empty",
            ));
        }
        let precedents = PrecedentSource::try_from(precedents).map_err(|source| {
            AppError::InvalidUrl {
                field: "sources.harassment_precedents.url",
                source,
            }
        })?;

        tracing::info!(
            url = %precedents.url,
            timeout_ms = config.fetch.effective_timeout_ms(),
            "Precedent source configured"
        );

        let classifier = Classifier::from_config(&config.classifier);

        let research_service = Arc::new(LegalResearchService::new(
            Arc::new(HttpFetcher::new()),
            classifier,
            config.fetch,
            precedents,
        ));

        Ok(Self { research_service })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Configured URL does not parse
    #[error("Invalid URL in {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
}
