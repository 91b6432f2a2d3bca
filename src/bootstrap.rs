//! Composition root - builds the process-wide selection pipeline.
//!
//! Everything is constructed once at startup from [`AppConfig`] and handed
//! to [`SelectToolHandler`] as explicit dependencies. Exactly one selection
//! backend is built, chosen by `selector.backend`.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::adapters::ai::{
    HostedConfig, HostedSelectionBackend, LocalBackendConfig, LocalSelectionBackend,
};
use crate::adapters::embedding::{HashingEmbedding, RemoteEmbedding, RemoteEmbeddingConfig};
use crate::adapters::postgres::PostgresToolCatalog;
use crate::application::SelectToolHandler;
use crate::config::{
    AppConfig, BackendKind, EmbeddingProvider, EmbeddingSettings, HostedBackendConfig,
    LocalBackendSettings, ValidationError,
};
use crate::domain::selection::SimilarityRanker;
use crate::ports::{
    BackendError, CatalogError, EmbeddingEngine, EmbeddingError, SelectionBackend, ToolCatalog,
};

/// Errors raised while wiring the pipeline.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("catalog setup failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("embedding engine setup failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("selection backend setup failed: {0}")]
    Backend(#[from] BackendError),
}

/// Connects the catalog and builds the handler from configuration.
pub async fn build_select_tool_handler(
    config: &AppConfig,
) -> Result<SelectToolHandler, BootstrapError> {
    config.validate()?;

    let catalog: Arc<dyn ToolCatalog> =
        Arc::new(PostgresToolCatalog::connect(&config.database).await?);

    build_with_catalog(config, catalog)
}

/// Builds the handler around an already-constructed catalog.
pub fn build_with_catalog(
    config: &AppConfig,
    catalog: Arc<dyn ToolCatalog>,
) -> Result<SelectToolHandler, BootstrapError> {
    let engine = build_embedding_engine(&config.embedding)?;
    let backend = build_selection_backend(config)?;

    info!(
        backend = backend.backend_name(),
        embedding = engine.name(),
        top_k = config.selector.top_k,
        "selection pipeline ready"
    );

    Ok(
        SelectToolHandler::new(catalog, SimilarityRanker::new(engine), backend)
            .with_top_k(config.selector.top_k),
    )
}

/// Builds the configured embedding engine.
pub fn build_embedding_engine(
    settings: &EmbeddingSettings,
) -> Result<Arc<dyn EmbeddingEngine>, BootstrapError> {
    match settings.provider {
        EmbeddingProvider::Hashing => Ok(Arc::new(HashingEmbedding::new(settings.dimensions))),
        EmbeddingProvider::Remote => {
            let mut remote =
                RemoteEmbeddingConfig::new(&settings.base_url, &settings.model, settings.dimensions)
                    .with_timeout(settings.timeout());
            if let Some(key) = settings.api_key.as_deref().filter(|k| !k.is_empty()) {
                remote = remote.with_api_key(key);
            }
            Ok(Arc::new(RemoteEmbedding::new(remote)?))
        }
    }
}

/// Builds exactly one selection backend for the configured variant.
pub fn build_selection_backend(
    config: &AppConfig,
) -> Result<Arc<dyn SelectionBackend>, BootstrapError> {
    match config.selector.backend {
        BackendKind::Hosted => Ok(Arc::new(hosted_backend(&config.hosted)?)),
        BackendKind::Local => Ok(Arc::new(local_backend(&config.local)?)),
    }
}

fn hosted_backend(
    settings: &HostedBackendConfig,
) -> Result<HostedSelectionBackend, BootstrapError> {
    let api_key = settings
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;

    let config = HostedConfig::new(api_key)
        .with_model(&settings.model)
        .with_base_url(&settings.base_url)
        .with_timeout(settings.timeout());
    Ok(HostedSelectionBackend::new(config)?)
}

fn local_backend(settings: &LocalBackendSettings) -> Result<LocalSelectionBackend, BootstrapError> {
    let config = LocalBackendConfig::new(&settings.endpoint, &settings.model_name)
        .with_adapter_id(&settings.adapter_id)
        .with_timeout(settings.timeout());
    Ok(LocalSelectionBackend::new(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryToolCatalog;
    use crate::config::{DatabaseConfig, SelectorConfig};

    fn config(backend: BackendKind) -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                url: "postgresql://localhost/tools".to_string(),
                ..Default::default()
            },
            selector: SelectorConfig { backend, top_k: 3 },
            hosted: HostedBackendConfig {
                api_key: Some("sk-test".to_string()),
                ..Default::default()
            },
            embedding: EmbeddingSettings {
                provider: EmbeddingProvider::Hashing,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn builds_local_backend_by_default() {
        let backend = build_selection_backend(&config(BackendKind::Local)).unwrap();
        assert_eq!(backend.backend_name(), "local");
    }

    #[test]
    fn builds_hosted_backend_when_configured() {
        let backend = build_selection_backend(&config(BackendKind::Hosted)).unwrap();
        assert_eq!(backend.backend_name(), "hosted");
    }

    #[test]
    fn hosted_backend_requires_key() {
        let mut config = config(BackendKind::Hosted);
        config.hosted.api_key = None;
        assert!(matches!(
            build_selection_backend(&config),
            Err(BootstrapError::Config(ValidationError::MissingRequired(_)))
        ));
    }

    #[test]
    fn builds_configured_embedding_engine() {
        let hashing = build_embedding_engine(&EmbeddingSettings {
            provider: EmbeddingProvider::Hashing,
            dimensions: 32,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(hashing.name(), "hashing");
        assert_eq!(hashing.dimensions(), 32);

        let remote = build_embedding_engine(&EmbeddingSettings::default()).unwrap();
        assert_eq!(remote.name(), "remote");
        assert_eq!(remote.dimensions(), 384);
    }

    #[test]
    fn handler_uses_configured_top_k() {
        let handler = build_with_catalog(
            &config(BackendKind::Hosted),
            Arc::new(InMemoryToolCatalog::new()),
        )
        .unwrap();
        assert_eq!(handler.top_k(), 3);
        assert_eq!(handler.backend_name(), "hosted");
    }
}
