use crate::error::EngineError;
use async_trait::async_trait;
use core_types::{InvestmentAnalysis, RecommendationPayload};
use std::path::{Path, PathBuf};

/// Where a run's buy and avoid recommendations come from.
///
/// Producing the analysis (news retrieval, prompting) happens upstream; the
/// pipeline only consumes the finished payload. The payload keeps the
/// recommender's JSON as sent so a run can report it back unchanged.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch(&self) -> Result<RecommendationPayload, EngineError>;
}

/// Reads a recommender payload from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecommendationSource for JsonFileSource {
    async fn fetch(&self) -> Result<RecommendationPayload, EngineError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| EngineError::Source(format!("{}: {}", self.path.display(), e)))?;
        let payload = RecommendationPayload::from_json(&text)?;
        tracing::info!(
            path = %self.path.display(),
            buy = payload.analysis.stocks_to_invest.len(),
            avoid = payload.analysis.stocks_to_avoid.len(),
            "Loaded recommendations."
        );
        Ok(payload)
    }
}

/// An analysis that is already in memory.
#[async_trait]
impl RecommendationSource for InvestmentAnalysis {
    async fn fetch(&self) -> Result<RecommendationPayload, EngineError> {
        Ok(self.clone().into())
    }
}

#[async_trait]
impl RecommendationSource for RecommendationPayload {
    async fn fetch(&self) -> Result<RecommendationPayload, EngineError> {
        Ok(self.clone())
    }
}
