use std::sync::Arc;

use log::{debug, info};

use crate::error::{StageError, StageResult};

use super::{
    prompts, Credential, FormatError, OracleRequest, SuggestionCache, SuggestionOracle,
    SuggestionRequest,
};

/// Memoizing front of a [`SuggestionOracle`].
///
/// Identical requests (same stage, same inputs) are answered from the cache
/// unless the caller asks for a refresh, which re-queries and replaces the
/// stored answer.
pub struct SuggestionService {
    oracle: Arc<dyn SuggestionOracle>,
    cache: SuggestionCache,
}

impl SuggestionService {
    pub fn new(oracle: Arc<dyn SuggestionOracle>) -> Self {
        Self {
            oracle,
            cache: SuggestionCache::new(),
        }
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub async fn suggest<T>(
        &mut self,
        request: &SuggestionRequest,
        credential: &Credential,
        refresh: bool,
        parse: fn(&str) -> Result<T, FormatError>,
    ) -> StageResult<T> {
        let key = request.cache_key();

        if !refresh {
            if let Some(raw) = self.cache.get(&key) {
                debug!("{} suggestions served from cache", request.stage_name());
                return parse(raw).map_err(into_stage_error);
            }
        }

        let call = OracleRequest {
            messages: prompts::render(request),
            credential: credential.clone(),
        };
        let raw = self.oracle.complete(&call).await?;
        let parsed = parse(&raw).map_err(into_stage_error)?;

        info!("{} suggestions received", request.stage_name());
        self.cache.insert(key, raw);
        Ok(parsed)
    }
}

fn into_stage_error(err: FormatError) -> StageError {
    StageError::SuggestionFormat {
        reason: err.reason,
        raw: err.raw,
    }
}
