//! Oracle backed by a hosted language model.

use super::{MoveOracle, OracleError, OracleErrorKind, OracleRequest, SYSTEM_PROMPT, render_prompt};
use crate::llm_client::{LlmClient, LlmError, LlmErrorKind};
use tracing::{debug, instrument};

/// [`MoveOracle`] that renders each request as a chat prompt.
#[derive(Debug, Clone)]
pub struct LlmOracle {
    client: LlmClient,
    name: String,
}

impl LlmOracle {
    /// Wraps an LLM client.
    #[instrument(skip(client))]
    pub fn new(client: LlmClient) -> Self {
        let name = format!("{:?}/{}", client.config().provider(), client.config().model());
        debug!(oracle = %name, "Creating LLM oracle");
        Self { client, name }
    }
}

#[async_trait::async_trait]
impl MoveOracle for LlmOracle {
    #[instrument(skip(self, request), fields(oracle = %self.name, purpose = %request.purpose, generation = request.generation))]
    async fn request_text(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let prompt = render_prompt(request);
        Ok(self.client.generate(SYSTEM_PROMPT, &prompt).await?)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// A request that never completed is a transport failure; anything the provider answered is a service failure.
impl From<LlmError> for OracleError {
    #[track_caller]
    fn from(err: LlmError) -> Self {
        let kind = match err.kind {
            LlmErrorKind::Request => OracleErrorKind::Transport,
            LlmErrorKind::Status | LlmErrorKind::Decode => OracleErrorKind::Service,
        };
        OracleError::new(kind, err.message)
    }
}
