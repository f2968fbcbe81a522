use sw_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

pub type AgentResult<T> = Result<T, AgentError>;
