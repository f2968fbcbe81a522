use sw_core::{AgentId, CoreError};
use sw_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("cannot bind transport for {agent}: {source}")]
    Bind {
        agent:  AgentId,
        #[source]
        source: TransportError,
    },

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;
