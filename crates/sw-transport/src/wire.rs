//! The state message agents broadcast every tick.
//!
//! Encoded as a JSON object:
//!
//! ```json
//! {"id": 3, "position": [1.5, 2.0], "velocity": [0.1, -0.2], "t": 1718000000.25}
//! ```
//!
//! Unknown fields are ignored.  A missing or mistyped field fails decoding.
//! Non-finite numbers encode as `null` and therefore fail to decode on the
//! receiving side.

use serde::{Deserialize, Serialize};
use sw_core::{AgentId, DVec2, NeighborRecord};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("wire codec error: {0}")]
pub struct WireError(#[from] serde_json::Error);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    pub id:       u32,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    /// Sender wall-clock time, Unix seconds.
    pub t:        f64,
}

impl StateMessage {
    pub fn new(id: AgentId, position: DVec2, velocity: DVec2, t: f64) -> Self {
        Self { id: id.0, position: position.to_array(), velocity: velocity.to_array(), t }
    }

    #[inline]
    pub fn agent(&self) -> AgentId {
        AgentId(self.id)
    }

    pub fn into_record(self) -> NeighborRecord {
        NeighborRecord {
            id:        self.agent(),
            position:  DVec2::from_array(self.position),
            velocity:  DVec2::from_array(self.velocity),
            timestamp: self.t,
        }
    }
}

pub fn encode(msg: &StateMessage) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(msg)?)
}

pub fn decode(payload: &[u8]) -> Result<StateMessage, WireError> {
    Ok(serde_json::from_slice(payload)?)
}
