//! Last-known states of other agents.
//!
//! A `NeighborTable` belongs to exactly one agent and is written only by that
//! agent's listener.  Records are replaced wholesale on every accepted packet:
//! there are no sequence numbers, so a delayed packet carrying an older
//! timestamp still overwrites a newer record.  Records never expire.

use glam::DVec2;
use rustc_hash::FxHashMap;

use crate::AgentId;

/// The most recent state heard from one neighbor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NeighborRecord {
    pub id:        AgentId,
    pub position:  DVec2,
    pub velocity:  DVec2,
    /// Sender wall-clock time (`t` on the wire), Unix seconds.
    pub timestamp: f64,
}

/// Per-agent map of `AgentId → NeighborRecord`.
///
/// The table knows its owner and refuses records keyed by the owner's id, so
/// no table can ever describe its own agent as a neighbor.
#[derive(Clone, Debug)]
pub struct NeighborTable {
    owner:   AgentId,
    records: FxHashMap<AgentId, NeighborRecord>,
}

impl NeighborTable {
    pub fn new(owner: AgentId) -> Self {
        Self { owner, records: FxHashMap::default() }
    }

    /// Build a table from `records`, skipping any keyed by `owner`.
    pub fn from_records(owner: AgentId, records: impl IntoIterator<Item = NeighborRecord>) -> Self {
        let mut table = Self::new(owner);
        for record in records {
            table.upsert(record);
        }
        table
    }

    #[inline]
    pub fn owner(&self) -> AgentId {
        self.owner
    }

    /// Insert or fully overwrite the record for `record.id`.
    ///
    /// Returns `false` (and stores nothing) when `record.id` is the owner.
    pub fn upsert(&mut self, record: NeighborRecord) -> bool {
        if record.id == self.owner {
            return false;
        }
        self.records.insert(record.id, record);
        true
    }

    pub fn get(&self, id: AgentId) -> Option<&NeighborRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.records.contains_key(&id)
    }

    /// Records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &NeighborRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
