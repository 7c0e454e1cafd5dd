//! Resolution record.
//!
//! Every registration, start, finish and skip is appended here in the order
//! it happened. The queue caps the log: past its limit the oldest half is
//! dropped and counted in [`ResolutionLog::dropped`]. Callers that need the
//! whole match drain it with `take_resolution_log` between rounds. Two runs from the same seed and the same decisions produce
//! identical logs; `encode` gives a compact byte form for comparing them.

use serde::{Deserialize, Serialize};

use crate::events::EventKind;

use super::TriggerId;

/// One step of trigger resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionEntry {
    /// A trigger was queued.
    Registered {
        trigger: TriggerId,
        kind: EventKind,
        priority: i32,
        name: String,
    },
    /// Resolution of a kind began.
    Opened { kind: EventKind },
    /// A trigger's action was invoked.
    Started {
        trigger: TriggerId,
        kind: EventKind,
        name: String,
    },
    /// A trigger's completion was signaled.
    Finished { trigger: TriggerId },
    /// A trigger's condition failed; its action never ran.
    Skipped { trigger: TriggerId, name: String },
    /// Resolution of a kind ended.
    Closed { kind: EventKind },
}

/// Append-only record of resolution steps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionLog {
    entries: Vec<ResolutionEntry>,
    dropped: u64,
}

impl ResolutionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, entry: ResolutionEntry) {
        self.entries.push(entry);
    }

    /// Drop the oldest entries once more than `limit` are held, keeping the
    /// newest half. A limit of 0 never drops.
    pub(crate) fn trim(&mut self, limit: usize) {
        if limit == 0 || self.entries.len() <= limit {
            return;
        }
        let excess = self.entries.len() - limit / 2;
        self.entries.drain(..excess);
        self.dropped += excess as u64;
    }

    /// Entries discarded by the cap so far.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ResolutionEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the log empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of started triggers, in start order.
    #[must_use]
    pub fn started(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                ResolutionEntry::Started { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.dropped = 0;
    }

    /// Encode the log with bincode.
    pub fn encode(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Decode a log produced by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResolutionLog {
        let mut log = ResolutionLog::new();
        log.record(ResolutionEntry::Registered {
            trigger: TriggerId::new(1),
            kind: EventKind::COMBAT_PHASE_START,
            priority: 0,
            name: "Stress".into(),
        });
        log.record(ResolutionEntry::Opened { kind: EventKind::COMBAT_PHASE_START });
        log.record(ResolutionEntry::Started {
            trigger: TriggerId::new(1),
            kind: EventKind::COMBAT_PHASE_START,
            name: "Stress".into(),
        });
        log.record(ResolutionEntry::Finished { trigger: TriggerId::new(1) });
        log.record(ResolutionEntry::Closed { kind: EventKind::COMBAT_PHASE_START });
        log
    }

    #[test]
    fn test_started_names() {
        let log = sample();
        assert_eq!(log.len(), 5);
        assert_eq!(log.started(), vec!["Stress"]);
    }

    #[test]
    fn test_bincode_encoding() {
        let log = sample();
        let bytes = log.encode().unwrap();
        assert_eq!(ResolutionLog::decode(&bytes).unwrap(), log);
        assert_eq!(sample().encode().unwrap(), bytes);
    }

    #[test]
    fn test_trim_keeps_newest_half() {
        let mut log = ResolutionLog::new();
        for id in 1..=9 {
            log.record(ResolutionEntry::Finished { trigger: TriggerId::new(id) });
            log.trim(8);
        }
        assert_eq!(log.len(), 4);
        assert_eq!(log.dropped(), 5);
        assert_eq!(log.entries()[0], ResolutionEntry::Finished { trigger: TriggerId::new(6) });

        let mut unbounded = sample();
        unbounded.trim(0);
        assert_eq!(unbounded.len(), 5);
    }

    #[test]
    fn test_clear() {
        let mut log = sample();
        log.clear();
        assert!(log.is_empty());
    }
}
