//! Identifier generation for records and advice items.

use uuid::Uuid;

/// Source of unique ids. Injected wherever new records or advice are created.
pub trait IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Stable seed plus a monotonically increasing counter.
///
/// Ids look like `tip-<seed>-<n>` and never repeat for one generator.
#[derive(Debug, Clone)]
pub struct SequenceIds {
    seed: String,
    next: u64,
}

impl SequenceIds {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequenceIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}-{}-{}", prefix, self.seed, n)
    }
}

/// Random v4 UUIDs, used for stored transactions and goals.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }
}
