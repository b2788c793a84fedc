use crate::board::Position;

/// Bucket count; power of two so the hash folds with a mask.
const BUCKET_COUNT: usize = 16_384;

/// Lifecycle of a cached score. `Finding` marks an entry whose subtree is
/// currently being searched, so siblings reaching the same position skip it
/// instead of recursing into a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryState {
    NotSet,
    Finding,
    Found,
}

#[derive(Debug, Clone)]
struct Entry {
    position: Position,
    state: EntryState,
    score: i32,
}

/// Handle to one entry. Entries are only ever appended within a bucket, so a
/// handle taken before a recursive search stays valid afterwards even though
/// the bucket vector may have grown.
pub(crate) type EntryHandle = (usize, usize);

/// Score cache for one search iteration, keyed by Zobrist hash with full
/// position equality inside a bucket to resolve collisions.
pub(crate) struct TranspositionTable {
    buckets: Vec<Vec<Entry>>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        TranspositionTable {
            buckets: vec![Vec::new(); BUCKET_COUNT],
        }
    }

    /// Locate the entry for `pos`, inserting a fresh `NotSet` one if absent.
    pub fn find_or_insert(&mut self, pos: &Position) -> EntryHandle {
        let b = (pos.hash() as usize) & (BUCKET_COUNT - 1);
        let bucket = &mut self.buckets[b];
        if let Some(i) = bucket.iter().position(|e| e.position == *pos) {
            return (b, i);
        }
        bucket.push(Entry {
            position: pos.clone(),
            state: EntryState::NotSet,
            score: 0,
        });
        (b, bucket.len() - 1)
    }

    #[inline(always)]
    pub fn state(&self, (b, i): EntryHandle) -> EntryState {
        self.buckets[b][i].state
    }

    #[inline(always)]
    pub fn score(&self, (b, i): EntryHandle) -> i32 {
        self.buckets[b][i].score
    }

    #[inline(always)]
    pub fn set_state(&mut self, (b, i): EntryHandle, state: EntryState) {
        self.buckets[b][i].state = state;
    }

    #[inline(always)]
    pub fn set_score(&mut self, (b, i): EntryHandle, score: i32) {
        self.buckets[b][i].score = score;
    }
}
