//! # Identity Generation
//!
//! Every row, doc-meta item, and page carries an opaque string id that is minted
//! once and never recomputed. All addressing (update, delete, insert-after,
//! page breaks) goes through these ids, never through array positions.
//!
//! Id minting is injected through the [`IdGenerator`] trait rather than read from
//! a process-wide random source:
//!
//! - [`UuidIds`]: production generator, UUID v4 strings.
//! - [`SequentialIds`]: deterministic `"{prefix}-{n}"` sequence for tests.
//!
//! Generators take `&self` so a single generator can be shared by the codec,
//! the outline parser and the pagination engine within one operation.

use std::cell::Cell;
use uuid::Uuid;

/// Produces globally unique opaque identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

/// Random UUID v4 ids. Collisions are negligible without any coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic ids: `row-1`, `row-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.get() - 1
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.get();
        self.next.set(n + 1);
        format!("{}-{}", self.prefix, n)
    }
}
