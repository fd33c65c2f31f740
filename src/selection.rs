use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::models::CourseId;

/// Most credits a student may hold pending at once.
pub const DEFAULT_CREDIT_LIMIT: f64 = 18.0;

/// Which courses are picked but not submitted (pending) and which are
/// submitted for good (confirmed). The two sets never overlap: ids only move
/// from pending to confirmed and nothing leaves confirmed.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pending: HashSet<CourseId>,
    // Pending ids in the order they were picked; credits are summed in this
    // order so totals do not depend on hashing.
    pending_order: Vec<CourseId>,
    confirmed: HashSet<CourseId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` to pending, or removes it if already there.
    ///
    /// Callers must not pass a confirmed id; this is not re-checked here.
    pub fn toggle_pending(&mut self, id: CourseId) {
        if self.pending.remove(&id) {
            self.pending_order.retain(|pending| *pending != id);
        } else {
            self.pending.insert(id);
            self.pending_order.push(id);
        }
    }

    pub fn is_pending(&self, id: CourseId) -> bool {
        self.pending.contains(&id)
    }

    pub fn is_confirmed(&self, id: CourseId) -> bool {
        self.confirmed.contains(&id)
    }

    /// Sum of the credits of every pending course. Ids missing from
    /// `catalog` count as zero.
    pub fn pending_credit_total(&self, catalog: &Catalog) -> f64 {
        self.pending_order
            .iter()
            .fold(0.0, |total, id| total + catalog.credit_of(*id))
    }

    /// Whether adding `id` keeps the pending total within `limit`. Only
    /// meaningful before an add; removing a pending course is never limited.
    pub fn can_add(&self, id: CourseId, catalog: &Catalog, limit: f64) -> bool {
        self.pending_credit_total(catalog) + catalog.credit_of(id) <= limit
    }

    /// Moves every pending id into confirmed. There is no way back.
    pub fn confirm_pending(&mut self) {
        self.pending.clear();
        self.confirmed.extend(self.pending_order.drain(..));
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn has_confirmed(&self) -> bool {
        !self.confirmed.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn confirmed_len(&self) -> usize {
        self.confirmed.len()
    }

    /// Submission is a one-time action: it needs something pending and is
    /// closed once anything has been confirmed.
    pub fn confirm_enabled(&self) -> bool {
        !self.has_confirmed() && self.has_pending()
    }

    pub fn pending_ids(&self) -> Vec<CourseId> {
        sorted(&self.pending)
    }

    pub fn confirmed_ids(&self) -> Vec<CourseId> {
        sorted(&self.confirmed)
    }
}

fn sorted(ids: &HashSet<CourseId>) -> Vec<CourseId> {
    let mut ids: Vec<CourseId> = ids.iter().copied().collect();
    ids.sort();
    ids
}
