use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Counting semaphore bounding the number of probe sequences in flight.
pub struct ConcurrencyBudget {
    limit: usize,
    in_flight: Mutex<usize>,
    changed: Condvar,
}

/// A slot taken from a `ConcurrencyBudget`, given back on drop.
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct BudgetPermit<'a> {
    budget: &'a ConcurrencyBudget,
}

impl ConcurrencyBudget {
    /// A limit of zero would never admit anything and is raised to one.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        ConcurrencyBudget { limit: limit.max(1), in_flight: Mutex::new(0), changed: Condvar::new() }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        *self.lock()
    }

    /// Blocks until fewer than `limit` slots are taken, then takes one.
    pub fn acquire(&self) -> BudgetPermit<'_> {
        let mut in_flight = self.lock();
        while *in_flight >= self.limit {
            in_flight = self.changed.wait(in_flight).unwrap_or_else(PoisonError::into_inner);
        }
        *in_flight += 1;
        BudgetPermit { budget: self }
    }

    /// Blocks until every permit has been dropped.
    pub fn wait_idle(&self) {
        let mut in_flight = self.lock();
        while *in_flight > 0 {
            in_flight = self.changed.wait(in_flight).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn release(&self) {
        let mut in_flight = self.lock();
        *in_flight -= 1;
        self.changed.notify_all();
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for BudgetPermit<'_> {
    fn drop(&mut self) {
        self.budget.release();
    }
}
