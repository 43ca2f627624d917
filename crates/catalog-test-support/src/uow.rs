//! Recording unit-of-work double.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::aggregate::{AggregateRoot, SharedAggregate};
use catalog_core::error::DomainError;
use catalog_core::uow::UnitOfWork;

use crate::handlers::CallLog;

/// Unit of work double that counts lifecycle calls and, when given a
/// shared call log, writes `start`/`commit`/`rollback` markers into it so
/// ordering against event handlers can be asserted.
pub struct RecordingUnitOfWork<A> {
    active: bool,
    roots: Vec<SharedAggregate<A>>,
    starts: usize,
    commits: usize,
    rollbacks: usize,
    fail_on_commit: bool,
    call_log: Option<CallLog>,
}

impl<A> RecordingUnitOfWork<A> {
    /// Creates an idle recording unit of work.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: false,
            roots: Vec::new(),
            starts: 0,
            commits: 0,
            rollbacks: 0,
            fail_on_commit: false,
            call_log: None,
        }
    }

    /// Attaches a shared call log receiving lifecycle markers.
    #[must_use]
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.call_log = Some(log);
        self
    }

    /// Makes every commit fail, for rollback-path tests.
    #[must_use]
    pub fn failing_on_commit(mut self) -> Self {
        self.fail_on_commit = true;
        self
    }

    /// How many times `start` was called.
    #[must_use]
    pub fn start_count(&self) -> usize {
        self.starts
    }

    /// How many times `commit` was called.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// How many times `rollback` was called.
    #[must_use]
    pub fn rollback_count(&self) -> usize {
        self.rollbacks
    }

    fn log(&self, marker: &'static str) {
        if let Some(log) = &self.call_log {
            log.lock().unwrap().push(marker);
        }
    }
}

impl<A> Default for RecordingUnitOfWork<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A: AggregateRoot> UnitOfWork<A> for RecordingUnitOfWork<A> {
    async fn start(&mut self) -> Result<(), DomainError> {
        self.starts += 1;
        self.log("start");
        if self.active {
            return Err(DomainError::Transaction(
                "transaction already started".into(),
            ));
        }
        self.active = true;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        self.commits += 1;
        self.log("commit");
        if !self.active {
            return Err(DomainError::Transaction(
                "no open transaction to commit".into(),
            ));
        }
        if self.fail_on_commit {
            return Err(DomainError::Transaction("commit refused".into()));
        }
        self.active = false;
        self.roots.clear();
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DomainError> {
        self.rollbacks += 1;
        self.log("rollback");
        if !self.active {
            return Err(DomainError::Transaction(
                "no open transaction to roll back".into(),
            ));
        }
        self.active = false;
        self.roots.clear();
        Ok(())
    }

    fn add_aggregate_root(&mut self, root: SharedAggregate<A>) {
        if !self.roots.iter().any(|known| Arc::ptr_eq(known, &root)) {
            self.roots.push(root);
        }
    }

    fn aggregate_roots(&self) -> Vec<SharedAggregate<A>> {
        self.roots.clone()
    }
}
