//! Unit of work — the transaction-scoped boundary of one request.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::aggregate::{AggregateRoot, SharedAggregate};
use crate::error::DomainError;

/// Boxed future used by the transactional combinator's callbacks.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Transaction coordinator tracking which aggregate roots a request
/// touched, so events can be published around the commit.
///
/// One instance per request; nesting is not supported.
#[async_trait]
pub trait UnitOfWork<A: AggregateRoot>: Send {
    /// Opens a new transaction. Fails if one is already open.
    async fn start(&mut self) -> Result<(), DomainError>;

    /// Finalizes the transaction and clears the tracked state. A commit
    /// failure propagates unchanged; the caller treats it as a rollback
    /// trigger.
    async fn commit(&mut self) -> Result<(), DomainError>;

    /// Aborts the transaction and clears the tracked state.
    async fn rollback(&mut self) -> Result<(), DomainError>;

    /// Registers an aggregate root for later event harvesting. Adding the
    /// same handle twice is a no-op (set semantics by handle identity).
    fn add_aggregate_root(&mut self, root: SharedAggregate<A>);

    /// Snapshot of the registered roots, in registration order.
    fn aggregate_roots(&self) -> Vec<SharedAggregate<A>>;
}

/// Runs `work` inside `uow`'s start/commit lifecycle. If `work` or the
/// commit fails, the transaction is rolled back and the original error is
/// returned unchanged.
///
/// # Errors
///
/// Whatever `start`, `work`, or `commit` failed with; a secondary
/// rollback failure is logged and swallowed so the original error wins.
pub async fn run_in_transaction<A, U, T, F>(uow: &mut U, work: F) -> Result<T, DomainError>
where
    A: AggregateRoot,
    U: UnitOfWork<A>,
    F: for<'a> FnOnce(&'a mut U) -> BoxFuture<'a, Result<T, DomainError>>,
{
    uow.start().await?;
    let outcome = work(uow).await;
    match outcome {
        Ok(value) => match uow.commit().await {
            Ok(()) => Ok(value),
            Err(commit_err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback after failed commit also failed");
                }
                Err(commit_err)
            }
        },
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback after failed work also failed");
            }
            Err(err)
        }
    }
}

/// Unit of work whose transaction is a plain active flag. Backs unit
/// tests and defines the reference lifecycle semantics.
#[derive(Debug)]
pub struct InMemoryUnitOfWork<A> {
    active: bool,
    roots: Vec<SharedAggregate<A>>,
}

impl<A> InMemoryUnitOfWork<A> {
    /// Creates an idle unit of work.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: false,
            roots: Vec::new(),
        }
    }

    /// Whether a transaction is currently open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<A> Default for InMemoryUnitOfWork<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A: AggregateRoot> UnitOfWork<A> for InMemoryUnitOfWork<A> {
    async fn start(&mut self) -> Result<(), DomainError> {
        if self.active {
            return Err(DomainError::Transaction(
                "transaction already started".into(),
            ));
        }
        self.active = true;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::Transaction(
                "no open transaction to commit".into(),
            ));
        }
        self.active = false;
        self.roots.clear();
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DomainError> {
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
