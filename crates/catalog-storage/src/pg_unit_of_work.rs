//! PostgreSQL-backed unit of work.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::aggregate::{AggregateRoot, SharedAggregate};
use catalog_core::error::DomainError;
use catalog_core::uow::UnitOfWork;
use sqlx::{PgPool, Postgres, Transaction};

/// Unit of work holding one `sqlx` transaction per request. Repositories
/// participating in the request bind their statements through
/// [`PgUnitOfWork::transaction`].
#[derive(Debug)]
pub struct PgUnitOfWork<A> {
    pool: PgPool,
    transaction: Option<Transaction<'static, Postgres>>,
    roots: Vec<SharedAggregate<A>>,
}

impl<A> PgUnitOfWork<A> {
    /// Creates an idle unit of work over the shared pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            transaction: None,
            roots: Vec::new(),
        }
    }

    /// The open transaction, for repositories to attach their writes to.
    ///
    /// # Errors
    ///
    /// `DomainError::Transaction` when called before `start`.
    pub fn transaction(&mut self) -> Result<&mut Transaction<'static, Postgres>, DomainError> {
        self.transaction
            .as_mut()
            .ok_or_else(|| DomainError::Transaction("unit of work not started".into()))
    }
}

#[async_trait]
impl<A: AggregateRoot> UnitOfWork<A> for PgUnitOfWork<A> {
    async fn start(&mut self) -> Result<(), DomainError> {
        if self.transaction.is_some() {
            return Err(DomainError::Transaction(
                "transaction already started".into(),
            ));
        }
        let transaction = self
            .pool
            .begin()
            .await
            .map_err(|err| DomainError::Transaction(err.to_string()))?;
        self.transaction = Some(transaction);
        tracing::debug!("transaction started");
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        let transaction = self.transaction.take().ok_or_else(|| {
            DomainError::Transaction("no open transaction to commit".into())
        })?;
        transaction
            .commit()
            .await
            .map_err(|err| DomainError::Transaction(err.to_string()))?;
        self.roots.clear();
        tracing::debug!("transaction committed");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DomainError> {
        let transaction = self.transaction.take().ok_or_else(|| {
            DomainError::Transaction("no open transaction to roll back".into())
        })?;
        transaction
            .rollback()
            .await
            .map_err(|err| DomainError::Transaction(err.to_string()))?;
        self.roots.clear();
        tracing::debug!("transaction rolled back");
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
