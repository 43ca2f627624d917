//! Application service — orchestrates one request end to end.

use crate::aggregate::AggregateRoot;
use crate::error::DomainError;
use crate::mediator::DomainEventMediator;
use crate::uow::{BoxFuture, UnitOfWork};

/// Wraps a unit of work and a mediator so that one request's lifecycle is
/// always: start, run the use case, publish local events, commit, publish
/// integration events — or roll everything back.
pub struct ApplicationService<A, U>
where
    A: AggregateRoot,
    U: UnitOfWork<A>,
{
    uow: U,
    mediator: DomainEventMediator<A::Event>,
}

impl<A, U> ApplicationService<A, U>
where
    A: AggregateRoot,
    U: UnitOfWork<A>,
{
    /// Creates the service around a request-scoped unit of work and the
    /// mediator holding this service's subscribers.
    #[must_use]
    pub fn new(uow: U, mediator: DomainEventMediator<A::Event>) -> Self {
        Self { uow, mediator }
    }

    /// Opens the request's transaction.
    ///
    /// # Errors
    ///
    /// Propagates the unit of work's start failure.
    pub async fn start(&mut self) -> Result<(), DomainError> {
        self.uow.start().await
    }

    /// Publishes local events for every touched aggregate, commits, then
    /// publishes integration events for the same snapshot and clears the
    /// roots' recorded events.
    ///
    /// Local subscribers run before the transaction is durable; only
    /// integration events are guaranteed to follow a successful commit.
    ///
    /// # Errors
    ///
    /// Propagates the first publication or commit failure.
    pub async fn finish(&mut self) -> Result<(), DomainError> {
        let roots = self.uow.aggregate_roots();
        for root in &roots {
            let aggregate = root.lock().await;
            self.mediator.publish(&*aggregate).await?;
        }
        self.uow.commit().await?;
        for root in &roots {
            let aggregate = root.lock().await;
            self.mediator.publish_integration_events(&*aggregate).await?;
        }
        for root in &roots {
            root.lock().await.clear_recorded_events();
        }
        Ok(())
    }

    /// Rolls the request back.
    ///
    /// # Errors
    ///
    /// Propagates the unit of work's rollback failure.
    pub async fn fail(&mut self) -> Result<(), DomainError> {
        self.uow.rollback().await
    }

    /// Runs `callback` between `start` and `finish`; on any failure the
    /// request is rolled back and the original error is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Whatever `start`, the callback, or `finish` failed with.
    pub async fn run<T, F>(&mut self, callback: F) -> Result<T, DomainError>
    where
        F: for<'a> FnOnce(&'a mut U) -> BoxFuture<'a, Result<T, DomainError>>,
    {
        self.start().await?;
        let value = match callback(&mut self.uow).await {
            Ok(value) => value,
            Err(err) => {
                if let Err(rollback_err) = self.fail().await {
                    tracing::warn!(error = %rollback_err, "rollback after failed use case also failed");
                }
                return Err(err);
            }
        };
        if let Err(err) = self.finish().await {
            if let Err(rollback_err) = self.fail().await {
                tracing::warn!(error = %rollback_err, "rollback after failed finish also failed");
            }
            return Err(err);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::aggregate::{SharedAggregate, share};
    use crate::event::IntegrationEvent;
    use crate::mediator::{DomainEventHandler, IntegrationEventHandler};
    use crate::testing::{StubAggregate, StubEvent};
    use crate::uow::InMemoryUnitOfWork;

    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    /// Unit of work that writes its commits into a shared call log.
    struct LoggingUnitOfWork {
        inner: InMemoryUnitOfWork<StubAggregate>,
        log: CallLog,
    }

    #[async_trait]
    impl UnitOfWork<StubAggregate> for LoggingUnitOfWork {
        async fn start(&mut self) -> Result<(), DomainError> {
            self.log.lock().unwrap().push("start");
            self.inner.start().await
        }

        async fn commit(&mut self) -> Result<(), DomainError> {
            self.log.lock().unwrap().push("commit");
            self.inner.commit().await
        }

        async fn rollback(&mut self) -> Result<(), DomainError> {
            self.log.lock().unwrap().push("rollback");
            self.inner.rollback().await
        }

        fn add_aggregate_root(&mut self, root: SharedAggregate<StubAggregate>) {
            self.inner.add_aggregate_root(root);
        }

        fn aggregate_roots(&self) -> Vec<SharedAggregate<StubAggregate>> {
            self.inner.aggregate_roots()
        }
    }

    struct LoggingLocalHandler {
        log: CallLog,
    }

    #[async_trait]
    impl DomainEventHandler<StubEvent> for LoggingLocalHandler {
        async fn handle(&self, _event: &StubEvent) -> Result<(), DomainError> {
            self.log.lock().unwrap().push("local-event");
            Ok(())
        }
    }

    struct LoggingIntegrationHandler {
        log: CallLog,
    }

    #[async_trait]
    impl IntegrationEventHandler for LoggingIntegrationHandler {
        async fn handle(&self, _event: &IntegrationEvent) -> Result<(), DomainError> {
            self.log.lock().unwrap().push("integration-event");
            Ok(())
        }
    }

    fn service_with_log(log: &CallLog) -> ApplicationService<StubAggregate, LoggingUnitOfWork> {
        let mut mediator: DomainEventMediator<StubEvent> = DomainEventMediator::new();
        mediator.register(Arc::new(LoggingLocalHandler {
            log: Arc::clone(log),
        }));
        mediator.register_integration(Arc::new(LoggingIntegrationHandler {
            log: Arc::clone(log),
        }));
        let uow = LoggingUnitOfWork {
            inner: InMemoryUnitOfWork::new(),
            log: Arc::clone(log),
        };
        ApplicationService::new(uow, mediator)
    }

    #[tokio::test]
    async fn test_finish_publishes_local_then_commits_then_integration() {
        // Arrange
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let mut service = service_with_log(&log);

        let mut aggregate = StubAggregate::new();
        aggregate.note("media replaced");
        let root = share(aggregate);

        // Act
        service
            .run(|uow| {
                let root = Arc::clone(&root);
                Box::pin(async move {
                    uow.add_aggregate_root(root);
                    Ok(())
                })
            })
            .await
            .unwrap();

        // Assert
        assert_eq!(
            *log.lock().unwrap(),
            vec!["start", "local-event", "commit", "integration-event"]
        );
        assert!(root.lock().await.recorded_events().is_empty());
    }

    #[tokio::test]
    async fn test_run_rolls_back_and_rethrows_the_use_case_error() {
        // Arrange
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let mut service = service_with_log(&log);

        // Act
        let result: Result<(), DomainError> = service
            .run(|_uow| {
                Box::pin(async move { Err(DomainError::Infrastructure("boom".into())) })
            })
            .await;

        // Assert
        assert_eq!(
            result.unwrap_err(),
            DomainError::Infrastructure("boom".into())
        );
        assert_eq!(*log.lock().unwrap(), vec!["start", "rollback"]);
    }
}
