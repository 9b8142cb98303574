//! Cohort service: the entry point for every operation
//!
//! Each operation authenticates and authorizes through the
//! [guard](crate::guard), checks its preconditions against the adapter, runs
//! the adapter mutation, and funnels every failure into one result value.
//! Domain failures come back as [`OperationError::Domain`]; anything else is
//! reported to [`CohortAdapter::on_unexpected_error`] exactly once and comes
//! back as [`OperationError::Unexpected`].
//!
//! Operations themselves live in [`crate::operations`].

use std::fmt;
use std::sync::Arc;

use crate::adapter::{CohortAdapter, PermissionSlot};
use crate::config::CohortConfig;
use crate::errors::{Failure, OperationError, UnexpectedError};
use crate::guard::assert_auth;

/// Result of a mutation
pub type OperationResult<T, E> = std::result::Result<T, OperationError<E>>;

/// Result of a query
pub type QueryResult<T> = std::result::Result<T, UnexpectedError>;

pub struct CohortService<A> {
    adapter: Arc<A>,
    config: CohortConfig,
}

impl<A> Clone for CohortService<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            config: self.config.clone(),
        }
    }
}

impl<A: CohortAdapter> CohortService<A> {
    pub fn new(adapter: A, config: CohortConfig) -> Self {
        Self::from_arc(Arc::new(adapter), config)
    }

    /// Share an adapter the host already holds
    pub fn from_arc(adapter: Arc<A>, config: CohortConfig) -> Self {
        Self { adapter, config }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn config(&self) -> &CohortConfig {
        &self.config
    }

    /// Run the auth guard for a single permission slot
    pub(crate) async fn authorize(
        &self,
        ctx: Option<&A::RequestContext>,
        resolver: &'static str,
        slot: PermissionSlot,
    ) -> Result<A::AuthContext, UnexpectedError> {
        let required = [self.adapter.permissions().get(slot).clone()];
        assert_auth(self.adapter(), resolver, ctx, &required).await
    }

    /// Hand an unexpected error to the operator hook
    pub(crate) async fn report(&self, err: UnexpectedError) -> UnexpectedError {
        tracing::error!(
            error = %err,
            chain = ?err.chain(),
            "unexpected error in cohort operation"
        );
        self.adapter.on_unexpected_error(&err).await;
        err
    }

    pub(crate) async fn finish<T, E>(
        &self,
        resolver: &'static str,
        outcome: Result<T, Failure<E>>,
    ) -> OperationResult<T, E>
    where
        E: fmt::Display,
    {
        match outcome {
            Ok(value) => Ok(value),
            Err(Failure::Domain(err)) => {
                tracing::debug!(resolver, reason = %err, "operation rejected");
                Err(OperationError::Domain(err))
            }
            Err(Failure::Unexpected(err)) => Err(OperationError::Unexpected(self.report(err).await)),
        }
    }

    pub(crate) async fn finish_query<T>(&self, outcome: QueryResult<T>) -> QueryResult<T> {
        match outcome {
            Ok(value) => Ok(value),
            Err(err) => Err(self.report(err).await),
        }
    }
}
