//! async-graphql surface for the cohort operations
//!
//! ```rust,ignore
//! use cohort_management::{build_schema, CohortConfig, CohortService};
//!
//! let schema = build_schema(CohortService::new(adapter, CohortConfig::default()));
//! let response = schema.execute(request.data(request_context)).await;
//! ```
//!
//! Hosts with their own schema can merge [`CohortQuery`] and
//! [`CohortMutation`] into it with `MergedObject` and register the
//! [`CohortService`](crate::service::CohortService) as schema data.

pub mod objects;
pub mod results;
mod schema;

pub use objects::*;
pub use results::*;
pub use schema::{build_schema, schema_builder, CohortMutation, CohortQuery, CohortSchema};
