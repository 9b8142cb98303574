//! Auth guard shared by every permission-gated operation

use crate::adapter::CohortAdapter;
use crate::errors::UnexpectedError;

/// Authenticate the caller and authorize `required` in one step
///
/// Failures are never retried. Every failure becomes an
/// [`UnexpectedError::Authentication`] or [`UnexpectedError::Authorisation`],
/// keeping the adapter's error as the cause when there is one.
pub async fn assert_auth<A: CohortAdapter>(
    adapter: &A,
    resolver: &'static str,
    ctx: Option<&A::RequestContext>,
    required: &[A::Permission],
) -> Result<A::AuthContext, UnexpectedError> {
    let Some(ctx) = ctx else {
        return Err(UnexpectedError::Authentication {
            resolver,
            cause: Some("no request context was provided".into()),
        });
    };

    let actor = adapter
        .authenticate(ctx)
        .await
        .map_err(|cause| UnexpectedError::Authentication {
            resolver,
            cause: Some(cause),
        })?
        .ok_or(UnexpectedError::Authentication {
            resolver,
            cause: None,
        })?;

    let permissions = || required.iter().map(ToString::to_string).collect::<Vec<_>>();

    let allowed = adapter
        .authorize(&actor, required)
        .await
        .map_err(|cause| UnexpectedError::Authorisation {
            resolver,
            permissions: permissions(),
            cause: Some(cause),
        })?;

    if !allowed {
        return Err(UnexpectedError::Authorisation {
            resolver,
            permissions: permissions(),
            cause: None,
        });
    }

    Ok(actor)
}
