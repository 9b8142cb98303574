//! In-memory adapter for tests
//!
//! [`InMemoryAdapter`] keeps invites, members, and roles in memory, records
//! every adapter call in order, and lets tests inject failures:
//!
//! ```rust,ignore
//! use cohort_management::testing::InMemoryAdapter;
//!
//! let adapter = InMemoryAdapter::new()
//!     .with_role("admin", "Administrator")
//!     .with_member("m1", "member@example.com")
//!     .failing("send_invite");
//! ```
//!
//! Available with the `testing` feature.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::Value;

use crate::adapter::{AdapterResult, CohortAdapter, PermissionSlots};
use crate::auth::{extract_header, FromRequestHeaders};
use crate::errors::UnexpectedError;
use crate::types::{Invite, MemberRecord, NewInvite, RoleRecord};

/// User ID given to requests that do not name one
pub const DEFAULT_USER: &str = "test";

/// Request context: the caller's user ID, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRequest {
    pub user_id: Option<String>,
}

impl TestRequest {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}

impl FromRequestHeaders for TestRequest {
    fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            user_id: extract_header(headers, "x-user-id"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestActor {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestMember {
    pub id: String,
    pub email: String,
    #[serde(rename = "roleIDs")]
    pub role_ids: Vec<String>,
}

impl MemberRecord for TestMember {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRole {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl RoleRecord for TestRole {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// One recorded adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub args: Vec<String>,
}

/// What the operator hook received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    pub message: String,
    pub public_message: String,
    pub chain: Vec<String>,
}

#[derive(Default)]
struct State {
    invites: Vec<Invite<Value>>,
    members: Vec<TestMember>,
    roles: Vec<TestRole>,
    calls: Vec<Call>,
    reported: Vec<ReportedError>,
    failing: HashSet<&'static str>,
    failing_for: HashSet<(&'static str, String)>,
    next_invite: u64,
    next_member: u64,
}

pub struct InMemoryAdapter {
    permissions: PermissionSlots<String>,
    authenticated: bool,
    authorized: bool,
    state: Mutex<State>,
}

impl Default for InMemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAdapter {
    /// Empty adapter that authenticates and authorizes everyone
    pub fn new() -> Self {
        Self {
            permissions: PermissionSlots::cohort_defaults(),
            authenticated: true,
            authorized: true,
            state: Mutex::new(State {
                next_invite: 1,
                next_member: 1,
                ..State::default()
            }),
        }
    }

    /// `authenticate` resolves to no actor
    #[must_use]
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// `authorize` resolves to `false`
    #[must_use]
    pub fn denying(mut self) -> Self {
        self.authorized = false;
        self
    }

    /// Make `method` return an error
    #[must_use]
    pub fn failing(self, method: &'static str) -> Self {
        self.lock().failing.insert(method);
        self
    }

    /// Make `method` return an error only when called with `arg`
    #[must_use]
    pub fn failing_for(self, method: &'static str, arg: &str) -> Self {
        self.lock().failing_for.insert((method, arg.to_string()));
        self
    }

    #[must_use]
    pub fn with_role(self, id: &str, name: &str) -> Self {
        self.lock().roles.push(TestRole {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
        });
        self
    }

    #[must_use]
    pub fn with_member(self, id: &str, email: &str) -> Self {
        self.lock().members.push(TestMember {
            id: id.to_string(),
            email: email.to_string(),
            role_ids: Vec::new(),
        });
        self
    }

    #[must_use]
    pub fn with_invite(self, id: &str, email: &str) -> Self {
        self.lock().invites.push(Invite {
            id: id.to_string(),
            email: email.to_string(),
            role_ids: Vec::new(),
            metadata: Value::Object(Default::default()),
        });
        self
    }

    /// Names of all adapter methods called so far, in order
    pub fn call_names(&self) -> Vec<&'static str> {
        self.lock().calls.iter().map(|c| c.method).collect()
    }

    /// Arguments of every call to `method`, in order
    pub fn calls_to(&self, method: &str) -> Vec<Vec<String>> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .map(|c| c.args.clone())
            .collect()
    }

    /// Errors handed to the operator hook
    pub fn reported(&self) -> Vec<ReportedError> {
        self.lock().reported.clone()
    }

    pub fn invites(&self) -> Vec<Invite<Value>> {
        self.lock().invites.clone()
    }

    pub fn members(&self) -> Vec<TestMember> {
        self.lock().members.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and fail it if requested
    fn record(&self, method: &'static str, args: Vec<String>) -> AdapterResult<MutexGuard<'_, State>> {
        let mut state = self.lock();
        let failing = state.failing.contains(method)
            || args
                .iter()
                .any(|arg| state.failing_for.contains(&(method, arg.clone())));
        state.calls.push(Call { method, args });
        if failing {
            return Err(format!("injected failure in `{method}`").into());
        }
        Ok(state)
    }
}

#[async_trait]
impl CohortAdapter for InMemoryAdapter {
    type RequestContext = TestRequest;
    type AuthContext = TestActor;
    type Permission = String;
    type Metadata = Value;
    type MetadataInput = Value;
    type Member = TestMember;
    type Role = TestRole;

    fn permissions(&self) -> &PermissionSlots<String> {
        &self.permissions
    }

    async fn on_unexpected_error(&self, error: &UnexpectedError) {
        let mut state = self.lock();
        state.calls.push(Call {
            method: "on_unexpected_error",
            args: vec![error.to_string()],
        });
        state.reported.push(ReportedError {
            message: error.to_string(),
            public_message: error.public_message(),
            chain: error.chain(),
        });
    }

    async fn authenticate(&self, ctx: &TestRequest) -> AdapterResult<Option<TestActor>> {
        let user_id = ctx.user_id.clone().unwrap_or_else(|| DEFAULT_USER.to_string());
        let _state = self.record("authenticate", vec![user_id.clone()])?;
        Ok(self.authenticated.then_some(TestActor { user_id }))
    }

    async fn authorize(&self, auth: &TestActor, permissions: &[String]) -> AdapterResult<bool> {
        let mut args = vec![auth.user_id.clone()];
        args.extend(permissions.iter().cloned());
        let _state = self.record("authorize", args)?;
        Ok(self.authorized)
    }

    async fn create_invite(&self, invite: NewInvite<Value>) -> AdapterResult<Invite<Value>> {
        let mut state = self.record("create_invite", vec![invite.email.to_string()])?;
        let id = format!("i{}", state.next_invite);
        state.next_invite += 1;

        let created = Invite {
            id,
            email: invite.email.into_inner(),
            role_ids: invite.role_ids,
            metadata: invite.metadata,
        };
        state.invites.push(created.clone());
        Ok(created)
    }

    async fn send_invite(&self, invite: &Invite<Value>) -> AdapterResult<()> {
        let _state = self.record("send_invite", vec![invite.id.clone()])?;
        Ok(())
    }

    async fn revoke_invite(&self, invite: &Invite<Value>) -> AdapterResult<()> {
        let mut state = self.record("revoke_invite", vec![invite.id.clone()])?;
        state.invites.retain(|i| i.id != invite.id);
        Ok(())
    }

    async fn redeem_invite(
        &self,
        ctx: &TestRequest,
        invite: &Invite<Value>,
    ) -> AdapterResult<TestMember> {
        let user = ctx.user_id.clone().unwrap_or_default();
        let mut state = self.record("redeem_invite", vec![user, invite.id.clone()])?;
        let id = format!("m{}", state.next_member);
        state.next_member += 1;

        let member = TestMember {
            id,
            email: invite.email.clone(),
            role_ids: invite.role_ids.clone(),
        };
        state.invites.retain(|i| i.id != invite.id);
        state.members.push(member.clone());
        Ok(member)
    }

    async fn count_invites(&self) -> AdapterResult<u64> {
        let state = self.record("count_invites", Vec::new())?;
        Ok(state.invites.len() as u64)
    }

    async fn list_invites(&self) -> AdapterResult<Vec<Invite<Value>>> {
        let state = self.record("list_invites", Vec::new())?;
        Ok(state.invites.clone())
    }

    async fn find_invite_by_id(&self, id: &str) -> AdapterResult<Option<Invite<Value>>> {
        let state = self.record("find_invite_by_id", vec![id.to_string()])?;
        Ok(state.invites.iter().find(|i| i.id == id).cloned())
    }

    async fn find_invite_by_email(&self, email: &str) -> AdapterResult<Option<Invite<Value>>> {
        let state = self.record("find_invite_by_email", vec![email.to_string()])?;
        Ok(state.invites.iter().find(|i| i.email == email).cloned())
    }

    async fn find_member_by_email(&self, email: &str) -> AdapterResult<Option<TestMember>> {
        let state = self.record("find_member_by_email", vec![email.to_string()])?;
        Ok(state.members.iter().find(|m| m.email == email).cloned())
    }

    async fn find_member_by_id(&self, id: &str) -> AdapterResult<Option<TestMember>> {
        let state = self.record("find_member_by_id", vec![id.to_string()])?;
        Ok(state.members.iter().find(|m| m.id == id).cloned())
    }

    async fn search_members(&self, query: &str) -> AdapterResult<Vec<TestMember>> {
        let state = self.record("search_members", vec![query.to_string()])?;
        Ok(state
            .members
            .iter()
            .filter(|m| m.id.contains(query) || m.email.contains(query))
            .cloned()
            .collect())
    }

    async fn list_members(&self) -> AdapterResult<Vec<TestMember>> {
        let state = self.record("list_members", Vec::new())?;
        Ok(state.members.clone())
    }

    async fn delete_member(&self, member: &TestMember) -> AdapterResult<()> {
        let mut state = self.record("delete_member", vec![member.id.clone()])?;
        state.members.retain(|m| m.id != member.id);
        Ok(())
    }

    async fn list_roles(&self) -> AdapterResult<Vec<TestRole>> {
        let state = self.record("list_roles", Vec::new())?;
        Ok(state.roles.clone())
    }

    async fn find_role_by_id(&self, id: &str) -> AdapterResult<Option<TestRole>> {
        let state = self.record("find_role_by_id", vec![id.to_string()])?;
        Ok(state.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn assign_role(&self, member: &TestMember, role: &TestRole) -> AdapterResult<()> {
        let mut state = self.record("assign_role", vec![member.id.clone(), role.id.clone()])?;
        if let Some(stored) = state.members.iter_mut().find(|m| m.id == member.id) {
            if !stored.role_ids.contains(&role.id) {
                stored.role_ids.push(role.id.clone());
            }
        }
        Ok(())
    }

    async fn unassign_role(&self, member: &TestMember, role: &TestRole) -> AdapterResult<()> {
        let mut state = self.record("unassign_role", vec![member.id.clone(), role.id.clone()])?;
        if let Some(stored) = state.members.iter_mut().find(|m| m.id == member.id) {
            stored.role_ids.retain(|r| r != &role.id);
        }
        Ok(())
    }
}
