//! Workspaces, members and invites under `/api/workspaces`.
//!
//! Selecting the workspace that other calls are scoped to is client-side
//! state; see `ShortlinkClient::set_workspace_id`.

use serde::Serialize;

use crate::client::ShortlinkClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::Transport;
use crate::types::{
    CreateWorkspace, CreateWorkspaceInvite, ListParams, Paginated, UpdateWorkspace, Workspace,
    WorkspaceInvite, WorkspaceMember, WorkspaceRole,
};

#[derive(Serialize)]
struct RoleChange {
    role: WorkspaceRole,
}

impl<T: Transport> ShortlinkClient<T> {
    pub fn list_workspaces(&self, params: ListParams) -> Result<Paginated<Workspace>> {
        self.call(params.apply(Endpoint::get(&["api", "workspaces"])))
    }

    pub fn get_workspace(&self, id: &str) -> Result<Workspace> {
        self.call(Endpoint::get(&["api", "workspaces", id]))
    }

    pub fn create_workspace(&self, input: &CreateWorkspace) -> Result<Workspace> {
        self.call(Endpoint::post(&["api", "workspaces"]).json(input)?)
    }

    pub fn update_workspace(&self, id: &str, input: &UpdateWorkspace) -> Result<Workspace> {
        self.call(Endpoint::patch(&["api", "workspaces", id]).json(input)?)
    }

    pub fn delete_workspace(&self, id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "workspaces", id]))
    }

    pub fn list_workspace_members(&self, id: &str) -> Result<Vec<WorkspaceMember>> {
        self.call(Endpoint::get(&["api", "workspaces", id, "members"]))
    }

    pub fn update_member_role(
        &self,
        id: &str,
        user_id: &str,
        role: WorkspaceRole,
    ) -> Result<WorkspaceMember> {
        let body = RoleChange { role };
        self.call(Endpoint::patch(&["api", "workspaces", id, "members", user_id]).json(&body)?)
    }

    pub fn remove_workspace_member(&self, id: &str, user_id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "workspaces", id, "members", user_id]))
    }

    pub fn list_workspace_invites(&self, id: &str) -> Result<Vec<WorkspaceInvite>> {
        self.call(Endpoint::get(&["api", "workspaces", id, "invites"]))
    }

    pub fn create_workspace_invite(
        &self,
        id: &str,
        input: &CreateWorkspaceInvite,
    ) -> Result<WorkspaceInvite> {
        self.call(Endpoint::post(&["api", "workspaces", id, "invites"]).json(input)?)
    }

    pub fn revoke_workspace_invite(&self, id: &str, invite_id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "workspaces", id, "invites", invite_id]))
    }

    /// Join the workspace behind an invite token, as the key's owner.
    pub fn accept_workspace_invite(&self, token: &str) -> Result<Workspace> {
        self.call(Endpoint::post(&["api", "workspaces", "invites", token, "accept"]))
    }
}
