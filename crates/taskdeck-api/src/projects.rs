// Project endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    Ack, AddMemberRequest, AddMemberResponse, CreateProjectRequest, MemberRefDto, ProjectDto,
    ProjectListResponse, UpdateProjectRequest,
};

impl ApiClient {
    /// List projects, one page at a time.
    /// `GET /api/projects/get-projects?page=N&limit=M`
    pub async fn list_projects(
        &self,
        token: &str,
        page: u32,
        limit: u32,
    ) -> Result<ProjectListResponse, Error> {
        let mut url = self.api_url("api/projects/get-projects")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        self.get(url, Some(token)).await
    }

    /// `POST /api/projects/create-project`
    pub async fn create_project(
        &self,
        token: &str,
        req: &CreateProjectRequest,
    ) -> Result<ProjectDto, Error> {
        let url = self.api_url("api/projects/create-project")?;
        self.post(url, req, Some(token)).await
    }

    /// `PUT /api/projects/update-project/:id`
    pub async fn update_project(
        &self,
        token: &str,
        project_id: &str,
        req: &UpdateProjectRequest,
    ) -> Result<ProjectDto, Error> {
        let url = self.api_url(&format!("api/projects/update-project/{project_id}"))?;
        self.put(url, req, Some(token)).await
    }

    /// `DELETE /api/projects/delete-project/:id`
    pub async fn delete_project(&self, token: &str, project_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("api/projects/delete-project/{project_id}"))?;
        let ack: Ack = self.delete(url, Some(token)).await?;
        Self::check_ack(ack)?;
        Ok(())
    }

    /// Add a member by email. `POST /api/projects/add-member/:id`
    ///
    /// Answers with the updated project so the caller can replace its
    /// cached copy without a refetch.
    pub async fn add_member(
        &self,
        token: &str,
        project_id: &str,
        member_email: &str,
    ) -> Result<AddMemberResponse, Error> {
        let url = self.api_url(&format!("api/projects/add-member/{project_id}"))?;
        let body = AddMemberRequest {
            member_email: member_email.to_owned(),
        };
        self.post(url, &body, Some(token)).await
    }

    /// Fetch the (possibly partially hydrated) member list of a project.
    /// `GET /api/projects/:id/members`
    pub async fn project_members(
        &self,
        token: &str,
        project_id: &str,
    ) -> Result<Vec<MemberRefDto>, Error> {
        let url = self.api_url(&format!("api/projects/{project_id}/members"))?;
        self.get(url, Some(token)).await
    }
}
