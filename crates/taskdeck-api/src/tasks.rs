// Task endpoints
//
// The two list routes disagree about envelopes (`[Task]` on some
// deployments, `{data: [Task]}` on others); `TaskListResponse` absorbs
// both so callers always see a plain Vec.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    Ack, CreateTaskRequest, ReorderRequest, TaskDto, TaskListResponse, TaskOrderPatch,
    UpdateTaskRequest,
};

impl ApiClient {
    /// List the tasks of one project. `GET /api/tasks/project/:projectId`
    pub async fn list_project_tasks(
        &self,
        token: &str,
        project_id: &str,
    ) -> Result<Vec<TaskDto>, Error> {
        let url = self.api_url(&format!("api/tasks/project/{project_id}"))?;
        let resp: TaskListResponse = self.get(url, Some(token)).await?;
        Ok(resp.into_tasks())
    }

    /// List every task visible to the caller. `GET /api/tasks/`
    pub async fn list_all_tasks(&self, token: &str) -> Result<Vec<TaskDto>, Error> {
        let url = self.api_url("api/tasks/")?;
        let resp: TaskListResponse = self.get(url, Some(token)).await?;
        Ok(resp.into_tasks())
    }

    /// `POST /api/tasks/`
    pub async fn create_task(&self, token: &str, req: &CreateTaskRequest) -> Result<TaskDto, Error> {
        let url = self.api_url("api/tasks/")?;
        self.post(url, req, Some(token)).await
    }

    /// `PUT /api/tasks/:id`
    pub async fn update_task(
        &self,
        token: &str,
        task_id: &str,
        req: &UpdateTaskRequest,
    ) -> Result<TaskDto, Error> {
        let url = self.api_url(&format!("api/tasks/{task_id}"))?;
        self.put(url, req, Some(token)).await
    }

    /// Batched reorder after a board drop. `PUT /api/tasks/update-order`
    ///
    /// Carries one patch per task in the affected column -- moving a task
    /// shifts its neighbors, so their orders must be rewritten in the
    /// same request.
    pub async fn reorder_tasks(
        &self,
        token: &str,
        patches: Vec<TaskOrderPatch>,
    ) -> Result<(), Error> {
        let url = self.api_url("api/tasks/update-order")?;
        let body = ReorderRequest { tasks: patches };
        let ack: Ack = self.put(url, &body, Some(token)).await?;
        Self::check_ack(ack)?;
        Ok(())
    }

    /// `DELETE /api/tasks/:id`
    pub async fn delete_task(&self, token: &str, task_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("api/tasks/{task_id}"))?;
        let ack: Ack = self.delete(url, Some(token)).await?;
        Self::check_ack(ack)?;
        Ok(())
    }
}
