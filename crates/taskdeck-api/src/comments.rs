// Comment endpoints
//
// Comments are fetched on demand per task and never cached client-side.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Ack, CommentDto, CommentListResponse, CommentRequest, CommentResponse};

impl ApiClient {
    /// List the comments on a task. `GET /api/comments/:taskId`
    pub async fn list_comments(&self, token: &str, task_id: &str) -> Result<Vec<CommentDto>, Error> {
        let url = self.api_url(&format!("api/comments/{task_id}"))?;
        let resp: CommentListResponse = self.get(url, Some(token)).await?;
        Ok(resp.comments)
    }

    /// `POST /api/comments/:taskId`
    pub async fn create_comment(
        &self,
        token: &str,
        task_id: &str,
        content: &str,
    ) -> Result<CommentDto, Error> {
        let url = self.api_url(&format!("api/comments/{task_id}"))?;
        let body = CommentRequest {
            content: content.to_owned(),
        };
        let resp: CommentResponse = self.post(url, &body, Some(token)).await?;
        Ok(resp.comment)
    }

    /// `PUT /api/comments/:commentId`
    pub async fn update_comment(
        &self,
        token: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<CommentDto, Error> {
        let url = self.api_url(&format!("api/comments/{comment_id}"))?;
        let body = CommentRequest {
            content: content.to_owned(),
        };
        let resp: CommentResponse = self.put(url, &body, Some(token)).await?;
        Ok(resp.comment)
    }

    /// `DELETE /api/comments/:commentId`
    pub async fn delete_comment(&self, token: &str, comment_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("api/comments/{comment_id}"))?;
        let ack: Ack = self.delete(url, Some(token)).await?;
        Self::check_ack(ack)?;
        Ok(())
    }
}
