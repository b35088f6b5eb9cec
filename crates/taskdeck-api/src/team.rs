// Team directory endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Ack, MemberListResponse, UserDto};

impl ApiClient {
    /// Fetch the full member directory. `GET /api/users/members`
    pub async fn list_members(&self, token: &str) -> Result<Vec<UserDto>, Error> {
        let url = self.api_url("api/users/members")?;
        let resp: MemberListResponse = self.get(url, Some(token)).await?;

        if resp.success {
            Ok(resp.data)
        } else {
            Err(Error::Rejected {
                message: resp
                    .message
                    .unwrap_or_else(|| "member list rejected by server".into()),
            })
        }
    }

    /// Remove a member from the directory. `DELETE /api/users/members/:id`
    ///
    /// Role policy (no self-deletion, owner-only) is checked by the
    /// caller before dispatch, but the server enforces it too -- its
    /// rejection comes back through the normal error path.
    pub async fn delete_member(&self, token: &str, member_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("api/users/members/{member_id}"))?;
        let ack: Ack = self.delete(url, Some(token)).await?;
        Self::check_ack(ack)?;
        Ok(())
    }
}
