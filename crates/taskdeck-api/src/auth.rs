// Auth endpoints
//
// Login and signup are the only unauthenticated routes; both answer
// with the `{token, user}` session pair. user-info refreshes the
// profile for an existing token.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{LoginRequest, SessionResponse, SignupRequest, UserDto, UserInfoResponse};

impl ApiClient {
    /// Authenticate with email and password. `POST /api/auth/login`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SessionResponse, Error> {
        let url = self.api_url("api/auth/login")?;
        let body = LoginRequest {
            email: email.to_owned(),
            password: password.expose_secret().to_owned(),
        };

        let session: SessionResponse = self.post(url, &body, None).await?;
        debug!(user = %session.user.email, "login successful");
        Ok(session)
    }

    /// Register a new account. `POST /api/auth/signup`
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<SessionResponse, Error> {
        let url = self.api_url("api/auth/signup")?;
        let body = SignupRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.expose_secret().to_owned(),
        };

        let session: SessionResponse = self.post(url, &body, None).await?;
        debug!(user = %session.user.email, "signup successful");
        Ok(session)
    }

    /// Fetch the profile behind a token. `GET /api/auth/user-info`
    pub async fn user_info(&self, token: &str) -> Result<UserDto, Error> {
        let url = self.api_url("api/auth/user-info")?;
        let resp: UserInfoResponse = self.get(url, Some(token)).await?;
        Ok(resp.user)
    }
}
