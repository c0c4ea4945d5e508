//! Authentication operations: account creation, login, the two-step password
//! reset, profile lookup, and logout.
//!
//! These are thin wrappers over the shared request core; none of them touch
//! the session store. Callers decide what to persist from the outcome.

use reqwest::Method;
use serde_json::json;

use super::{
    ApiClient, ApiOutcome,
    types::{Ack, LoginPayload, UserBody, UserProfile},
};

impl ApiClient {
    /// Registers a new account. The server enforces the password policy and
    /// email uniqueness; its message is surfaced verbatim on failure.
    pub async fn register(&self, email: &str, password: &str) -> ApiOutcome<Ack> {
        self.execute(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({"email": email, "password": password})),
        )
        .await
    }

    /// Exchanges credentials for a bearer token and the user profile.
    pub async fn login(&self, email: &str, password: &str) -> ApiOutcome<LoginPayload> {
        self.execute(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"email": email, "password": password})),
        )
        .await
    }

    /// Asks the server to email a reset OTP to `email`.
    pub async fn request_password_reset(&self, email: &str) -> ApiOutcome<Ack> {
        self.execute(
            Method::POST,
            "/auth/request-password-reset",
            None,
            Some(json!({"email": email})),
        )
        .await
    }

    /// Completes the reset using the emailed OTP.
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> ApiOutcome<Ack> {
        self.execute(
            Method::POST,
            "/auth/reset-password",
            None,
            Some(json!({
                "email": email,
                "otp": otp,
                "new_password": new_password
            })),
        )
        .await
    }

    /// Fetches the profile for the bearer token. A failure here is the
    /// signal that the token is no longer valid.
    pub async fn current_user(&self, token: &str) -> ApiOutcome<UserProfile> {
        self.execute::<UserBody>(Method::GET, "/auth/me", Some(token), None)
            .await
            .map(|body| body.user)
    }

    /// Signals logout to the server. Best-effort: callers clear local state
    /// first and ignore this outcome.
    pub async fn logout(&self, token: &str) -> ApiOutcome<Ack> {
        self.execute(Method::POST, "/session/logout", Some(token), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiClient, ApiOutcome, ClientConfig, NETWORK_ERROR};
    use anyhow::{Result, anyhow};
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client(base_url: &str) -> Result<ApiClient> {
        ApiClient::new(&ClientConfig::new(base_url)?)
    }

    /// Matches only requests carrying no `Authorization` header at all.
    struct NoAuthorizationHeader;

    impl wiremock::Match for NoAuthorizationHeader {
        fn matches(&self, request: &Request) -> bool {
            !request.headers.contains_key("authorization")
        }
    }

    #[tokio::test]
    async fn login_returns_token_and_profile() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({
                "email": "user@x.com",
                "password": "Ab1!aaaa"
            })))
            .and(NoAuthorizationHeader)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Login successful",
                "access_token": "jwt-123",
                "user": {"id": "u1", "email": "user@x.com", "created_at": "2025-01-01T00:00:00"}
            })))
            .mount(&server)
            .await;

        let payload = client(&server.uri())?
            .login("user@x.com", "Ab1!aaaa")
            .await
            .into_result()?;
        assert_eq!(payload.access_token, "jwt-123");
        assert_eq!(payload.user.email, "user@x.com");
        Ok(())
    }

    #[tokio::test]
    async fn login_surfaces_server_message_on_401() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "message": "Invalid email or password"
            })))
            .mount(&server)
            .await;

        let outcome = client(&server.uri())?.login("user@x.com", "nope").await;
        assert_eq!(
            outcome,
            ApiOutcome::Failure {
                message: "Invalid email or password".to_string()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn register_omits_authorization_header() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(NoAuthorizationHeader)
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "message": "Registration successful"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client(&server.uri())?
            .register("user@x.com", "Ab1!aaaa")
            .await
            .into_result()?;
        assert_eq!(ack.message(), "Registration successful");
        Ok(())
    }

    #[tokio::test]
    async fn current_user_sends_bearer_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("Authorization", "Bearer jwt-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "user": {"id": "u1", "email": "user@x.com"}
            })))
            .mount(&server)
            .await;

        let user = client(&server.uri())?
            .current_user("jwt-123")
            .await
            .into_result()?;
        assert_eq!(user.id, "u1");
        Ok(())
    }

    #[tokio::test]
    async fn reset_password_sends_snake_case_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/reset-password"))
            .and(body_json(json!({
                "email": "user@x.com",
                "otp": "123456",
                "new_password": "Ab1!bbbb"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Password reset successful"
            })))
            .mount(&server)
            .await;

        let ack = client(&server.uri())?
            .reset_password("user@x.com", "123456", "Ab1!bbbb")
            .await
            .into_result()?;
        assert_eq!(ack.message(), "Password reset successful");
        Ok(())
    }

    #[tokio::test]
    async fn connection_refused_collapses_to_network_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        // Bind to grab a free port, then drop the listener so nothing answers.
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
        let base = format!("http://127.0.0.1:{port}");

        let outcome = client(&base)?.login("user@x.com", "Ab1!aaaa").await;
        assert_eq!(
            outcome,
            ApiOutcome::Failure {
                message: NETWORK_ERROR.to_string()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn non_json_body_collapses_to_network_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let outcome = client(&server.uri())?.login("user@x.com", "pw").await;
        assert_eq!(
            outcome,
            ApiOutcome::Failure {
                message: NETWORK_ERROR.to_string()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn success_envelope_missing_payload_is_a_failure() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        // success: true but no access_token violates the contract.
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Login successful"
            })))
            .mount(&server)
            .await;

        let outcome = client(&server.uri())?.login("user@x.com", "pw").await;
        assert_eq!(
            outcome,
            ApiOutcome::Failure {
                message: NETWORK_ERROR.to_string()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn failure_without_message_gets_fallback() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false
            })))
            .mount(&server)
            .await;

        let outcome = client(&server.uri())?.register("user@x.com", "pw").await;
        let err = outcome.into_result().err().ok_or_else(|| anyhow!("expected error"))?;
        assert_eq!(err.to_string(), "Request failed");
        Ok(())
    }

    #[tokio::test]
    async fn logout_posts_with_bearer_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/session/logout"))
            .and(header("Authorization", "Bearer jwt-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Logged out successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client(&server.uri())?.logout("jwt-123").await;
        assert!(outcome.is_success());
        Ok(())
    }
}
