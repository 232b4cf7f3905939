use std::time::Duration;

use reqwest::{Client, Url};
use tokio::net::TcpListener;

use crate::{
    config,
    errors::AuthError,
    info, server,
    types::{AccessToken, Credentials, PkcePair, TokenResponse},
    warning,
};

/// Runs the OAuth 2.0 authorization-code flow with PKCE against Spotify.
///
/// The flow is strictly sequential:
/// 1. **PKCE Setup**: a fresh verifier and its S256 challenge are generated
/// 2. **Authorization**: the user is sent to the authorization URL while a
///    loopback listener waits for exactly one redirect
/// 3. **Token Exchange**: the received code and the verifier are traded for
///    an access token
///
/// No refresh token handling takes place. The token lives as long as the
/// process and is never written to disk.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
    auth_url: String,
    token_url: String,
    timeout: Duration,
    http: Client,
}

impl Authenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            auth_url: config::spotify_apiauth_url(),
            token_url: config::spotify_apitoken_url(),
            timeout: config::CALLBACK_TIMEOUT,
            http: Client::new(),
        }
    }

    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Performs the whole flow and returns a bearer token.
    ///
    /// Any failure aborts the flow; there is no automated recovery.
    pub async fn authorize(&self) -> Result<AccessToken, AuthError> {
        let pkce = PkcePair::generate();
        let code = self.request_authorization(&pkce.challenge).await?;
        self.exchange_token(&code, &pkce.verifier).await
    }

    /// Builds the URL the user has to visit to grant access.
    pub fn authorization_url(&self, challenge: &str) -> Result<Url, AuthError> {
        Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
                ("code_challenge_method", "S256"),
                ("code_challenge", challenge),
                ("scope", self.credentials.scope.as_str()),
            ],
        )
        .map_err(|e| AuthError::InvalidRedirect(format!("{}: {}", self.auth_url, e)))
    }

    /// Sends the user to the authorization page and waits for the redirect.
    ///
    /// The listener is bound before the browser opens so the redirect cannot
    /// arrive before anyone listens. It serves a single request and is gone
    /// once this returns.
    pub async fn request_authorization(&self, challenge: &str) -> Result<String, AuthError> {
        let auth_url = self.authorization_url(challenge)?;
        let (host, port) = self.callback_addr()?;

        let listener = TcpListener::bind((host.as_str(), port))
            .await
            .map_err(AuthError::Listener)?;

        info!("Opening browser for authorization...");
        if webbrowser::open(auth_url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            );
        }

        info!(
            "Waiting for authorization (timeout in {} seconds)...",
            self.timeout.as_secs()
        );
        server::capture_callback(listener, self.timeout).await
    }

    /// Trades an authorization code for an access token.
    ///
    /// A non-success status is reported as `AuthError::TokenExchange` with the
    /// provider's error body. Scope and expiry are taken as returned.
    pub async fn exchange_token(
        &self,
        code: &str,
        verifier: &str,
    ) -> Result<AccessToken, AuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
                ("code_verifier", verifier),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange { status, body });
        }

        let token = res.json::<TokenResponse>().await?;
        Ok(AccessToken::new(token.access_token, token.scope))
    }

    fn callback_addr(&self) -> Result<(String, u16), AuthError> {
        let redirect = Url::parse(&self.credentials.redirect_uri)
            .map_err(|e| AuthError::InvalidRedirect(format!("{}: {}", self.credentials.redirect_uri, e)))?;

        let host = redirect
            .host_str()
            .ok_or_else(|| AuthError::InvalidRedirect(self.credentials.redirect_uri.clone()))?;
        let port = redirect
            .port_or_known_default()
            .ok_or_else(|| AuthError::InvalidRedirect(self.credentials.redirect_uri.clone()))?;

        Ok((host.to_string(), port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            client_id: "client-123".to_string(),
            scope: "playlist-modify-public playlist-read-private".to_string(),
            redirect_uri: "http://localhost:8080".to_string(),
        }
    }

    #[test]
    fn authorization_url_carries_pkce_parameters() {
        let auth = Authenticator::new(credentials())
            .with_auth_url("https://accounts.spotify.com/authorize");
        let url = auth.authorization_url("challenge-abc").unwrap();

        let params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(params.contains(&("client_id".into(), "client-123".into())));
        assert!(params.contains(&("response_type".into(), "code".into())));
        assert!(params.contains(&("redirect_uri".into(), "http://localhost:8080".into())));
        assert!(params.contains(&("code_challenge_method".into(), "S256".into())));
        assert!(params.contains(&("code_challenge".into(), "challenge-abc".into())));
        assert!(params.contains(&(
            "scope".into(),
            "playlist-modify-public playlist-read-private".into()
        )));
        assert!(!url.as_str().contains("code_verifier"));
    }

    #[test]
    fn callback_addr_uses_redirect_host_and_port() {
        let auth = Authenticator::new(credentials());
        assert_eq!(
            auth.callback_addr().unwrap(),
            ("localhost".to_string(), 8080)
        );
    }

    #[test]
    fn callback_addr_rejects_garbage_redirect() {
        let mut creds = credentials();
        creds.redirect_uri = "not a url".to_string();
        let auth = Authenticator::new(creds);
        assert!(matches!(
            auth.callback_addr(),
            Err(AuthError::InvalidRedirect(_))
        ));
    }
}
