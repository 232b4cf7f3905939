use dialoguer::Input;

use crate::{
    config, error, info,
    spotify::auth::Authenticator,
    success,
    types::AccessToken,
    warning,
};

/// Resolves the Spotify client id.
///
/// Looks at the environment first, then at the id persisted by an earlier
/// run, and finally asks the user, persisting the answer for next time.
pub async fn client_id() -> String {
    if let Some(id) = config::spotify_client_id() {
        return id;
    }
    if let Some(id) = config::load_client_id().await {
        return id;
    }

    info!("To use spotrand, you need your own Spotify Client ID.");
    info!("If you don't have one, follow these steps:");
    info!("1. Go to https://developer.spotify.com/dashboard/");
    info!("2. Log in with your Spotify account");
    info!("3. Click 'Create an App' and give it a name and description");
    info!("4. Once created, you'll see your Client ID");
    info!(
        "5. In your app settings, add {} as a Redirect URI",
        config::spotify_redirect_uri()
    );

    let client_id: String = match Input::new()
        .with_prompt("Enter your Spotify Client ID")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Client ID cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
    {
        Ok(id) => id.trim().to_string(),
        Err(e) => error!("Cannot read client id: {}", e),
    };

    if let Err(e) = config::persist_client_id(&client_id).await {
        warning!("Failed to save client id: {}", e);
    }

    client_id
}

/// Runs the PKCE flow and returns the access token, or exits with guidance.
pub async fn auth() -> AccessToken {
    let credentials = config::credentials(client_id().await);
    let redirect_uri = credentials.redirect_uri.clone();

    match Authenticator::new(credentials).authorize().await {
        Ok(token) => {
            success!("Authentication successful!");
            token
        }
        Err(e) => {
            warning!("Authorization failed: {}", e);
            info!("Please ensure that:");
            info!(
                "1. Your Spotify app's redirect URI is set to {} in the Spotify Developer Dashboard",
                redirect_uri
            );
            info!("2. You're using the correct client ID");
            info!("3. You have a stable internet connection");
            info!("4. You authorized the application in the browser window that opened");
            error!("Authentication aborted.");
        }
    }
}
