use dialoguer::Input;

use crate::{error, utils, warning};

/// Asks a yes/no question; anything but yes, y, 1 or true counts as no.
pub fn confirm(question: &str) -> bool {
    match Input::<String>::new()
        .with_prompt(format!("{} (yes/no)", question))
        .allow_empty(true)
        .interact_text()
    {
        Ok(answer) => utils::to_bool(&answer),
        Err(e) => error!("Cannot read answer: {}", e),
    }
}

/// Prompts until a valid playlist link is entered and returns its id.
pub fn playlist_id() -> String {
    loop {
        let link: String = match Input::new()
            .with_prompt("Enter the Spotify playlist link that you want to randomize")
            .interact_text()
        {
            Ok(link) => link,
            Err(e) => error!("Cannot read playlist link: {}", e),
        };

        match utils::parse_playlist_id(&link) {
            Ok(id) => return id,
            Err(_) => warning!("Invalid playlist link. Please provide a valid Spotify playlist URL."),
        }
    }
}
