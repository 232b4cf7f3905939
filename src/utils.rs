use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::errors::PlaylistError;

const PLAYLIST_LINK_PREFIX: &str = "https://open.spotify.com/playlist/";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Durstenfeld variant of the Fisher-Yates shuffle.
///
/// Walks `i` from the last index down to 1 and swaps element `i` with a
/// uniformly drawn `j` in `0..=i`.
pub fn fisher_yates_shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

pub fn shuffle<T>(items: &mut [T]) {
    fisher_yates_shuffle(items, &mut rand::rng());
}

/// Extracts the bare playlist id from a `https://open.spotify.com/playlist/...` link.
pub fn parse_playlist_id(link: &str) -> Result<String, PlaylistError> {
    let link = link.trim();
    let Some(rest) = link.strip_prefix(PLAYLIST_LINK_PREFIX) else {
        return Err(PlaylistError::InvalidLink(link.to_string()));
    };

    let id = rest
        .split('/')
        .next_back()
        .unwrap_or_default()
        .split('?')
        .next()
        .unwrap_or_default();

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PlaylistError::InvalidLink(link.to_string()));
    }

    Ok(id.to_string())
}

pub fn to_bool(word: &str) -> bool {
    matches!(
        word.trim().to_lowercase().as_str(),
        "yes" | "y" | "1" | "true"
    )
}

pub fn has_duplicates(uris: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(uris.len());
    !uris.iter().all(|uri| seen.insert(uri))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn shuffle_with_seed_is_reproducible() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        fisher_yates_shuffle(&mut a, &mut StdRng::seed_from_u64(7));
        fisher_yates_shuffle(&mut b, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec!["spotify:track:1"];
        shuffle(&mut one);
        assert_eq!(one, vec!["spotify:track:1"]);
    }

    #[test]
    fn playlist_link_keeps_last_segment_without_query() {
        let id = parse_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc")
            .unwrap();
        assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");
    }
}
