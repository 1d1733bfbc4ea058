//! General enum for rating images found by the search clients
//! # Safe-search Rating
//! Most imageboard websites classify posts considering how explicit they are.
//!
//! Backends report the rating as a short code or a word, and only its first character matters:
//! * `s` (`safe`, `sensitive` on some forks): posts that don't involve anything suggestive.
//! * `q` (`questionable`): posts that *might* not be safe for viewing close to other people or at work.
//! * `e` (`explicit`): posts that are explicitly pornographic or have other sensitive content such as gore, etc.
//!

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum SafeSearchRating {
    /// Image is safe for work.
    Safe,
    /// Image is generally safe, but may contain some sexually-suggestive content.
    Questionable,
    /// Image is explicit and not safe for work.
    Explicit,
    /// Rating is unknown or has not been set.
    #[default]
    Undefined,
}

impl Display for SafeSearchRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Questionable => write!(f, "Questionable"),
            Self::Explicit => write!(f, "Explicit"),
            Self::Undefined => write!(f, "Undefined"),
        }
    }
}

impl SafeSearchRating {
    /// Guess the variant from the rating code returned by the API.
    ///
    /// Case-insensitive, only the first character is looked at.
    pub fn from_code(s: &str) -> Self {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('s') => Self::Safe,
            Some('q') => Self::Questionable,
            Some('e') => Self::Explicit,
            _ => Self::Undefined,
        }
    }

    /// Converts the lowercase names stored in user preferences (`"safe"`, `"questionable"`,
    /// `"explicit"`, `"undefined"`) into ratings. Unknown names are skipped.
    pub fn array_from_strings<S: AsRef<str>>(strings: &[S]) -> Vec<Self> {
        strings
            .iter()
            .filter_map(|s| match s.as_ref() {
                "safe" => Some(Self::Safe),
                "questionable" => Some(Self::Questionable),
                "explicit" => Some(Self::Explicit),
                "undefined" => Some(Self::Undefined),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::SafeSearchRating;

    #[test]
    fn first_character_decides() {
        assert_eq!(SafeSearchRating::from_code("s"), SafeSearchRating::Safe);
        assert_eq!(SafeSearchRating::from_code("Safe"), SafeSearchRating::Safe);
        assert_eq!(
            SafeSearchRating::from_code("QUESTIONABLE"),
            SafeSearchRating::Questionable
        );
        assert_eq!(
            SafeSearchRating::from_code("explicit"),
            SafeSearchRating::Explicit
        );
        assert_eq!(SafeSearchRating::from_code("g"), SafeSearchRating::Undefined);
        assert_eq!(SafeSearchRating::from_code(""), SafeSearchRating::Undefined);
    }

    #[test]
    fn preference_names() {
        let ratings =
            SafeSearchRating::array_from_strings(&["safe", "bogus", "explicit", "undefined"]);

        assert_eq!(
            ratings,
            [
                SafeSearchRating::Safe,
                SafeSearchRating::Explicit,
                SafeSearchRating::Undefined
            ]
        );
    }
}
