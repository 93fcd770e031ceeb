//! The user profile shown on the profile page and the form that edits it.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// The user's contact details and notification preferences.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Pre-filled from onboarding.
    pub first_name: String,
    /// Empty until the user saves their profile.
    pub last_name: String,
    /// Pre-filled from onboarding.
    pub email: String,
    /// Formatted as `(000) 000-0000` by the profile form, but stored as entered.
    pub phone_number: String,
    /// A reference to the avatar image, e.g. a URL.
    pub avatar_uri: Option<String>,
    /// Whether the user wants to hear about promotions.
    pub promotions: bool,
    /// Whether the user wants the newsletter.
    pub news: bool,
    /// Whether the user wants special offers.
    pub offers: bool,
}

impl UserProfile {
    /// The placeholder shown instead of an avatar, e.g. "TM" for Tilly Mason.
    ///
    /// Uses the first character of the first and last names, upper-cased.
    /// Either name may be empty, and if both are the result is `"?"`.
    pub fn initials(&self) -> String {
        let initials = [&self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|name| name.trim().graphemes(true).next())
            .collect::<String>()
            .to_uppercase();

        if initials.is_empty() {
            "?".to_owned()
        } else {
            initials
        }
    }
}

/// The profile form as sent by the browser.
///
/// Checkboxes are only sent when checked, so a missing value means `false`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub avatar_uri: String,
    pub promotions: Option<String>,
    pub news: Option<String>,
    pub offers: Option<String>,
}

impl From<ProfileForm> for UserProfile {
    fn from(form: ProfileForm) -> Self {
        let avatar_uri = form.avatar_uri.trim();

        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone_number: form.phone_number,
            avatar_uri: (!avatar_uri.is_empty()).then(|| avatar_uri.to_owned()),
            promotions: form.promotions.is_some(),
            news: form.news.is_some(),
            offers: form.offers.is_some(),
        }
    }
}


#[cfg(test)]
mod profile_form_tests {
    use super::{ProfileForm, UserProfile};

    #[test]
    fn unchecked_boxes_are_false() {
        let profile = UserProfile::from(ProfileForm {
            promotions: Some("on".to_owned()),
            ..Default::default()
        });

        assert!(profile.promotions);
        assert!(!profile.news);
        assert!(!profile.offers);
    }

    #[test]
    fn blank_avatar_is_none() {
        let profile = UserProfile::from(ProfileForm {
            avatar_uri: "   ".to_owned(),
            ..Default::default()
        });

        assert_eq!(profile.avatar_uri, None);
    }

    #[test]
    fn avatar_is_trimmed() {
        let profile = UserProfile::from(ProfileForm {
            avatar_uri: " https://example.com/me.png ".to_owned(),
            ..Default::default()
        });

        assert_eq!(
            profile.avatar_uri.as_deref(),
            Some("https://example.com/me.png")
        );
    }
}
