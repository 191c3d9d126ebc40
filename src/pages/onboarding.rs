//! Post-signup role selector.
//!
//! The page has two visible states: nothing selected (continue disabled,
//! hint shown) and at least one role selected (continue enabled). Each role
//! card is a submit button that toggles that role; the current selection
//! round-trips through hidden inputs so no client script is needed.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use super::{DASHBOARD_PATH, ONBOARDING_PATH, error_banner, escape_html, layout, render};

const ONBOARDING_TEMPLATE: &str = include_str!("../../templates/onboarding.html");

pub const SELECT_AT_LEAST_ONE: &str = "Please select at least one role";
pub const SELECTION_HINT: &str = "Select at least one role to continue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileRole {
    Beatmaker,
    Artist,
    ArtisticDirector,
}

impl ProfileRole {
    pub const ALL: [Self; 3] = [Self::Beatmaker, Self::Artist, Self::ArtisticDirector];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beatmaker => "beatmaker",
            Self::Artist => "artist",
            Self::ArtisticDirector => "artistic_director",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Beatmaker => "Beatmaker / Producer",
            Self::Artist => "Artist",
            Self::ArtisticDirector => "Artistic Director / A&R",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Beatmaker => "I create instrumentals and beats for artists to use",
            Self::Artist => "I'm looking for beats to lock and record on",
            Self::ArtisticDirector => "I curate and send beats to artists on my roster",
        }
    }
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected roles in the order they were first picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSelection {
    roles: Vec<ProfileRole>,
}

impl RoleSelection {
    /// Build from submitted values, dropping repeats.
    #[must_use]
    pub fn from_roles(roles: impl IntoIterator<Item = ProfileRole>) -> Self {
        let mut selection = Self::default();
        for role in roles {
            if !selection.contains(role) {
                selection.roles.push(role);
            }
        }
        selection
    }

    /// Remove `role` if selected, otherwise append it.
    pub fn toggle(&mut self, role: ProfileRole) {
        if let Some(idx) = self.roles.iter().position(|r| *r == role) {
            self.roles.remove(idx);
        } else {
            self.roles.push(role);
        }
    }

    #[must_use]
    pub fn contains(&self, role: ProfileRole) -> bool {
        self.roles.contains(&role)
    }

    #[must_use]
    pub fn roles(&self) -> &[ProfileRole] {
        &self.roles
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.roles.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnboardingForm {
    /// Current selection, one `role=` pair per selected role.
    #[serde(default)]
    pub role: Vec<ProfileRole>,
    /// Present when a role card was clicked.
    #[serde(default)]
    pub toggle: Option<ProfileRole>,
    /// `continue` when the submit button was clicked.
    #[serde(default)]
    pub intent: Option<String>,
}

/// Result of applying one form post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingStep {
    /// Re-render the selector.
    Show(OnboardingView),
    /// Selection accepted; the caller records it and moves on to the dashboard.
    Complete(Vec<ProfileRole>),
}

impl OnboardingForm {
    #[must_use]
    pub fn apply(self) -> OnboardingStep {
        let mut selection = RoleSelection::from_roles(self.role);
        if let Some(role) = self.toggle {
            selection.toggle(role);
            return OnboardingStep::Show(OnboardingView { selection, error: None });
        }
        if self.intent.as_deref() != Some("continue") {
            return OnboardingStep::Show(OnboardingView { selection, error: None });
        }
        if !selection.can_submit() {
            return OnboardingStep::Show(OnboardingView { selection, error: Some(SELECT_AT_LEAST_ONE.to_owned()) });
        }
        OnboardingStep::Complete(selection.roles)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingView {
    pub selection: RoleSelection,
    pub error: Option<String>,
}

impl OnboardingView {
    #[must_use]
    pub fn render(&self) -> String {
        let mut hidden = String::new();
        for role in self.selection.roles() {
            let _ = writeln!(hidden, r#"    <input type="hidden" name="role" value="{role}">"#);
        }

        let mut cards = String::new();
        for role in ProfileRole::ALL {
            let selected = self.selection.contains(role);
            let (card_class, box_class, mark) = if selected {
                ("card card--selected", "checkbox checkbox--checked", "&#10003;")
            } else {
                ("card", "checkbox", "")
            };
            let _ = writeln!(
                cards,
                r#"      <button class="role-toggle" type="submit" name="toggle" value="{role}" aria-pressed="{selected}">
        <div class="{card_class}">
          <span class="{box_class}">{mark}</span>
          <h3>{title}</h3>
          <p class="muted">{description}</p>
        </div>
      </button>"#,
                title = escape_html(role.title()),
                description = escape_html(role.description()),
            );
        }

        let (disabled, hint) = if self.selection.can_submit() {
            ("", String::new())
        } else {
            (" disabled", format!(r#"<p class="subtle">{SELECTION_HINT}</p>"#))
        };

        let body = render(
            ONBOARDING_TEMPLATE,
            &[
                ("ONBOARDING_PATH", ONBOARDING_PATH),
                ("DASHBOARD_PATH", DASHBOARD_PATH),
                ("SELECTED_INPUTS", &hidden),
                ("ROLE_CARDS", &cards),
                ("ERROR", &error_banner(self.error.as_deref())),
                ("SUBMIT_DISABLED", disabled),
                ("HINT", &hint),
            ],
        );
        layout("Set up your profile", "", &body)
    }
}

#[cfg(test)]
#[path = "onboarding_test.rs"]
mod tests;
