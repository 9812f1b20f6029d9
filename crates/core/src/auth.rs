use serde::{Deserialize, Serialize};

/// Platform-level role attached to an authenticated user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformRole {
    /// Platform administrator. Bypasses every role-based check.
    Admin,
    /// Regular user whose access comes from role assignments.
    #[default]
    User,
}

impl PlatformRole {
    /// Returns a stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parses a platform role value. Anything other than `admin` is a regular user.
    #[must_use]
    pub fn from_transport(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// Authenticated user for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    email: String,
    source_email: String,
    display_name: Option<String>,
    platform_role: PlatformRole,
}

impl Identity {
    /// Creates an identity. The email is normalised to lower case for
    /// matching; the trimmed original is kept for provider lookups.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        display_name: Option<String>,
        platform_role: PlatformRole,
    ) -> Self {
        let source_email = email.into().trim().to_owned();
        Self {
            email: source_email.to_lowercase(),
            source_email,
            display_name,
            platform_role,
        }
    }

    /// Returns the normalised email used to match role assignments.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the email as the identity provider spelled it.
    ///
    /// Stores that filter by exact match must be queried with this value.
    #[must_use]
    pub fn source_email(&self) -> &str {
        self.source_email.as_str()
    }

    /// Returns the display name, if the platform returned one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the platform role.
    #[must_use]
    pub fn platform_role(&self) -> PlatformRole {
        self.platform_role
    }

    /// Returns whether the platform role bypasses role-based checks.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.platform_role == PlatformRole::Admin
    }

    /// Returns whether `email` refers to this identity.
    #[must_use]
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}
