//! Default values for configuration fields.
//!
//! Referenced from `#[serde(default = "...")]` attributes so that a partial
//! config file still deserializes to a complete `Config`.

pub fn home_path() -> String {
    "/".to_string()
}

pub fn home_label() -> String {
    "Dashboard".to_string()
}

/// Roles whose navigation is always tabbed. A single role, matching the
/// two-policy split of the hosted application.
pub fn always_tabbed_roles() -> Vec<String> {
    vec!["admin".to_string()]
}

/// Unauthenticated and recovery routes; these never become tabs.
pub fn excluded_paths() -> Vec<String> {
    [
        "/login",
        "/signup",
        "/forgot-password",
        "/reset-password",
        "/auth/callback",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}
