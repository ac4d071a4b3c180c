//! Page routes

/// The two views of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Question card with Yes / No
    #[default]
    Landing,
    /// Date details and the calendar link
    Invite,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Invite => "/invite",
        }
    }

    /// Unknown paths render the landing page
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/invite" => Route::Invite,
            _ => Route::Landing,
        }
    }
}
