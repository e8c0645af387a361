//! src/page.rs

use serde::{Deserialize, Serialize};

/// The mutually exclusive views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Register,
    Login,
    AdminLogin,
    Main,
    EditProfile,
    AdminPanel,
}

/// Who may enter a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    User,
    Admin,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Register => "/register",
            Page::Login => "/login",
            Page::AdminLogin => "/admin/login",
            Page::Main => "/app/dashboard",
            Page::EditProfile => "/app/profile",
            Page::AdminPanel => "/admin/users",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Page::Register | Page::Login | Page::AdminLogin => Access::Public,
            Page::Main | Page::EditProfile => Access::User,
            Page::AdminPanel => Access::Admin,
        }
    }
}

/// Per-session state carried between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub page: Page,
    pub username: Option<String>,
    pub admin: bool,
    pub dataset_id: Option<uuid::Uuid>,
}

/// Outcome of checking a session against the access level of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(Page),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn guard(&self, page: Page) -> Guard {
        match page.access() {
            Access::Public => Guard::Allow,
            Access::User if self.is_authenticated() => Guard::Allow,
            Access::User => Guard::Redirect(Page::Login),
            Access::Admin if self.admin => Guard::Allow,
            Access::Admin => Guard::Redirect(Page::AdminLogin),
        }
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn registered(&mut self) {
        self.page = Page::Login;
    }

    pub fn logged_in(&mut self, username: String) {
        self.username = Some(username);
        self.page = Page::Main;
    }

    pub fn admin_logged_in(&mut self) {
        self.admin = true;
        self.page = Page::AdminPanel;
    }

    /// Clears every flag and returns the dataset the session owned, if any.
    pub fn logged_out(&mut self) -> Option<uuid::Uuid> {
        let dataset_id = self.dataset_id.take();
        *self = SessionState {
            page: Page::Login,
            ..SessionState::default()
        };
        dataset_id
    }
}
