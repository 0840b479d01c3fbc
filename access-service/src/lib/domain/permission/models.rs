use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Stable identifier of a protected operation.
///
/// Independent of the HTTP route shape; routes are bound to codes when they
/// are registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActionCode(Cow<'static, str>);

impl ActionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Action codes of the API.
pub mod actions {
    use super::ActionCode;

    pub const GET_ALL_USERS: ActionCode = ActionCode::from_static("get_all_users");
    pub const GET_USER: ActionCode = ActionCode::from_static("get_user");
    pub const STORE_USER: ActionCode = ActionCode::from_static("store_user");
    pub const UPDATE_USER: ActionCode = ActionCode::from_static("update_user");
    pub const REMOVE_USER: ActionCode = ActionCode::from_static("remove_user");

    pub const GET_ALL_LISTS: ActionCode = ActionCode::from_static("get_all_lists");
    pub const GET_LIST: ActionCode = ActionCode::from_static("get_list");
    pub const STORE_LIST: ActionCode = ActionCode::from_static("store_list");
    pub const UPDATE_LIST: ActionCode = ActionCode::from_static("update_list");
    pub const REMOVE_LIST: ActionCode = ActionCode::from_static("remove_list");

    /// Read the authenticated user's own profile and permissions
    pub const USER_ME: ActionCode = ActionCode::from_static("user_me");
}

/// Named permission; immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permission {
    pub code: ActionCode,
    pub name: String,
}

impl Permission {
    pub fn new(code: ActionCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}
