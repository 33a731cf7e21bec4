//! Entity-to-DTO mappers

use userdir_core::User;

use super::responses::UserView;

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            last_login: user.last_login,
        }
    }
}
