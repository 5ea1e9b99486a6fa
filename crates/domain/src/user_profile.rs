use crate::shared::entity::{Entity, ID};

/// Profile of a user of the registration platform, read only for this service
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: ID,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UserProfile {
    pub fn new(id: ID, email: Option<&str>, name: Option<&str>) -> Self {
        Self {
            id,
            email: email.map(String::from),
            name: name.map(String::from),
        }
    }

    /// The email address to notify, `None` if the profile has no usable address
    pub fn contact_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

impl Entity for UserProfile {
    fn id(&self) -> &ID {
        &self.id
    }
}
