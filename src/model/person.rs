use serde::{Deserialize, Serialize};

pub type PersonId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub is_private: bool,
    pub owner_id: Option<String>,
}

impl Person {
    /// Email address usable for reminders, if it looks like one.
    pub fn contact_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| e.contains('@'))
    }

    pub fn contact_whatsapp(&self) -> Option<&str> {
        self.whatsapp
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }

    /// Whether reminders can reach this person through any channel.
    pub fn is_contactable(&self) -> bool {
        self.contact_email().is_some() || self.contact_whatsapp().is_some()
    }
}
