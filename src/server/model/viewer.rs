//! Viewer identity handed over by the authentication layer.
//!
//! Authentication happens outside this server: a front layer verifies the caller and inserts a
//! [`ViewerIdentity`] into the request extensions. A request without one is anonymous.

use crate::engine::ranking::Viewer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerIdentity {
    /// Opaque id issued by the authentication provider, matched against `owner_id` columns
    pub user_id: String,
}

impl ViewerIdentity {
    pub fn viewer(identity: Option<&ViewerIdentity>) -> Viewer {
        match identity {
            Some(_) => Viewer::Authenticated,
            None => Viewer::Anonymous,
        }
    }
}
