//! Caller identity passed explicitly into lifecycle operations.

/// Who is performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Requester {
    /// No session.
    #[default]
    Anonymous,
    /// A session vouched for by the auth provider.
    Authenticated(String),
}

impl Requester {
    /// Build a requester from an optional user id.
    pub fn from_user_id(user_id: Option<String>) -> Self {
        match user_id {
            Some(id) => Requester::Authenticated(id),
            None => Requester::Anonymous,
        }
    }

    /// The authenticated user id, if any.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Requester::Anonymous => None,
            Requester::Authenticated(id) => Some(id.as_str()),
        }
    }

    /// Ownership check against a paste's recorded author.
    ///
    /// Anonymous pastes are owned by nobody, and anonymous requesters own
    /// nothing.
    pub fn owns(&self, author_id: Option<&str>) -> bool {
        match (self, author_id) {
            (Requester::Authenticated(id), Some(author)) => id == author,
            _ => false,
        }
    }
}
