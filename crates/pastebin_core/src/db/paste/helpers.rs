//! Row encoding and join helpers shared by paste storage operations.

use crate::db::tables::USERS;
use crate::error::AppError;
use crate::models::{AuthorSummary, Paste, PasteWithAuthor, User};
use redb::ReadableTable;

pub(crate) fn deserialize_paste(bytes: &[u8]) -> Result<Paste, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn deserialize_user(bytes: &[u8]) -> Result<User, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Look up `{id, name}` for the paste's author.
///
/// A dangling `author_id` (user removed by the auth provider) joins as `None`.
pub(super) fn author_summary<T>(users: &T, paste: &Paste) -> Result<Option<AuthorSummary>, AppError>
where
    T: ReadableTable<&'static str, &'static [u8]>,
{
    let Some(author_id) = paste.author_id.as_deref() else {
        return Ok(None);
    };
    let Some(guard) = users.get(author_id)? else {
        return Ok(None);
    };
    let user = deserialize_user(guard.value())?;
    Ok(Some(AuthorSummary {
        id: user.id,
        name: user.name,
    }))
}

pub(super) fn join_author<T>(users: &T, paste: Paste) -> Result<PasteWithAuthor, AppError>
where
    T: ReadableTable<&'static str, &'static [u8]>,
{
    let author = author_summary(users, &paste)?;
    Ok(PasteWithAuthor { paste, author })
}
