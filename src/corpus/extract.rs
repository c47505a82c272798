use crate::{error::{Error, Result}, repository::CardRepository};

/// Raw rules text of a card: all face texts joined by one space, in face order
///
/// # Errors
/// `Error::NotFound` if the repository has no entry for `name`
pub fn extract_text<R>(repository: &R, name: &str) -> Result<String>
where
    R: CardRepository + ?Sized,
{
    repository
        .card(name)
        .map(|record| record.joined_text())
        .ok_or_else(|| Error::not_found(name))
}
