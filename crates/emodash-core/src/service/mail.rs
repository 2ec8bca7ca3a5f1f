//! Email operations.

use emodash_api::{Email, EmailId, EmailPatch, EmailQuery, OutgoingEmail, RemoteStore};
use tracing::debug;

use super::{Reloaded, confirm};
use crate::error::Result;

/// Loads every email, across folders.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn reload<S: RemoteStore>(store: &S) -> Result<Vec<Email>> {
    Ok(store.list_emails(EmailQuery::default()).await?)
}

/// Upserts a draft, then reloads. A successful outcome carries the draft's id.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the reload fails.
pub async fn save_draft<S: RemoteStore>(
    store: &S,
    draft: &OutgoingEmail,
) -> Result<Reloaded<EmailId, Vec<Email>>> {
    let outcome = store.save_draft(draft).await;
    if let Ok(id) = &outcome {
        debug!(%id, updated = draft.id.is_some(), "draft saved");
    }
    confirm(outcome, reload(store)).await
}

/// Sends a message, then reloads.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the reload fails.
pub async fn send<S: RemoteStore>(
    store: &S,
    message: &OutgoingEmail,
) -> Result<Reloaded<EmailId, Vec<Email>>> {
    let outcome = store.send_email(message).await;
    if let Ok(id) = &outcome {
        debug!(%id, from_draft = message.id.is_some(), "message sent");
    }
    confirm(outcome, reload(store)).await
}

/// Marks an email read, then reloads.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the reload fails.
pub async fn mark_read<S: RemoteStore>(store: &S, id: EmailId) -> Result<Reloaded<(), Vec<Email>>> {
    let outcome = store.update_email(id, &EmailPatch::read()).await;
    confirm(outcome, reload(store)).await
}

/// Sets the starred flag, then reloads.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the reload fails.
pub async fn set_starred<S: RemoteStore>(
    store: &S,
    id: EmailId,
    starred: bool,
) -> Result<Reloaded<(), Vec<Email>>> {
    let outcome = store.update_email(id, &EmailPatch::starred(starred)).await;
    confirm(outcome, reload(store)).await
}

/// Deletes an email, then reloads.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the reload fails.
pub async fn delete<S: RemoteStore>(store: &S, id: EmailId) -> Result<Reloaded<(), Vec<Email>>> {
    let outcome = store.delete_email(id).await;
    debug!(%id, ok = outcome.is_ok(), "email delete answered");
    confirm(outcome, reload(store)).await
}
