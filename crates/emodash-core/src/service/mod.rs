//! Store operations used by the dashboard.
//!
//! Every mutation the store answers is followed by a full reload of the
//! affected collection, whether the store accepted it or not. The reload is
//! the confirmation: nothing is written to the cache until it succeeds. Only
//! a transport failure, where no answer came back, skips the reload.

pub mod journal;
pub mod mail;
pub mod tasks;

use std::future::Future;

use tracing::warn;

use crate::error::Result;

/// A collection reloaded after a mutation.
#[derive(Debug)]
pub struct Reloaded<T, C> {
    /// What the mutation returned, or why the store refused it.
    pub outcome: emodash_api::Result<T>,
    /// The collection as the store now has it.
    pub items: C,
}

impl<C> Reloaded<(), C> {
    /// A plain load, with nothing to confirm.
    pub const fn loaded(items: C) -> Self {
        Self {
            outcome: Ok(()),
            items,
        }
    }
}

impl<T, C> Reloaded<T, C> {
    /// Drops the mutation's return value, keeping a refusal.
    pub fn discard(self) -> Reloaded<(), C> {
        Reloaded {
            outcome: self.outcome.map(|_| ()),
            items: self.items,
        }
    }
}

/// Runs `reload` after a mutation unless the mutation never reached the store.
async fn confirm<T, C>(
    outcome: emodash_api::Result<T>,
    reload: impl Future<Output = Result<C>>,
) -> Result<Reloaded<T, C>> {
    match outcome {
        Err(err) if err.is_transport() => Err(err.into()),
        outcome => {
            if let Err(err) = &outcome {
                warn!(error = %err, "store refused mutation, reloading");
            }
            Ok(Reloaded {
                outcome,
                items: reload.await?,
            })
        }
    }
}
