//! Record service: the operations the HTTP layer calls.
//!
//! [`QrCodeService`] is generic over [`QrCodeStore`] and owns request
//! normalisation and validation, so handlers only translate results.

mod records;
mod resolver;
mod stats;

pub use resolver::{MatchKind, Resolved, resolve};
pub use stats::{QrCodeStats, StatsWindows};

use crate::entities::QrCodeStore;

#[derive(Debug)]
pub struct QrCodeService<S> {
    store: S,
}

impl<S: QrCodeStore> QrCodeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
