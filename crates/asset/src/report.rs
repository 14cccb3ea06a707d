//! Recoverable problems collected during a load.

use crate::error::AssetError;

/// Outcome of a successful [`crate::Model::load`].
///
/// A load succeeds whenever the scene file itself could be read; anything
/// that went wrong below that level ends up here instead of failing the load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub warnings: Vec<AssetError>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn warn(&mut self, err: AssetError) {
        log::warn!("{err}");
        self.warnings.push(err);
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warnings matching a predicate, e.g. `|e| matches!(e, AssetError::EmptyVertexPool)`.
    pub fn count(&self, pred: impl Fn(&AssetError) -> bool) -> usize {
        self.warnings.iter().filter(|&e| pred(e)).count()
    }
}
