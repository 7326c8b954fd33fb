//! Per-subdomain loss histories.
//!
//! Losses are computed by the training loop; this module only stores them
//! in epoch order and hands them to plotting code.

use thiserror::Error;
use tracing::warn;

/// Loss components of one subdomain for one epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LossRecord {
    /// Boundary-condition loss.
    pub boundary: f64,
    /// PDE-residual loss.
    pub pde: f64,
    /// Interface (or initial-condition) loss.
    pub interface: f64,
    /// Total loss.
    pub total: f64,
}

impl LossRecord {
    fn is_finite(&self) -> bool {
        [self.boundary, self.pde, self.interface, self.total]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Column view of a loss history, one entry per epoch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LossSeries {
    pub epochs: Vec<usize>,
    pub boundary: Vec<f64>,
    pub pde: Vec<f64>,
    pub interface: Vec<f64>,
    pub total: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvergenceError {
    #[error("unknown subdomain {id}, recorder tracks {domain_count}")]
    UnknownSubdomain { id: usize, domain_count: usize },
}

/// Append-only loss histories, one per subdomain id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvergenceRecorder {
    histories: Vec<Vec<LossRecord>>,
}

impl ConvergenceRecorder {
    #[must_use]
    pub fn new(domain_count: usize) -> Self {
        Self {
            histories: vec![Vec::new(); domain_count],
        }
    }

    /// Appends the next epoch's losses for subdomain `id`.
    ///
    /// Non-finite losses are stored as given and logged.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergenceError::UnknownSubdomain`] if `id` is out of range.
    pub fn record(&mut self, id: usize, losses: LossRecord) -> Result<(), ConvergenceError> {
        let domain_count = self.histories.len();
        let history = self
            .histories
            .get_mut(id)
            .ok_or(ConvergenceError::UnknownSubdomain { id, domain_count })?;

        if !losses.is_finite() {
            warn!(id, epoch = history.len(), ?losses, "non-finite loss recorded");
        }
        history.push(losses);
        Ok(())
    }

    /// The recorded epochs of subdomain `id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergenceError::UnknownSubdomain`] if `id` is out of range.
    pub fn history(&self, id: usize) -> Result<&[LossRecord], ConvergenceError> {
        self.histories
            .get(id)
            .map(Vec::as_slice)
            .ok_or(ConvergenceError::UnknownSubdomain {
                id,
                domain_count: self.histories.len(),
            })
    }

    /// Number of epochs recorded for subdomain `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergenceError::UnknownSubdomain`] if `id` is out of range.
    pub fn epochs(&self, id: usize) -> Result<usize, ConvergenceError> {
        self.history(id).map(<[LossRecord]>::len)
    }

    /// Splits the history of subdomain `id` into plot-ready columns.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergenceError::UnknownSubdomain`] if `id` is out of range.
    pub fn series(&self, id: usize) -> Result<LossSeries, ConvergenceError> {
        let history = self.history(id)?;
        Ok(LossSeries {
            epochs: (0..history.len()).collect(),
            boundary: history.iter().map(|r| r.boundary).collect(),
            pde: history.iter().map(|r| r.pde).collect(),
            interface: history.iter().map(|r| r.interface).collect(),
            total: history.iter().map(|r| r.total).collect(),
        })
    }
}
