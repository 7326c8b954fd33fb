use super::TieBreak;

/// Configuration for composite evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluateConfig {
    /// Ownership of points lying exactly on an interface.
    pub tie_break: TieBreak,

    /// Evaluate subdomain models on the rayon thread pool.
    pub parallel: bool,

    /// Absolute tolerance for deciding that a point lies on an interface.
    pub interface_tol: f64,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            parallel: true,
            interface_tol: 1e-9,
        }
    }
}
