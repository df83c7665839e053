//! Gaussian log-likelihood of a path's predicted signs given measurements.
//!
//! Each measurement is treated as `N(value, sigma)`. A node predicted to
//! raise an observable scores `ln P(x > 0)`, otherwise `ln P(x <= 0)`.

use causeway_core::config::ScoringConfig;
use causeway_core::errors::ScoreError;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use super::observations::ObservationTable;
use crate::model::Path;

/// A path and its log-probability score. Higher is better.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPath {
    pub path: Path,
    pub score: f64,
}

pub struct PathScorer {
    sigma: f64,
    loss_of_function: bool,
    include_final_node: bool,
}

impl PathScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            sigma: config.effective_sigma(),
            loss_of_function: config.effective_loss_of_function(),
            include_final_node: config.effective_include_final_node(),
        }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Score and rank `paths`: best score first, ties keep shorter paths
    /// first and otherwise the input order.
    pub fn score(
        &self,
        paths: Vec<Path>,
        table: &ObservationTable,
    ) -> Result<Vec<ScoredPath>, ScoreError> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(ScoreError::InvalidSigma { sigma: self.sigma });
        }
        let standard = Normal::new(0.0, 1.0).map_err(|e| ScoreError::Distribution {
            message: e.to_string(),
        })?;
        // Penalty for a node no observable speaks to.
        let unmeasured = ln_standard_cdf(&standard, 0.0);

        let mut scored = paths
            .into_iter()
            .map(|path| {
                let score = self.path_score(&path, table, &standard, unmeasured);
                ScoredPath { path, score }
            })
            .collect::<Vec<_>>();

        scored.sort_by_key(|s| s.path.len());
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(paths = scored.len(), "paths scored");
        Ok(scored)
    }

    fn path_score(
        &self,
        path: &Path,
        table: &ObservationTable,
        standard: &Normal,
        unmeasured: f64,
    ) -> f64 {
        let nodes = path.nodes();
        let scored_nodes = if self.include_final_node {
            nodes
        } else {
            &nodes[..nodes.len() - 1]
        };
        let perturbation: i8 = if self.loss_of_function { -1 } else { 1 };

        let mut total = 0.0;
        for node in scored_nodes {
            let relations = table.relations_of(&node.base);
            if relations.is_empty() {
                total += unmeasured;
                continue;
            }
            for (observable, sign) in relations {
                let Some(value) = table.value(observable) else {
                    continue;
                };
                let predicted = node.polarity.sign_value() * sign.value() * perturbation;
                // P(x <= 0) = Phi(-value / sigma), P(x > 0) = Phi(value / sigma).
                let z = value / self.sigma;
                total += if predicted <= 0 {
                    ln_standard_cdf(standard, -z)
                } else {
                    ln_standard_cdf(standard, z)
                };
            }
        }
        total
    }
}

/// Below this the plain CDF loses precision and soon underflows to zero.
const TAIL_CUTOFF: f64 = 1e-300;

/// `ln Phi(z)` for the standard normal, finite however far into the lower
/// tail `z` sits.
fn ln_standard_cdf(standard: &Normal, z: f64) -> f64 {
    let p = standard.cdf(z);
    if p > TAIL_CUTOFF || z.is_nan() {
        return p.ln();
    }
    // Asymptotic expansion of the lower tail: Phi(z) ~ phi(z) / -z * (1 - 1/z^2 + 3/z^4).
    let z2 = z * z;
    -0.5 * z2 - (-z).ln() - 0.5 * (2.0 * std::f64::consts::PI).ln()
        + (1.0 - 1.0 / z2 + 3.0 / (z2 * z2)).ln()
}

