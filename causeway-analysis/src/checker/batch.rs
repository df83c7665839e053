//! Whole-model checking. One query's failure never aborts the batch.

use causeway_core::errors::{CausewayErrorCode, CheckError};
use rayon::prelude::*;
use tracing::{error, info};

use super::adapter::QueryAdapter;
use super::statement::ModelChecker;
use crate::model::{CausalQuery, PathResult, ResultCode};

impl<A: QueryAdapter> ModelChecker<A> {
    /// Check every query in order with the configured bounds.
    pub fn check_model(&self, queries: &[CausalQuery]) -> Vec<(CausalQuery, PathResult)> {
        let results: Vec<(CausalQuery, PathResult)> = queries
            .iter()
            .map(|query| (query.clone(), self.check_isolated(query)))
            .collect();
        log_summary(&results);
        results
    }

    fn check_isolated(&self, query: &CausalQuery) -> PathResult {
        self.check(query).unwrap_or_else(|err| {
            error!(
                query = %query,
                code = err.error_code(),
                "statement check failed: {err}"
            );
            PathResult::not_found(fallback_code(&err), self.max_paths(), self.max_path_length())
        })
    }
}

impl<A: QueryAdapter + Sync> ModelChecker<A> {
    /// Same as [`ModelChecker::check_model`], fanned out over the rayon pool.
    /// Output order matches input order.
    pub fn check_model_parallel(
        &self,
        queries: &[CausalQuery],
    ) -> Vec<(CausalQuery, PathResult)> {
        let results: Vec<(CausalQuery, PathResult)> = queries
            .par_iter()
            .map(|query| (query.clone(), self.check_isolated(query)))
            .collect();
        log_summary(&results);
        results
    }
}

/// Result code reported for a query whose check failed outright.
pub fn fallback_code(err: &CheckError) -> ResultCode {
    match err {
        CheckError::AdapterContract { .. } => ResultCode::StatementTypeNotHandled,
        CheckError::Graph(_) | CheckError::InvalidBounds { .. } => ResultCode::NoPathsFound,
    }
}

fn log_summary(results: &[(CausalQuery, PathResult)]) {
    let explained = results.iter().filter(|(_, r)| r.path_found).count();
    info!(
        queries = results.len(),
        explained,
        "model check complete"
    );
}
