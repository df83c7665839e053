//! The seam between the kind-agnostic engine and a concrete modeling
//! formalism: turning entity references into graph nodes.

use causeway_core::errors::CheckError;
use causeway_core::types::collections::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::model::{CausalQuery, CausalQueryKind, Polarity, ResultCode, Sign};

/// Outcome of an adapter lookup. `Unresolved` carries the terminal result
/// code for the query (or, for source resolution, for one subject).
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    Unresolved(ResultCode),
}

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// One candidate reading of the query subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectCandidate {
    /// No subject given: any upstream cause counts.
    Any,
    Entity(String),
}

/// A base node the object is observed through, and the polarity the query
/// requires it to be reached in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectCandidate {
    pub node: String,
    pub polarity: Polarity,
}

impl ObjectCandidate {
    pub fn new(node: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            node: node.into(),
            polarity,
        }
    }
}

/// Candidate subjects and objects for one query. Both lists are non-empty
/// when resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResolution {
    pub subjects: Vec<SubjectCandidate>,
    pub objects: Vec<ObjectCandidate>,
}

/// Implemented once per modeling formalism.
///
/// Expected lookup misses are `Ok(Resolution::Unresolved(code))`. `Err` is
/// reserved for broken adapter state and aborts the query.
pub trait QueryAdapter {
    /// Resolve subject and object references. May only leave the query
    /// unresolved with `STATEMENT_TYPE_NOT_HANDLED`,
    /// `SUBJECT_MONOMERS_NOT_FOUND` or `OBSERVABLES_NOT_FOUND`.
    fn resolve_statement(
        &self,
        query: &CausalQuery,
    ) -> Result<Resolution<QueryResolution>, CheckError>;

    /// Expand one entity subject into the base node ids it enters the graph
    /// through. May only leave it unresolved with `INPUT_RULES_NOT_FOUND`.
    fn resolve_subject_to_sources(
        &self,
        subject: &str,
    ) -> Result<Resolution<Vec<String>>, CheckError>;
}

/// Lookup-table adapter: entity -> entry nodes, entity -> observable nodes.
#[derive(Debug, Clone)]
pub struct TableAdapter {
    entity_sources: FxHashMap<String, Vec<String>>,
    entity_observables: FxHashMap<String, Vec<(String, Sign)>>,
    handled: FxHashSet<CausalQueryKind>,
}

impl TableAdapter {
    /// Handles every named statement kind, knows no entities.
    pub fn new() -> Self {
        Self {
            entity_sources: FxHashMap::default(),
            entity_observables: FxHashMap::default(),
            handled: [
                CausalQueryKind::Modification,
                CausalQueryKind::RegulateActivity,
                CausalQueryKind::RegulateAmount,
                CausalQueryKind::Influence,
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Register the base nodes `entity` enters the graph through. An entity
    /// registered with no nodes is known but has no input rules.
    pub fn with_sources<I, S>(mut self, entity: &str, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_sources
            .entry(entity.to_string())
            .or_default()
            .extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Register `node` as an observable of `entity`. `sign` is how the node
    /// tracks the entity: negative when the node measures its depletion.
    pub fn with_observable(mut self, entity: &str, node: &str, sign: Sign) -> Self {
        self.entity_observables
            .entry(entity.to_string())
            .or_default()
            .push((node.to_string(), sign));
        self
    }

    /// Restrict the handled statement kinds.
    pub fn with_handled_kinds<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = CausalQueryKind>,
    {
        self.handled = kinds.into_iter().collect();
        self
    }

    pub fn handles(&self, kind: &CausalQueryKind) -> bool {
        self.handled.contains(kind)
    }

    fn subjects(&self, subject: Option<&str>) -> Resolution<Vec<SubjectCandidate>> {
        match subject {
            None => Resolution::Resolved(vec![SubjectCandidate::Any]),
            Some(entity) if self.entity_sources.contains_key(entity) => {
                Resolution::Resolved(vec![SubjectCandidate::Entity(entity.to_string())])
            }
            Some(_) => Resolution::Unresolved(ResultCode::SubjectMonomersNotFound),
        }
    }

    fn objects(&self, query: &CausalQuery) -> Resolution<Vec<ObjectCandidate>> {
        let wanted = query.polarity.target_polarity();
        let objects: Vec<ObjectCandidate> = query
            .object
            .as_deref()
            .and_then(|entity| self.entity_observables.get(entity))
            .map(|observables| {
                observables
                    .iter()
                    .map(|(node, sign)| ObjectCandidate::new(node.as_str(), wanted.through(*sign)))
                    .collect()
            })
            .unwrap_or_default();
        if objects.is_empty() {
            Resolution::Unresolved(ResultCode::ObservablesNotFound)
        } else {
            Resolution::Resolved(objects)
        }
    }
}

impl Default for TableAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryAdapter for TableAdapter {
    fn resolve_statement(
        &self,
        query: &CausalQuery,
    ) -> Result<Resolution<QueryResolution>, CheckError> {
        let handled = match &query.kind {
            CausalQueryKind::Other(_) => false,
            kind @ (CausalQueryKind::Modification
            | CausalQueryKind::RegulateActivity
            | CausalQueryKind::RegulateAmount
            | CausalQueryKind::Influence) => self.handles(kind),
        };
        if !handled {
            return Ok(Resolution::Unresolved(ResultCode::StatementTypeNotHandled));
        }

        let subjects = match self.subjects(query.subject.as_deref()) {
            Resolution::Resolved(subjects) => subjects,
            Resolution::Unresolved(code) => return Ok(Resolution::Unresolved(code)),
        };
        let objects = match self.objects(query) {
            Resolution::Resolved(objects) => objects,
            Resolution::Unresolved(code) => return Ok(Resolution::Unresolved(code)),
        };
        Ok(Resolution::Resolved(QueryResolution { subjects, objects }))
    }

    fn resolve_subject_to_sources(
        &self,
        subject: &str,
    ) -> Result<Resolution<Vec<String>>, CheckError> {
        match self.entity_sources.get(subject) {
            Some(nodes) if !nodes.is_empty() => Ok(Resolution::Resolved(nodes.clone())),
            _ => Ok(Resolution::Unresolved(ResultCode::InputRulesNotFound)),
        }
    }
}
