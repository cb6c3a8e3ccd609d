//! Tagged access requirements
//!
//! Gate inputs are an explicit variant (one code, any-of, or all-of)
//! resolved through a single evaluator, instead of branching on the
//! runtime shape of a string-or-list value. Route guards and UI gates
//! both build a [`Requirement`] and evaluate it against the carried
//! [`AuthorizationContext`](crate::context::AuthorizationContext).

use serde::{Deserialize, Serialize};

use crate::context::AuthorizationContext;

/// An access requirement over permission or role codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "codes", rename_all = "camelCase")]
pub enum Requirement {
    /// Exactly this code must be held
    Single(String),
    /// At least one of the codes must be held; empty never matches
    AnyOf(Vec<String>),
    /// Every code must be held; empty is vacuously satisfied
    AllOf(Vec<String>),
}

impl Requirement {
    /// Requirement for one code
    pub fn single(code: impl Into<String>) -> Self {
        Requirement::Single(code.into())
    }

    /// Requirement satisfied by any listed code
    pub fn any_of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::AnyOf(codes.into_iter().map(Into::into).collect())
    }

    /// Requirement satisfied only by all listed codes
    pub fn all_of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::AllOf(codes.into_iter().map(Into::into).collect())
    }

    /// The one evaluator every variant resolves through.
    ///
    /// `granted` is the set of codes held; quantification over an empty
    /// requirement list follows the standard convention (`AnyOf([])` is
    /// false, `AllOf([])` is true).
    pub fn matches(&self, granted: &[String]) -> bool {
        let holds = |code: &str| granted.iter().any(|g| g == code);
        match self {
            Requirement::Single(code) => holds(code),
            Requirement::AnyOf(codes) => codes.iter().any(|c| holds(c)),
            Requirement::AllOf(codes) => codes.iter().all(|c| holds(c)),
        }
    }

    /// Evaluate against the context's permission set
    pub fn allowed_by_permissions(&self, context: &AuthorizationContext) -> bool {
        self.matches(&context.permissions)
    }

    /// Evaluate against the context's role set
    pub fn allowed_by_roles(&self, context: &AuthorizationContext) -> bool {
        self.matches(&context.roles)
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Single(code) => write!(f, "{}", code),
            Requirement::AnyOf(codes) => write!(f, "any of [{}]", codes.join(", ")),
            Requirement::AllOf(codes) => write!(f, "all of [{}]", codes.join(", ")),
        }
    }
}
