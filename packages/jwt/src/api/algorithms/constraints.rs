//! Permit or block lists of algorithm identifiers

use jose_common::{JoseError, JoseResult};
use std::borrow::Cow;

use super::identifiers::NONE;

/// Whether the listed algorithms are the only ones allowed, or the ones refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintType {
    /// Only the listed identifiers may be used
    Permit,
    /// The listed identifiers may not be used
    Block,
}

/// An ordered policy over algorithm identifiers
///
/// Evaluated every time an envelope resolves its algorithm, so a header
/// changed after construction is checked again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmConstraints {
    constraint_type: ConstraintType,
    algorithms: Cow<'static, [Cow<'static, str>]>,
}

impl AlgorithmConstraints {
    /// Accept every registered algorithm
    pub const NO_CONSTRAINTS: Self = Self {
        constraint_type: ConstraintType::Block,
        algorithms: Cow::Borrowed(&[]),
    };

    /// Accept every registered algorithm except `none`
    pub const DISALLOW_NONE: Self = Self {
        constraint_type: ConstraintType::Block,
        algorithms: Cow::Borrowed(&[Cow::Borrowed(NONE)]),
    };

    /// Build a policy from a type and identifiers
    #[must_use]
    pub fn new<I, S>(constraint_type: ConstraintType, algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            constraint_type,
            algorithms: Cow::Owned(algorithms.into_iter().map(Into::into).collect()),
        }
    }

    /// Allow only `algorithms`
    #[must_use]
    pub fn permit<I, S>(algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self::new(ConstraintType::Permit, algorithms)
    }

    /// Refuse `algorithms`
    #[must_use]
    pub fn block<I, S>(algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self::new(ConstraintType::Block, algorithms)
    }

    /// Permit or block
    #[must_use]
    pub fn constraint_type(&self) -> ConstraintType {
        self.constraint_type
    }

    /// The listed identifiers, in the order given
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.algorithms.iter().map(|a| &**a)
    }

    /// Reject `algorithm` if this policy does not allow it
    ///
    /// # Errors
    /// Returns `JoseError::ConstraintViolation` naming the algorithm.
    pub fn check_constraint(&self, algorithm: &str) -> JoseResult<()> {
        let listed = self.algorithms().any(|a| a == algorithm);
        let message = match self.constraint_type {
            ConstraintType::Permit if !listed => {
                format!("'{algorithm}' is not a permitted algorithm.")
            }
            ConstraintType::Block if listed => format!("'{algorithm}' is a blocked algorithm."),
            _ => return Ok(()),
        };
        tracing::debug!(algorithm, "algorithm rejected by constraints");
        Err(JoseError::constraint_violation(message))
    }
}

impl Default for AlgorithmConstraints {
    fn default() -> Self {
        Self::NO_CONSTRAINTS
    }
}
