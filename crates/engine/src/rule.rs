// SPDX-License-Identifier: MIT

//! Rules: a named condition bound to an action

use crate::action::{Action, ActionError};
use crate::error::BuildError;
use sweep_core::{Condition, EvalError, File};
use sweep_rulebook::RuleDef;
use thiserror::Error;

/// Errors that can occur while applying a rule to a file.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// An immutable binding of a condition to an action.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    condition: Condition,
    action: Action,
}

impl Rule {
    pub fn new(name: impl Into<String>, condition: Condition, action: Action) -> Self {
        Rule {
            name: name.into(),
            condition,
            action,
        }
    }

    /// Build a rule from its definition, parsing the condition literal.
    pub fn from_def(def: &RuleDef) -> Result<Self, BuildError> {
        let condition = Condition::parse(&def.condition).map_err(|source| {
            BuildError::Condition {
                rule: def.name.clone(),
                source,
            }
        })?;
        let action = Action::from_def(&def.name, &def.action)?;
        Ok(Rule::new(def.name.clone(), condition, action))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the condition and, if it holds, execute the action.
    ///
    /// A false condition is not an error; nothing happens.
    pub fn apply(&self, file: &File) -> Result<(), RuleError> {
        if self.condition.evaluate(file)? {
            tracing::info!(
                rule = %self.name,
                action = self.action.name(),
                file = %file.name(),
                "applying action"
            );
            self.action.execute(file)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
