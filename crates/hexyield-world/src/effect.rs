//! Effect evaluation.
//!
//! [`apply_effects`] folds an [`EffectDefinition`] into a [`ResourceMap`]
//! accumulator. Keys are visited in declaration order, and so are the
//! operations under each key:
//!
//! - `add`  -- `output[res] = output[res] + operand` (missing counts as 0)
//! - `set`  -- `output[res] = operand`
//! - `mult` -- `output[res] = ceil(output[res] * operand)` (missing counts as 0)
//!
//! A key scoped to a terrain (`grass.gold`) is skipped unless the acting
//! terrain matches. Operations under a skipped key are not inspected.

use std::str::FromStr;

use hexyield_types::{EffectDefinition, OperationSet, ResourceMap};
use tracing::trace;

use crate::error::WorldError;

/// A single accumulator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOperation {
    /// Add the operand.
    Add,
    /// Overwrite with the operand.
    Set,
    /// Multiply by the operand, rounding up.
    Mult,
}

impl EffectOperation {
    /// Compute the new amount from the current one.
    pub fn apply(self, current: Option<f64>, operand: f64) -> f64 {
        match self {
            Self::Add => current.unwrap_or(0.0) + operand,
            Self::Set => operand,
            Self::Mult => (current.unwrap_or(0.0) * operand).ceil(),
        }
    }
}

impl FromStr for EffectOperation {
    type Err = WorldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "add" => Ok(Self::Add),
            "set" => Ok(Self::Set),
            "mult" => Ok(Self::Mult),
            other => Err(WorldError::UnknownEffectOperation(other.to_owned())),
        }
    }
}

/// A parsed effect key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectKey<'a> {
    /// Terrain the key is scoped to, if any.
    pub terrain: Option<&'a str>,
    /// Resource the operations target.
    pub resource: &'a str,
}

impl<'a> EffectKey<'a> {
    /// Parse `resource` or `terrain.resource`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidEffectKey`] unless the key splits on `.`
    /// into one or two non-empty segments.
    pub fn parse(key: &'a str) -> Result<Self, WorldError> {
        let invalid = || WorldError::InvalidEffectKey(key.to_owned());
        let mut segments = key.split('.');
        let first = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let second = segments.next();
        if segments.next().is_some() {
            return Err(invalid());
        }
        match second {
            None => Ok(Self {
                terrain: None,
                resource: first,
            }),
            Some("") => Err(invalid()),
            Some(resource) => Ok(Self {
                terrain: Some(first),
                resource,
            }),
        }
    }

    /// Whether the key applies when `acting_terrain` is acting.
    pub fn applies_to(&self, acting_terrain: &str) -> bool {
        self.terrain.is_none_or(|terrain| terrain == acting_terrain)
    }
}

/// Apply every operation of `effects` to `output`, with `acting_terrain`
/// deciding which scoped keys apply.
///
/// On error, `output` may hold partially applied results.
///
/// # Errors
///
/// Returns [`WorldError::InvalidEffectKey`] for a malformed key and
/// [`WorldError::UnknownEffectOperation`] for an operation other than
/// `add`, `set` or `mult`.
pub fn apply_effects(
    output: &mut ResourceMap,
    acting_terrain: &str,
    effects: &EffectDefinition,
) -> Result<(), WorldError> {
    for (raw_key, operations) in effects.iter() {
        let key = EffectKey::parse(raw_key)?;
        if !key.applies_to(acting_terrain) {
            trace!(key = raw_key, acting_terrain, "Scoped effect skipped");
            continue;
        }
        apply_operations(output, key.resource, operations)?;
    }
    Ok(())
}

fn apply_operations(
    output: &mut ResourceMap,
    resource: &str,
    operations: &OperationSet,
) -> Result<(), WorldError> {
    for (name, operand) in operations.iter() {
        let operation: EffectOperation = name.parse()?;
        let next = operation.apply(output.get(resource).copied(), *operand);
        output.insert(resource.to_owned(), next);
    }
    Ok(())
}

/// Check every key and operation of `effects` without evaluating them.
///
/// Unlike [`apply_effects`], scoped keys are checked regardless of terrain.
///
/// # Errors
///
/// Same as [`apply_effects`].
pub fn validate_effects(effects: &EffectDefinition) -> Result<(), WorldError> {
    for (raw_key, operations) in effects.iter() {
        EffectKey::parse(raw_key)?;
        for (name, _) in operations.iter() {
            name.parse::<EffectOperation>()?;
        }
    }
    Ok(())
}
