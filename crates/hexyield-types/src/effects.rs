//! Effect definitions.
//!
//! An effect definition maps *effect keys* to *operation sets*:
//!
//! ```yaml
//! food:
//!   add: 1
//!   mult: 1.5
//! grass.gold:
//!   add: 2
//! ```
//!
//! An effect key is either a bare resource (`food`) or a terrain-scoped
//! resource (`grass.gold`) that only applies when the acting terrain is
//! `grass`. Operation names are `add`, `set` and `mult`. Keys and operations
//! are kept as raw strings here; parsing and evaluation happen in
//! `hexyield_world::effect`, so a catalog may be loaded before it is known
//! to be well formed.

use crate::ordered::PairList;

/// Operation name to numeric operand, in declaration order.
pub type OperationSet = PairList<f64>;

/// Effect key to operation set, in declaration order.
pub type EffectDefinition = PairList<OperationSet>;

impl PairList<f64> {
    /// Append an `add` operation.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, operand: f64) -> Self {
        self.with("add", operand)
    }

    /// Append a `set` operation.
    #[must_use]
    pub fn set(self, operand: f64) -> Self {
        self.with("set", operand)
    }

    /// Append a `mult` operation.
    #[must_use]
    pub fn mult(self, operand: f64) -> Self {
        self.with("mult", operand)
    }
}
