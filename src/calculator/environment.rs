//! The fixed set of names an expression may refer to.

use std::collections::BTreeMap;
use std::f64::consts::{E, PI};

use crate::config::Config;
use crate::error::Result;
use crate::ops::{Operand, Operation, TANGENT_TOLERANCE};

/// What a name in an expression resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Binding {
    Function(Operation),
    Constant(f64),
}

/// Physical constants offered when enabled in the configuration.
const PHYSICAL_CONSTANTS: &[(&str, f64)] = &[
    ("c", 299_792_458.0),
    ("g", 9.806_65),
    ("h", 6.626_070_15e-34),
    ("na", 6.022_140_76e23),
    ("kb", 1.380_649e-23),
];

/// Mapping from names to functions and constants, read-only during evaluation.
#[derive(Clone, Debug)]
pub struct Environment {
    bindings: BTreeMap<&'static str, Binding>,
    tangent_tolerance: f64,
}

impl Environment {
    /// The standard environment: unary library functions plus `pi` and `e`.
    pub fn new() -> Self {
        let mut bindings = BTreeMap::new();
        for op in Operation::ALL {
            for &name in op.names() {
                bindings.insert(name, Binding::Function(op));
            }
        }
        bindings.insert("pi", Binding::Constant(PI));
        bindings.insert("e", Binding::Constant(E));

        Self {
            bindings,
            tangent_tolerance: TANGENT_TOLERANCE,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let env = Self::new().with_tangent_tolerance(config.tangent_tolerance);
        if config.physical_constants {
            env.with_physical_constants()
        } else {
            env
        }
    }

    pub fn with_physical_constants(mut self) -> Self {
        for &(name, value) in PHYSICAL_CONSTANTS {
            self.bindings.insert(name, Binding::Constant(value));
        }
        self
    }

    pub fn with_tangent_tolerance(mut self, tolerance: f64) -> Self {
        self.tangent_tolerance = tolerance;
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.bindings.get(name).copied()
    }

    pub fn is_function(&self, name: &str) -> bool {
        matches!(self.lookup(name), Some(Binding::Function(_)))
    }

    pub fn is_constant(&self, name: &str) -> bool {
        matches!(self.lookup(name), Some(Binding::Constant(_)))
    }

    /// Apply an operation using this environment's tangent tolerance.
    pub fn call(&self, op: Operation, args: &[Operand]) -> Result<f64> {
        op.apply_with_tolerance(args, self.tangent_tolerance)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
