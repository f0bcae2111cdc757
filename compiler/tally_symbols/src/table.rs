//! Symbol table: build, then freeze.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::SymbolError;

/// Which set a name belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Scalar,
    Array,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Scalar => "a scalar",
            SymbolKind::Array => "an array",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved binding of a name.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Symbol<'a> {
    Scalar(f64),
    Array(&'a [f64]),
}

/// Mutable staging area for a [`SymbolTable`].
///
/// Names are declared first (by discovery or directly), then given values.
/// Declared scalars start at `0`; declared arrays start empty until a length
/// is set.
#[derive(Clone, Debug, Default)]
pub struct SymbolTableBuilder {
    scalars: FxHashMap<String, f64>,
    arrays: FxHashMap<String, Vec<f64>>,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind_of(&self, name: &str) -> Option<SymbolKind> {
        if self.scalars.contains_key(name) {
            Some(SymbolKind::Scalar)
        } else if self.arrays.contains_key(name) {
            Some(SymbolKind::Array)
        } else {
            None
        }
    }

    /// Declare `name` as a scalar. Redeclaring a scalar is a no-op.
    pub fn declare_scalar(&mut self, name: &str) -> Result<(), SymbolError> {
        self.check_free(name, SymbolKind::Scalar)?;
        self.scalars.entry(name.to_owned()).or_insert(0.0);
        Ok(())
    }

    /// Declare `name` as an array. Redeclaring an array is a no-op.
    pub fn declare_array(&mut self, name: &str) -> Result<(), SymbolError> {
        self.check_free(name, SymbolKind::Array)?;
        self.arrays.entry(name.to_owned()).or_default();
        Ok(())
    }

    pub fn set_scalar(&mut self, name: &str, value: f64) -> Result<(), SymbolError> {
        if self.arrays.contains_key(name) {
            return Err(mismatch(name, SymbolKind::Scalar, SymbolKind::Array));
        }
        let slot = self.scalars.get_mut(name).ok_or_else(|| undeclared(name))?;
        *slot = value;
        Ok(())
    }

    /// Replace the whole buffer of a declared array.
    pub fn set_array(&mut self, name: &str, values: Vec<f64>) -> Result<(), SymbolError> {
        *self.array_mut(name)? = values;
        Ok(())
    }

    /// Resize a declared array to `len` zeros.
    pub fn set_array_len(&mut self, name: &str, len: usize) -> Result<(), SymbolError> {
        let buffer = self.array_mut(name)?;
        buffer.clear();
        buffer.resize(len, 0.0);
        Ok(())
    }

    pub fn set_element(&mut self, name: &str, index: usize, value: f64) -> Result<(), SymbolError> {
        let buffer = self.array_mut(name)?;
        let len = buffer.len();
        let slot = buffer
            .get_mut(index)
            .ok_or_else(|| SymbolError::ElementOutOfRange {
                name: name.to_owned(),
                index,
                len,
            })?;
        *slot = value;
        Ok(())
    }

    /// Declare and assign a scalar in one step.
    pub fn with_scalar(mut self, name: &str, value: f64) -> Result<Self, SymbolError> {
        self.declare_scalar(name)?;
        self.set_scalar(name, value)?;
        Ok(self)
    }

    /// Declare and assign an array in one step.
    pub fn with_array(mut self, name: &str, values: Vec<f64>) -> Result<Self, SymbolError> {
        self.declare_array(name)?;
        self.set_array(name, values)?;
        Ok(self)
    }

    /// Freeze into an immutable table.
    pub fn build(self) -> SymbolTable {
        SymbolTable {
            scalars: self.scalars,
            arrays: self.arrays,
        }
    }

    fn check_free(&self, name: &str, requested: SymbolKind) -> Result<(), SymbolError> {
        match self.kind_of(name) {
            Some(existing) if existing != requested => Err(SymbolError::Conflict {
                name: name.to_owned(),
                existing,
                requested,
            }),
            _ => Ok(()),
        }
    }

    fn array_mut(&mut self, name: &str) -> Result<&mut Vec<f64>, SymbolError> {
        if self.scalars.contains_key(name) {
            return Err(mismatch(name, SymbolKind::Array, SymbolKind::Scalar));
        }
        self.arrays.get_mut(name).ok_or_else(|| undeclared(name))
    }
}

fn undeclared(name: &str) -> SymbolError {
    SymbolError::Undeclared {
        name: name.to_owned(),
    }
}

fn mismatch(name: &str, expected: SymbolKind, found: SymbolKind) -> SymbolError {
    SymbolError::KindMismatch {
        name: name.to_owned(),
        expected,
        found,
    }
}

/// Frozen symbol table.
///
/// Only shared access exists after [`SymbolTableBuilder::build`]; the table is
/// `Send + Sync` and is passed by reference into every evaluation.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    scalars: FxHashMap<String, f64>,
    arrays: FxHashMap<String, Vec<f64>>,
}

impl SymbolTable {
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.scalars.get(name).copied()
    }

    pub fn array(&self, name: &str) -> Option<&[f64]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol<'_>> {
        self.scalar(name)
            .map(Symbol::Scalar)
            .or_else(|| self.array(name).map(Symbol::Array))
    }

    /// Scalars sorted by name.
    pub fn scalars(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self
            .scalars
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Arrays sorted by name.
    pub fn arrays(&self) -> Vec<(&str, &[f64])> {
        let mut entries: Vec<_> = self
            .arrays
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Number of names (scalars plus arrays).
    pub fn len(&self) -> usize {
        self.scalars.len() + self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.arrays.is_empty()
    }
}
