//! Fixed, ordered puzzle registry.

use crate::descriptor::PuzzleDescriptor;
use crate::{HarnessError, Result};
use std::collections::HashSet;

/// Read-only view over a static puzzle table.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    puzzles: &'static [PuzzleDescriptor],
}

impl Registry {
    pub const fn new(puzzles: &'static [PuzzleDescriptor]) -> Self {
        Self { puzzles }
    }

    /// Look a puzzle up by exact name.
    pub fn find(&self, name: &str) -> Result<&'static PuzzleDescriptor> {
        self.puzzles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| HarnessError::NotFound(name.to_string()))
    }

    /// Puzzles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static PuzzleDescriptor> {
        self.puzzles.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.puzzles.iter().map(|p| p.name)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// Validate every descriptor and reject duplicate names.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for puzzle in self.puzzles {
            if !seen.insert(puzzle.name) {
                return Err(HarnessError::DuplicateName(puzzle.name.to_string()));
            }
            puzzle.validate()?;
        }
        Ok(())
    }
}
