use std::str::FromStr;

use thiserror::Error;

use crate::instruction::{DecodeError, Instruction};

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: DecodeError,
    },
}

/// A fixed sequence of instructions, indexed from 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, pc: usize) -> Option<Instruction> {
        self.instructions.get(pc).copied()
    }

    /// Returns a copy of the program with the instruction at `index` flipped, or `None` if that
    /// instruction is out of range or can't be flipped.
    pub fn flipped(&self, index: usize) -> Option<Program> {
        let flipped = self.get(index)?.flipped()?;
        let mut instructions = self.instructions.clone();
        instructions[index] = flipped;
        Some(Self { instructions })
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromStr for Program {
    type Err = ProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                line.parse::<Instruction>()
                    .map_err(|source| ProgramError::Line { line: i + 1, source })
            })
            .collect()
    }
}
