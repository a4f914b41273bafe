use std::fmt::{self, Display};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    instruction::{Instruction, Op},
    program::Program,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    /// The program counter is one past the last instruction.
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("no instruction at pc {pc}")]
    NotRunning { pc: usize },
    #[error("instruction at pc {from} jumps outside the program")]
    Escaped { from: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cpu {
    pub pc: usize,
    pub accumulator: i64,
}

impl Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cpu [ pc: {}, acc: {} ]", self.pc, self.accumulator)
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, program: &Program) -> State {
        if self.pc == program.len() {
            State::Halted
        } else {
            State::Running
        }
    }

    /// The state after executing `instruction` at the current pc, or `None` if the pc would
    /// leave the address space.
    pub fn next(self, instruction: Instruction) -> Option<Cpu> {
        let Cpu { pc, accumulator } = self;
        Some(match instruction.op {
            Op::Accumulate => Cpu {
                pc: pc.checked_add(1)?,
                accumulator: accumulator + i64::from(instruction.operand),
            },
            Op::Jump => Cpu {
                pc: pc.checked_add_signed(instruction.operand as isize)?,
                accumulator,
            },
            Op::NoOp => Cpu {
                pc: pc.checked_add(1)?,
                accumulator,
            },
        })
    }

    /// Executes the instruction at the current pc.
    ///
    /// On error the cpu is left untouched.
    pub fn step(&mut self, program: &Program) -> Result<State, Fault> {
        let instruction = program
            .get(self.pc)
            .ok_or(Fault::NotRunning { pc: self.pc })?;
        *self = self
            .next(instruction)
            .filter(|next| next.pc <= program.len())
            .ok_or(Fault::Escaped { from: self.pc })?;
        Ok(self.state(program))
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Halted { accumulator: i64 },
    /// `pc` was about to execute for the second time.
    Looped { pc: usize, accumulator: i64 },
    Escaped { from: usize, accumulator: i64 },
}

impl Termination {
    pub fn accumulator(&self) -> i64 {
        match *self {
            Termination::Halted { accumulator }
            | Termination::Looped { accumulator, .. }
            | Termination::Escaped { accumulator, .. } => accumulator,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Termination::Halted { .. })
    }
}

impl Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Halted { accumulator } => write!(f, "halted with acc {}", accumulator),
            Termination::Looped { pc, accumulator } => {
                write!(f, "looped at pc {} with acc {}", pc, accumulator)
            }
            Termination::Escaped { from, accumulator } => {
                write!(f, "escaped from pc {} with acc {}", from, accumulator)
            }
        }
    }
}

/// Runs `program` from pc 0 until it halts or is about to execute an instruction a second time.
pub fn run_detect_loop(program: &Program) -> Termination {
    let mut cpu = Cpu::new();
    let mut visited = FxHashSet::default();

    let termination = loop {
        if cpu.state(program) == State::Halted {
            break Termination::Halted {
                accumulator: cpu.accumulator,
            };
        }
        if !visited.insert(cpu.pc) {
            break Termination::Looped {
                pc: cpu.pc,
                accumulator: cpu.accumulator,
            };
        }
        if let Err(fault) = cpu.step(program) {
            debug_assert!(matches!(fault, Fault::Escaped { .. }));
            break Termination::Escaped {
                from: cpu.pc,
                accumulator: cpu.accumulator,
            };
        }
    };

    log::debug!(
        "{} after {} distinct instructions",
        termination,
        visited.len()
    );
    termination
}
