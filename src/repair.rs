//! Finding the single `jmp`/`nop` swap that lets a looping program halt.
//!
//! [`repair`] walks the unmodified program once. At every `jmp` or `nop` it meets, it first
//! runs the program with that instruction flipped; since only one fix is allowed, that run is
//! linear and either halts, loops or escapes. Only when it fails does the walk continue past the
//! unflipped instruction. This is a depth-first search that prefers flipping, without any
//! recursion.

use std::fmt::{self, Display};

use rustc_hash::FxHashSet;

use crate::{
    cpu::{run_detect_loop, Cpu, State},
    instruction::Instruction,
    program::Program,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repair {
    /// Index of the flipped instruction. `None` if the program halted without a fix.
    pub flipped: Option<usize>,
    pub accumulator: i64,
}

impl Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flipped {
            Some(index) => write!(
                f,
                "acc {} after flipping pc {}",
                self.accumulator, index
            ),
            None => write!(f, "acc {} without a fix", self.accumulator),
        }
    }
}

/// Program counters taken by the unflipped walk, in execution order.
#[derive(Debug, Default)]
struct PathHistory {
    order: Vec<usize>,
    seen: FxHashSet<usize>,
}

impl PathHistory {
    /// Returns false if `pc` is already on the path.
    fn push(&mut self, pc: usize) -> bool {
        if !self.seen.insert(pc) {
            return false;
        }
        self.order.push(pc);
        true
    }

    fn contains(&self, pc: usize) -> bool {
        self.seen.contains(&pc)
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

pub fn repair(program: &Program) -> Option<Repair> {
    let mut cpu = Cpu::new();
    let mut path = PathHistory::default();

    loop {
        if cpu.state(program) == State::Halted {
            log::debug!("halted after {} steps without a fix", path.len());
            return Some(Repair {
                flipped: None,
                accumulator: cpu.accumulator,
            });
        }
        if !path.push(cpu.pc) {
            log::debug!(
                "no single fix found, looped at pc {} after {:?}",
                cpu.pc,
                path.order
            );
            return None;
        }

        let instruction = program.get(cpu.pc)?;
        if let Some(flipped) = instruction.flipped() {
            log::trace!("trying `{}` on {}", flipped, cpu);
            if let Some(accumulator) = run_flipped(program, cpu, flipped, &path) {
                let repair = Repair {
                    flipped: Some(cpu.pc),
                    accumulator,
                };
                log::debug!("{}", repair);
                return Some(repair);
            }
        }

        if cpu.step(program).is_err() {
            log::debug!("no single fix found, pc {} escapes the program", cpu.pc);
            return None;
        }
    }
}

/// Executes `flipped` in place of the instruction at `cpu.pc` and then runs the rest of the
/// program unmodified. Returns the accumulator if it halts before revisiting any pc of `path` or
/// of its own.
fn run_flipped(
    program: &Program,
    cpu: Cpu,
    flipped: Instruction,
    path: &PathHistory,
) -> Option<i64> {
    let mut cpu = cpu.next(flipped).filter(|next| next.pc <= program.len())?;
    let mut visited = FxHashSet::default();
    loop {
        if cpu.state(program) == State::Halted {
            return Some(cpu.accumulator);
        }
        if path.contains(cpu.pc) || !visited.insert(cpu.pc) {
            return None;
        }
        cpu.step(program).ok()?;
    }
}

/// Flips every `jmp`/`nop` in index order and reruns the whole program each time, falling back
/// to the unmodified program. `O(N²)` for every input.
///
/// Agrees with [`repair`] whenever there is exactly one fix. With several fixes [`repair`] picks
/// the first one in execution order, this picks the lowest index.
pub fn repair_exhaustive(program: &Program) -> Option<Repair> {
    (0..program.len())
        .find_map(|index| halted_repair(&program.flipped(index)?, Some(index)))
        .or_else(|| halted_repair(program, None))
}

fn halted_repair(program: &Program, flipped: Option<usize>) -> Option<Repair> {
    let termination = run_detect_loop(program);
    termination.is_halted().then(|| Repair {
        flipped,
        accumulator: termination.accumulator(),
    })
}
