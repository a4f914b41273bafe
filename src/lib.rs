pub mod cpu;
pub mod instruction;
pub mod program;
pub mod repair;
mod solutions;

use std::path::Path;

use anyhow::{Context, Result};

pub use solutions::*;

pub type Solution = fn(&str) -> Result<(i64, Answer)>;

/// Registered days as `(day, solution)` pairs.
pub const ALL_SOLUTIONS: &[(usize, Solution)] = &[(8, day8 as Solution)];

pub fn load_input(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

pub fn default_input(n: usize) -> Result<String> {
    load_input(format!("inputs/{}.txt", n))
}

/// Parses an optionally signed decimal number. Returns `None` for anything else, including
/// empty digit sequences and values that don't fit in an `i32`.
pub fn parse_i32_from_bytes(bytes: &[u8]) -> Option<i32> {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };
    if digits.is_empty() {
        return None;
    }

    // Accumulate towards the sign so that i32::MIN still parses.
    let mut ret: i32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        let d = (b - b'0') as i32;
        ret = ret.checked_mul(10)?;
        ret = if negative {
            ret.checked_sub(d)?
        } else {
            ret.checked_add(d)?
        };
    }
    Some(ret)
}
