use std::fmt::{self, Display};

use anyhow::Result;

use crate::{
    cpu::{run_detect_loop, Termination},
    program::Program,
    repair::repair,
};

/// A part answer that may not exist for a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Found(i64),
    Unsolvable,
}

impl Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Found(value) => write!(f, "{}", value),
            Answer::Unsolvable => write!(f, "no single-instruction fix halts the program"),
        }
    }
}

pub fn day8(input: &str) -> Result<(i64, Answer)> {
    let program: Program = input.parse()?;

    let termination = run_detect_loop(&program);
    if !matches!(termination, Termination::Looped { .. }) {
        log::warn!("program did not loop: {}", termination);
    }

    let part2 = match repair(&program) {
        Some(repair) => Answer::Found(repair.accumulator),
        None => Answer::Unsolvable,
    };

    Ok((termination.accumulator(), part2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    use indoc::indoc;

    fn execute_day<S: Display, T: Display>(
        n: usize,
        f: fn(&str) -> Result<(S, T)>,
        input_loader: fn(usize) -> Result<String>,
    ) -> Result<(S, T)> {
        f(&input_loader(n)?)
    }

    fn execute_day_input<S: Display, T: Display>(
        f: fn(&str) -> Result<(S, T)>,
        input: &str,
    ) -> Result<(S, T)> {
        f(input)
    }

    #[test]
    fn test_day8() -> Result<()> {
        let example = indoc! {"
            nop +0
            acc +1
            jmp +4
            acc +3
            jmp -3
            acc -99
            acc +1
            jmp -4
            acc +6
        "};
        assert_eq!(execute_day_input(day8, example)?, (5, Answer::Found(8)));
        assert_eq!(
            execute_day_input(day8, "jmp +0\n")?,
            (0, Answer::Found(0))
        );
        assert_eq!(
            execute_day_input(day8, "jmp +0\njmp +0\n")?,
            (0, Answer::Unsolvable)
        );
        assert_eq!(
            execute_day(8, day8, default_input)?,
            (404, Answer::Found(265))
        );
        Ok(())
    }

    #[test]
    fn test_day8_malformed() {
        let err = execute_day_input(day8, "nop +0\nnop\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: instruction `nop` has no operand");
    }

    #[test]
    fn answer_display() {
        assert_eq!(Answer::Found(-3).to_string(), "-3");
        assert_eq!(
            Answer::Unsolvable.to_string(),
            "no single-instruction fix halts the program"
        );
    }
}
