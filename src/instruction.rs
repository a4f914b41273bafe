use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::parse_i32_from_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `acc`: adds the operand to the accumulator.
    Accumulate,
    /// `jmp`: moves the program counter by the operand.
    Jump,
    /// `nop`: does nothing, the operand is ignored.
    NoOp,
}

impl Op {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Accumulate => "acc",
            Op::Jump => "jmp",
            Op::NoOp => "nop",
        }
    }

    fn from_mnemonic(token: &str) -> Option<Self> {
        [Op::Accumulate, Op::Jump, Op::NoOp]
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(token))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty instruction")]
    Empty,
    #[error("instruction `{0}` has no operand")]
    MissingOperand(String),
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("invalid operand `{0}`")]
    InvalidOperand(String),
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub op: Op,
    pub operand: i32,
}

impl Instruction {
    pub fn new(op: Op, operand: i32) -> Self {
        Self { op, operand }
    }

    /// Swaps `jmp` and `nop`, keeping the operand. `acc` can't be flipped.
    pub fn flipped(self) -> Option<Self> {
        let op = match self.op {
            Op::Jump => Op::NoOp,
            Op::NoOp => Op::Jump,
            Op::Accumulate => return None,
        };
        Some(Self { op, ..self })
    }
}

impl FromStr for Instruction {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_ascii_whitespace();
        let mnemonic = tokens.next().ok_or(DecodeError::Empty)?;
        let op = Op::from_mnemonic(mnemonic)
            .ok_or_else(|| DecodeError::UnknownMnemonic(mnemonic.to_string()))?;
        let operand = tokens
            .next()
            .ok_or_else(|| DecodeError::MissingOperand(mnemonic.to_string()))?;
        if let Some(extra) = tokens.next() {
            return Err(DecodeError::TrailingInput(extra.to_string()));
        }

        let operand = parse_i32_from_bytes(operand.as_bytes())
            .ok_or_else(|| DecodeError::InvalidOperand(operand.to_string()))?;
        Ok(Self { op, operand })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.op.mnemonic(), self.operand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        assert_eq!("nop +0".parse(), Ok(Instruction::new(Op::NoOp, 0)));
        assert_eq!("acc -99".parse(), Ok(Instruction::new(Op::Accumulate, -99)));
        assert_eq!("jmp +4".parse(), Ok(Instruction::new(Op::Jump, 4)));
        assert_eq!("JMP -3".parse(), Ok(Instruction::new(Op::Jump, -3)));
        assert_eq!("  Acc\t7 ".parse(), Ok(Instruction::new(Op::Accumulate, 7)));
    }

    #[test]
    fn decode_errors() {
        assert_eq!("".parse::<Instruction>(), Err(DecodeError::Empty));
        assert_eq!(
            "jmp".parse::<Instruction>(),
            Err(DecodeError::MissingOperand("jmp".to_string()))
        );
        assert_eq!(
            "mul +2".parse::<Instruction>(),
            Err(DecodeError::UnknownMnemonic("mul".to_string()))
        );
        assert_eq!(
            "acc two".parse::<Instruction>(),
            Err(DecodeError::InvalidOperand("two".to_string()))
        );
        assert_eq!(
            "nop +1 +2".parse::<Instruction>(),
            Err(DecodeError::TrailingInput("+2".to_string()))
        );
        // the mnemonic is checked before the operand count
        assert_eq!(
            "hcf +1 +2".parse::<Instruction>(),
            Err(DecodeError::UnknownMnemonic("hcf".to_string()))
        );
        assert_eq!(
            "hcf".parse::<Instruction>(),
            Err(DecodeError::UnknownMnemonic("hcf".to_string()))
        );
    }

    #[test]
    fn flip_twice_is_identity() {
        for ins in [Instruction::new(Op::Jump, -4), Instruction::new(Op::NoOp, 3)] {
            let once = ins.flipped().unwrap();
            assert_ne!(once.op, ins.op);
            assert_eq!(once.operand, ins.operand);
            assert_eq!(once.flipped(), Some(ins));
        }
        assert_eq!(Instruction::new(Op::Accumulate, 1).flipped(), None);
    }

    #[test]
    fn display_roundtrips_through_decode() {
        let ins = Instruction::new(Op::Jump, -4);
        assert_eq!(ins.to_string(), "jmp -4");
        assert_eq!(ins.to_string().parse(), Ok(ins));
        assert_eq!(Instruction::new(Op::NoOp, 0).to_string(), "nop +0");
    }
}
