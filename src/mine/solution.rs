use itertools::Itertools;

use crate::mine::instruction::parse_instructions;
use crate::mine::prelude::*;

/// One agent's instruction stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program(pub Vec<Instruction>);

impl std::ops::Deref for Program {
    type Target = [Instruction];
    fn deref(&self) -> &[Instruction] {
        &self.0
    }
}

impl std::str::FromStr for Program {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Program(parse_instructions(s)?))
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for inst in &self.0 {
            write!(f, "{inst}")?;
        }
        Ok(())
    }
}

/// A full multi-agent solution: one program per wrapper, in roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution(pub Vec<Program>);

impl std::str::FromStr for Solution {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let programs = s
            .split('#')
            .enumerate()
            .map(|(i, token)| token.parse::<Program>().with_context(|| format!("in program {i} of solution")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Solution(programs))
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|p| p.to_string()).join("#"))
    }
}
