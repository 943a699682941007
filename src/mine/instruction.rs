use crate::mine::prelude::*;

/// The instruction letters a wrapper can execute in one step. `B` and `T`
/// carry a point argument; the rest do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionType {
    W,
    S,
    A,
    D,
    Q,
    E,
    Z,
    B,
    F,
    L,
    R,
    T,
    C,
}

impl InstructionType {
    fn letter(self) -> char {
        match self {
            InstructionType::W => 'W',
            InstructionType::S => 'S',
            InstructionType::A => 'A',
            InstructionType::D => 'D',
            InstructionType::Q => 'Q',
            InstructionType::E => 'E',
            InstructionType::Z => 'Z',
            InstructionType::B => 'B',
            InstructionType::F => 'F',
            InstructionType::L => 'L',
            InstructionType::R => 'R',
            InstructionType::T => 'T',
            InstructionType::C => 'C',
        }
    }

    fn from_letter(c: char) -> Result<InstructionType> {
        Ok(match c {
            'W' => InstructionType::W,
            'S' => InstructionType::S,
            'A' => InstructionType::A,
            'D' => InstructionType::D,
            'Q' => InstructionType::Q,
            'E' => InstructionType::E,
            'Z' => InstructionType::Z,
            'B' => InstructionType::B,
            'F' => InstructionType::F,
            'L' => InstructionType::L,
            'R' => InstructionType::R,
            'T' => InstructionType::T,
            'C' => InstructionType::C,
            _ => return Err(anyhow!("unrecognized instruction letter {c}")),
        })
    }

    fn takes_arg(self) -> bool {
        matches!(self, InstructionType::B | InstructionType::T)
    }
}

/// One instruction, optionally carrying a point argument (`B`, `T`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionType,
    pub arg: Option<Point>,
}

impl Instruction {
    pub fn new(kind: InstructionType) -> Instruction {
        Instruction { kind, arg: None }
    }

    pub fn with_point(kind: InstructionType, p: Point) -> Instruction {
        Instruction { kind, arg: Some(p) }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.letter())?;
        if let Some(p) = self.arg {
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// Parses a concatenation of instruction tokens (a program body) with no
/// separator between tokens — `B` and `T` are immediately followed by a
/// `(x,y)` argument with no intervening whitespace.
pub fn parse_instructions(s: &str) -> Result<Vec<Instruction>> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let kind = InstructionType::from_letter(chars[i])
            .with_context(|| format!("at offset {i} in program {s}"))?;
        i += 1;
        if kind.takes_arg() {
            let start = i;
            if chars.get(i) != Some(&'(') {
                return Err(anyhow!("expected '(' after {} at offset {i} in program {s}", kind.letter()));
            }
            let close = chars[i..]
                .iter()
                .position(|&c| c == ')')
                .ok_or_else(|| anyhow!("unterminated point argument at offset {start} in program {s}"))?
                + i;
            let point_str: String = chars[start..=close].iter().collect();
            let point = point_str
                .parse::<Point>()
                .with_context(|| format!("bad point argument at offset {start} in program {s}"))?;
            out.push(Instruction::with_point(kind, point));
            i = close + 1;
        } else {
            out.push(Instruction::new(kind));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_instructions() {
        let program = parse_instructions("WDDSA").unwrap();
        assert_eq!(program.len(), 5);
        assert_eq!(program[0].kind, InstructionType::W);
    }

    #[test]
    fn parses_instructions_with_point_arguments() {
        let program = parse_instructions("DDDB(1,2)").unwrap();
        assert_eq!(program.len(), 4);
        assert_eq!(program[3], Instruction::with_point(InstructionType::B, Point::new(1, 2)));
    }

    #[test]
    fn displays_back_to_the_same_tokens() {
        let inst = Instruction::with_point(InstructionType::T, Point::new(-2, 5));
        assert_eq!(inst.to_string(), "T(-2,5)");
    }

    #[test]
    fn rejects_unrecognized_letters() {
        assert!(parse_instructions("WXD").is_err());
    }

    #[test]
    fn rejects_missing_point_argument() {
        assert!(parse_instructions("WB").is_err());
        assert!(parse_instructions("WB(1,2").is_err());
    }
}
