use crate::mine::prelude::*;

/// Why `verify` stopped short of wrapping every cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyFailure {
    /// Agent `agent_index`'s instruction at `round` returned something
    /// other than `RunResult::Success`.
    Instruction { round: usize, agent_index: usize, result: RunResult },
    /// Every program ran to completion but cells remain unwrapped.
    Incomplete { round: usize },
}

impl VerifyFailure {
    pub fn round(&self) -> usize {
        match self {
            VerifyFailure::Instruction { round, .. } => *round,
            VerifyFailure::Incomplete { round } => *round,
        }
    }
}

impl std::fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyFailure::Instruction { round, agent_index, result } => {
                write!(f, "agent {agent_index} hit {result:?} at round {round}")
            }
            VerifyFailure::Incomplete { round } => {
                write!(f, "programs exhausted at round {round} with cells still unwrapped")
            }
        }
    }
}

/// The result of replaying a `Solution` against a `Map`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    Success { rounds: usize },
    Failure { failure: VerifyFailure, remaining: usize },
}

/// Replays `solution` against `map` round-by-round, in ascending agent
/// index order within each round. `active_count` starts at 1 and grows
/// whenever a round ends with more wrappers than it began with (a `C`
/// clone) — newly active agents execute from the start of their own
/// program on the following round. Never backtracks; mutates `map`.
pub fn verify(map: &mut Map, solution: &Solution) -> VerifyOutcome {
    let mut active_count = 1usize;
    let mut cursors = vec![0usize; solution.0.len()];
    let mut round = 0usize;

    loop {
        let bound = active_count.min(solution.0.len());
        let exhausted = (0..bound).all(|i| cursors[i] >= solution.0[i].len());
        if exhausted {
            break;
        }

        for i in 0..bound {
            if cursors[i] >= solution.0[i].len() {
                continue;
            }
            let instruction = solution.0[i][cursors[i]];
            let result = map.run(i, instruction);
            if result != RunResult::Success {
                return VerifyOutcome::Failure {
                    failure: VerifyFailure::Instruction { round, agent_index: i, result },
                    remaining: map.remaining(),
                };
            }
            cursors[i] += 1;
        }

        if map.wrappers().len() > active_count {
            active_count = map.wrappers().len();
        }
        round += 1;
    }

    if map.remaining() == 0 {
        VerifyOutcome::Success { rounds: round }
    } else {
        VerifyOutcome::Failure {
            failure: VerifyFailure::Incomplete { round },
            remaining: map.remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mine::descriptor::Descriptor;

    #[test]
    fn wraps_a_minimal_corridor_to_completion() {
        let desc: Descriptor = "(0,0),(3,0),(3,1),(0,1)#(0,0)##".parse().unwrap();
        let mut map = Map::new(&desc);
        let solution: Solution = "DD".parse().unwrap();
        match verify(&mut map, &solution) {
            VerifyOutcome::Success { .. } => {}
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(map.remaining(), 0);
    }

    #[test]
    fn reports_incomplete_when_program_runs_out_with_cells_left() {
        let desc: Descriptor = "(0,0),(6,0),(6,1),(0,1)#(0,0)##".parse().unwrap();
        let mut map = Map::new(&desc);
        let solution: Solution = "D".parse().unwrap();
        match verify(&mut map, &solution) {
            VerifyOutcome::Failure { failure: VerifyFailure::Incomplete { .. }, remaining } => {
                assert!(remaining > 0);
            }
            other => panic!("expected incomplete failure, got {other:?}"),
        }
    }

    #[test]
    fn reports_the_failing_instruction_and_does_not_backtrack() {
        let desc: Descriptor = "(0,0),(3,0),(3,1),(0,1)#(0,0)##".parse().unwrap();
        let mut map = Map::new(&desc);
        let solution: Solution = "A".parse().unwrap();
        match verify(&mut map, &solution) {
            VerifyOutcome::Failure { failure: VerifyFailure::Instruction { agent_index, result, .. }, .. } => {
                assert_eq!(agent_index, 0);
                assert_eq!(result, RunResult::OutOfMap);
            }
            other => panic!("expected an instruction failure, got {other:?}"),
        }
    }

    #[test]
    fn clone_grows_active_count_so_the_new_agent_runs_next_round() {
        // Start at (0,0); D,D walks onto the X pad then the C pickup; Z
        // commits it; A walks back onto the pad; C spawns the second agent.
        let desc: Descriptor = "(0,0),(3,0),(3,1),(0,1)#(0,0)##X(1,0);C(2,0)".parse().unwrap();
        let mut map = Map::new(&desc);
        let solution: Solution = "DDZAC#Z".parse().unwrap();
        let outcome = verify(&mut map, &solution);
        assert!(matches!(outcome, VerifyOutcome::Success { .. }));
        assert_eq!(map.wrappers().len(), 2);
    }
}
