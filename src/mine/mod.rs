/*
 *  A deterministic simulator (with rollback) for the ICFPC 2019
 *  mine-wrapping contest task, plus a solution verifier.
 */

pub mod consts;
pub mod descriptor;
pub mod geometry;
pub mod grid;
pub mod instruction;
pub mod map;
pub mod rational;
pub mod solution;
pub mod verifier;
pub mod wrapper;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        consts::*,
        descriptor::Descriptor,
        geometry::Point,
        grid::{Booster, Cell, Grid},
        instruction::{Instruction, InstructionType},
        map::{Map, RunResult},
        rational::Rational,
        solution::{Program, Solution},
        verifier::{verify, VerifyFailure, VerifyOutcome},
        wrapper::Wrapper,
    };
}
