#![allow(dead_code)]

pub mod mine;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::{
            collections::{BTreeMap, BTreeSet, HashMap, HashSet},
            ops::{Add, Sub},
        };
    }
}

pub mod prelude {
    pub use super::mine::prelude::*;
    pub use super::utils::prelude::*;
}
