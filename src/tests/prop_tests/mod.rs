mod generator;
use generator::*;

use proptest::prelude::*;

use crate::prelude::*;

const CASES: u32 = 256;

pub mod state_evolution;

#[cfg(feature = "serde")]
pub mod serialization;
