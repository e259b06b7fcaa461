mod types;

pub use types::{BusError, ChipError, ParseError, Result};
