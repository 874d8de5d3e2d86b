pub mod axes;
pub mod flags;
pub mod inputs;
pub mod outcomes;
