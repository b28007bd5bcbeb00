//! Intermediate representation shared by the generator and its tests.
pub mod tree;
