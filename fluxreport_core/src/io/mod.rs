//! Module for reading and writing Models and flux solutions
pub mod json;
