//! Core rust implementation of fluxreport, a crate for rendering HTML flux
//! summaries of constraint based metabolic model solutions.

pub mod io;
pub mod metabolic_model;
pub mod report;
pub mod solution;
mod configuration;
