//! Module for rendering an HTML summary of a solved metabolic model

pub mod color;
pub mod display;
pub mod html;
pub mod summary;

use thiserror::Error;

/// Errors raised while building or writing the report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Reaction \"{reaction}\" is displayed but has no flux in the solution")]
    MissingFlux { reaction: String },
    #[error("Table \"{table}\" has rows but no nonzero sort key to normalize colors by")]
    DegenerateTable { table: String },
    #[error("Unable to write report")]
    UnableToWrite(#[from] std::io::Error),
}
