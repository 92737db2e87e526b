//! Module providing JSON IO for fluxreport Models and flux solutions
//!
//! The model schema follows the COBRA community JSON format (as written by
//! cobrapy's save_json_model); gene and GPR fields present in such files are
//! ignored on input since this crate has no use for them.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder, ReactionBuilderError};
use crate::solution::{FluxSolution, OptimizationStatus};

// region JSON Model
/// Represents a JSON serialized model, used for reading and writing models in json format
#[derive(Serialize, Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: f64,
    upper_bound: f64,
    subsystem: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

/// Represents a JSON serialized flux solution
#[derive(Serialize, Deserialize)]
struct JsonSolution {
    status: String,
    objective_value: Option<f64>,
    fluxes: IndexMap<String, f64>,
}
// endregion JSON Model

// region Conversions
impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        /* Notes and annotations are kept as JSON strings; the data is too
        loosely structured to be worth unpacking further. */
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge.unwrap_or_default(),
            formula: m.formula,
            notes: m.notes.map(|v| v.to_string()),
            annotation: m.annotation.map(|v| v.to_string()),
        }
    }
}

impl From<Metabolite> for JsonMetabolite {
    fn from(m: Metabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: Some(m.charge),
            formula: m.formula,
            notes: m
                .notes
                .map(|n| serde_json::from_str(&n).unwrap_or(Value::String(n))),
            annotation: m
                .annotation
                .map(|a| serde_json::from_str(&a).unwrap_or(Value::String(a))),
        }
    }
}

impl Model {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let json_model = match serde_json::from_str::<JsonModel>(&model_str) {
            Ok(model) => model,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        Model::from_json(json_model)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let json_model = self.to_json();
        let model_string = serde_json::to_string(&json_model)?;
        fs::write(path, model_string)?;
        Ok(())
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut reactions: IndexMap<String, Reaction> = IndexMap::new();
        let mut metabolites: IndexMap<String, Metabolite> = IndexMap::new();
        json_model.metabolites.into_iter().for_each(|m| {
            metabolites.insert(m.id.clone(), Metabolite::from(m));
        });
        for rxn in json_model.reactions {
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id.clone())
                .metabolites(rxn.metabolites)
                .name(rxn.name)
                .lower_bound(rxn.lower_bound)
                .upper_bound(rxn.upper_bound)
                .subsystem(rxn.subsystem)
                .notes(rxn.notes.map(|v| v.to_string()))
                .annotation(rxn.annotation.map(|v| v.to_string()))
                .build()?;
            reactions.insert(rxn.id, new_reaction);
        }
        Ok(Model {
            reactions,
            metabolites,
            id: json_model.id,
            compartments: json_model.compartments,
            version: json_model.version,
        })
    }

    fn to_json(&self) -> JsonModel {
        let json_metabolites: Vec<JsonMetabolite> = self
            .metabolites
            .values()
            .map(|m| m.clone().into())
            .collect();
        let mut json_reactions: Vec<JsonReaction> = Vec::new();
        for r in self.reactions.values() {
            json_reactions.push(JsonReaction {
                id: r.id.clone(),
                name: r.name.clone(),
                metabolites: r.metabolites.clone(),
                lower_bound: r.lower_bound,
                upper_bound: r.upper_bound,
                subsystem: r.subsystem.clone(),
                notes: r
                    .notes
                    .clone()
                    .map(|n| serde_json::from_str(&n).unwrap_or(Value::String(n))),
                annotation: r
                    .annotation
                    .clone()
                    .map(|a| serde_json::from_str(&a).unwrap_or(Value::String(a))),
            })
        }

        JsonModel {
            metabolites: json_metabolites,
            reactions: json_reactions,
            id: self.id.clone(),
            compartments: self.compartments.clone(),
            version: self.version.clone(),
        }
    }
}

fn status_from_label(label: &str) -> Result<OptimizationStatus, JsonError> {
    match label {
        "unoptimized" => Ok(OptimizationStatus::Unoptimized),
        "optimal" => Ok(OptimizationStatus::Optimal),
        "unbounded" => Ok(OptimizationStatus::Unbounded),
        "infeasible" => Ok(OptimizationStatus::Infeasible),
        "almost_optimal" => Ok(OptimizationStatus::AlmostOptimal),
        "numerical_error" => Ok(OptimizationStatus::NumericalError),
        "halted" => Ok(OptimizationStatus::SolverHalted),
        other => Err(JsonError::UnknownStatus(other.to_string())),
    }
}

fn status_to_label(status: OptimizationStatus) -> &'static str {
    match status {
        OptimizationStatus::Unoptimized => "unoptimized",
        OptimizationStatus::Optimal => "optimal",
        OptimizationStatus::Unbounded => "unbounded",
        OptimizationStatus::Infeasible => "infeasible",
        OptimizationStatus::AlmostOptimal => "almost_optimal",
        OptimizationStatus::NumericalError => "numerical_error",
        OptimizationStatus::SolverHalted => "halted",
    }
}

impl FluxSolution {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<FluxSolution, JsonError> {
        let solution_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let json_solution = match serde_json::from_str::<JsonSolution>(&solution_str) {
            Ok(solution) => solution,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        Ok(FluxSolution {
            status: status_from_label(&json_solution.status)?,
            objective_value: json_solution.objective_value,
            fluxes: json_solution.fluxes,
        })
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let json_solution = JsonSolution {
            status: status_to_label(self.status).to_string(),
            objective_value: self.objective_value,
            fluxes: self.fluxes.clone(),
        };
        let solution_string = serde_json::to_string(&json_solution)?;
        fs::write(path, solution_string)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("Unknown solver status \"{0}\"")]
    UnknownStatus(String),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}

// endregion Conversions
