//! This module provides a struct for representing reactions
use crate::configuration::CONFIGURATION;
use derive_builder::Builder;
use indexmap::IndexMap;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    ///
    /// Keyed by metabolite id, values are signed stoichiometric
    /// coefficients (negative for consumed metabolites, positive for
    /// produced ones)
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().upper_bound")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction Annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

impl Reaction {
    /// Stoichiometric coefficient of a metabolite in this reaction
    ///
    /// Returns None if the metabolite does not take part in the reaction
    pub fn get_coefficient(&self, metabolite_id: &str) -> Option<f64> {
        self.metabolites.get(metabolite_id).copied()
    }

    /// Whether this reaction exchanges a metabolite with the environment
    ///
    /// # Note:
    /// Exchange reactions are identified by their subsystem, which is either
    /// missing, empty, or the literal "Exchange"
    pub fn is_exchange(&self) -> bool {
        match &self.subsystem {
            None => true,
            Some(subsystem) => subsystem.is_empty() || subsystem == "Exchange",
        }
    }

    /// Metabolites consumed by this reaction (negative coefficients), in
    /// stoichiometry order
    pub fn reactants(&self) -> impl Iterator<Item = (&str, f64)> {
        self.metabolites
            .iter()
            .filter(|(_, coefficient)| **coefficient < 0.0)
            .map(|(id, coefficient)| (id.as_str(), *coefficient))
    }

    /// Metabolites produced by this reaction (positive coefficients), in
    /// stoichiometry order
    pub fn products(&self) -> impl Iterator<Item = (&str, f64)> {
        self.metabolites
            .iter()
            .filter(|(_, coefficient)| **coefficient >= 0.0)
            .map(|(id, coefficient)| (id.as_str(), *coefficient))
    }

    /// Name of the reaction if it has one, its id otherwise
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
