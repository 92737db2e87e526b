//! This module provides the Model struct for representing an entire metabolic model
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

use indexmap::IndexMap;

/// Represents a Genome Scale Metabolic Model
///
/// Reactions and metabolites are kept in insertion order, which is treated
/// as the model's natural ordering throughout report generation.
#[derive(Clone, Debug)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            id: None,
            compartments: None,
            version: None,
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use fluxreport_core::metabolic_model::model::Model;
    /// use fluxreport_core::metabolic_model::reaction::{Reaction, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a metabolite to the model
    ///
    /// # Parameters
    /// - metabolite: Metabolite to add
    ///
    /// # Examples
    /// ```rust
    /// use fluxreport_core::metabolic_model::metabolite::{Metabolite, MetaboliteBuilder};
    /// use fluxreport_core::metabolic_model::model::Model;
    /// let mut model = Model::new_empty();
    /// let new_metabolite = MetaboliteBuilder::default().id("new_metabolite".to_string()).build().unwrap();
    /// model.add_metabolite(new_metabolite);
    /// ```
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// All reactions a metabolite takes part in, in reaction order
    ///
    /// This is the back-reference from a metabolite to the reactions
    /// producing or consuming it; the reaction's stoichiometry owns the
    /// association.
    pub fn reactions_involving(&self, metabolite_id: &str) -> Vec<&Reaction> {
        self.reactions
            .values()
            .filter(|reaction| reaction.metabolites.contains_key(metabolite_id))
            .collect()
    }
}
