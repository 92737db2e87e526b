//! Module for representing the solution of an already solved flux balance
//! analysis problem
//!
//! The optimization itself is owned by an upstream modeling library; this
//! crate only consumes its output.

use indexmap::IndexMap;

/// Struct representing the solution to a flux balance analysis optimization
#[derive(Clone, Debug)]
pub struct FluxSolution {
    /// The status of the optimization problem, representing if the optimization was
    /// completed successfully
    pub status: OptimizationStatus,
    /// Optimized value of the objective
    ///
    /// Some(f64) if the optimization was completed successfully, None otherwise
    pub objective_value: Option<f64>,
    /// Flux carried by each reaction at the optimum
    ///
    /// Keyed by reaction id, in the same order as the model's reactions
    pub fluxes: IndexMap<String, f64>,
}

impl FluxSolution {
    /// Flux carried by a reaction, None if the solution has no entry for it
    pub fn flux_of(&self, reaction_id: &str) -> Option<f64> {
        self.fluxes.get(reaction_id).copied()
    }

    /// Whether the solver found an optimum worth reporting
    pub fn is_optimal(&self) -> bool {
        matches!(
            self.status,
            OptimizationStatus::Optimal | OptimizationStatus::AlmostOptimal
        )
    }
}

/// Status of an optimization problem
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OptimizationStatus {
    /// Problem has not yet attempted to be optimized
    Unoptimized,
    /// Problem has been optimized
    Optimal,
    /// Problem can't be optimized because objective value is not bounded
    Unbounded,
    /// Problem can't be solved because it is infeasible (conflicting constraints)
    Infeasible,
    /// An approximate solution has been found
    AlmostOptimal,
    /// A numerical error occurred during solving
    NumericalError,
    /// The solver hit the maximum allowed iterations, or max time, or made insufficient progress
    SolverHalted,
}

#[cfg(test)]
mod solution_tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn flux_lookup() {
        let mut fluxes = IndexMap::new();
        fluxes.insert("R1".to_string(), 5.0);
        fluxes.insert("R2".to_string(), 0.0);
        let solution = FluxSolution {
            status: OptimizationStatus::Optimal,
            objective_value: Some(5.0),
            fluxes,
        };
        assert!((solution.flux_of("R1").unwrap() - 5.0).abs() < 1e-25);
        assert!((solution.flux_of("R2").unwrap()).abs() < 1e-25);
        assert!(solution.flux_of("R3").is_none());
    }

    #[test]
    fn optimal_statuses() {
        let solution = FluxSolution {
            status: OptimizationStatus::Optimal,
            objective_value: Some(1.0),
            fluxes: IndexMap::new(),
        };
        assert!(solution.is_optimal());
        let almost = FluxSolution {
            status: OptimizationStatus::AlmostOptimal,
            ..solution.clone()
        };
        assert!(almost.is_optimal());
        let infeasible = FluxSolution {
            status: OptimizationStatus::Infeasible,
            objective_value: None,
            fluxes: IndexMap::new(),
        };
        assert!(!infeasible.is_optimal());
    }
}
