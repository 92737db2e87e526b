//! Building the flux summary report
//!
//! One exchange-reaction table, then one section per metabolite in model
//! order. Rows are sorted by a signed flux key with a blank separator row
//! between net-negative and net-positive flux, and colored by magnitude.

use log::{debug, info, warn};

use crate::configuration::CONFIGURATION;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::report::color::flux_color;
use crate::report::display::{display_reaction, fmt_flux, fmt_general, Direction};
use crate::report::html::{HtmlSink, Row};
use crate::report::ReportError;
use crate::solution::FluxSolution;

const EXCHANGE_TITLES: [&str; 7] = [
    "Sub System",
    "Reaction Name",
    "Reaction ID",
    "Reaction",
    "LB",
    "UB",
    "Reaction Flux",
];

const METABOLITE_TITLES: [&str; 8] = [
    "Sub System",
    "Reaction Name",
    "Reaction ID",
    "Reaction",
    "LB",
    "UB",
    "Reaction Flux",
    "Net Flux",
];

/// Write the full flux summary for a solved model
///
/// Skips silently (with a log warning) when the solution carries no
/// optimum to report.
pub fn write_summary<S: HtmlSink>(
    model: &Model,
    solution: &FluxSolution,
    sink: &mut S,
) -> Result<(), ReportError> {
    if !solution.is_optimal() {
        warn!(
            "solver status {:?} has no solution to report, skipping summary",
            solution.status
        );
        return Ok(());
    }
    info!(
        "writing flux summary: {} reactions, {} metabolites",
        model.reactions.len(),
        model.metabolites.len()
    );
    write_exchange_reactions(model, solution, sink)?;
    for metabolite in model.metabolites.values() {
        write_metabolite_reactions(model, metabolite, solution, sink)?;
    }
    Ok(())
}

/// Table of exchange reactions carrying flux
fn write_exchange_reactions<S: HtmlSink>(
    model: &Model,
    solution: &FluxSolution,
    sink: &mut S,
) -> Result<(), ReportError> {
    let epsilon = CONFIGURATION.read().unwrap().flux_epsilon;
    sink.write_fragment("<br />\n")?;
    sink.write_fragment("<a name=\"EXCHANGE\"></a>\n")?;
    sink.write_fragment("Exchange reactions: <br />\n")?;
    sink.write_fragment("<br />\n")?;

    let mut rows = Vec::new();
    for reaction in model.reactions.values() {
        if !reaction.is_exchange() {
            continue;
        }
        let flux = solution
            .flux_of(&reaction.id)
            .ok_or_else(|| ReportError::MissingFlux {
                reaction: reaction.id.clone(),
            })?;
        if flux.abs() < epsilon {
            continue;
        }

        let mut row = Row::new(flux);
        row.set("Sub System", "Exchange");
        row.set("Reaction Name", reaction.display_name());
        row.set("Reaction ID", reaction.id.as_str());
        row.set(
            "Reaction",
            display_reaction(reaction, None, Direction::of_flux(flux)),
        );
        row.set("LB", fmt_general(reaction.lower_bound));
        row.set("UB", fmt_general(reaction.upper_bound));
        row.set("Reaction Flux", fmt_flux(flux.abs()));
        rows.push(row);
    }
    debug!("exchange table: {} qualifying reactions", rows.len());

    finish_table(rows, &EXCHANGE_TITLES, "Exchange", sink)
}

/// Section for one metabolite: anchor and metadata, then a table of the
/// reactions producing or consuming it
///
/// The header fragments are written unconditionally; the table is skipped
/// when no referencing reaction carries flux above the threshold.
fn write_metabolite_reactions<S: HtmlSink>(
    model: &Model,
    metabolite: &Metabolite,
    solution: &FluxSolution,
    sink: &mut S,
) -> Result<(), ReportError> {
    let epsilon = CONFIGURATION.read().unwrap().flux_epsilon;
    sink.write_fragment("<br />\n")?;
    sink.write_fragment(&format!("<a name=\"{}\"></a>\n", metabolite.id))?;
    sink.write_fragment(&format!(
        "Metabolite name: {}<br />\n",
        metabolite.display_name()
    ))?;
    sink.write_fragment(&format!("Metabolite ID: {}<br />\n", metabolite.id))?;
    sink.write_fragment(&format!(
        "Compartment: {}<br />\n",
        metabolite.display_compartment()
    ))?;
    sink.write_fragment("<br />\n")?;

    let mut rows = Vec::new();
    for reaction in model.reactions_involving(&metabolite.id) {
        let flux = solution
            .flux_of(&reaction.id)
            .ok_or_else(|| ReportError::MissingFlux {
                reaction: reaction.id.clone(),
            })?;
        if flux.abs() < epsilon {
            continue;
        }
        let Some(coefficient) = reaction.get_coefficient(&metabolite.id) else {
            continue;
        };
        // Signed rate of this metabolite: negative when consumed net,
        // positive when produced net
        let net_flux = flux * coefficient;

        let mut row = Row::new(-net_flux);
        row.set("Sub System", reaction.subsystem.as_deref().unwrap_or(""));
        row.set("Reaction Name", reaction.display_name());
        row.set("Reaction ID", reaction.id.as_str());
        row.set(
            "Reaction",
            display_reaction(
                reaction,
                Some(metabolite.id.as_str()),
                Direction::of_flux(flux),
            ),
        );
        row.set("LB", fmt_general(reaction.lower_bound));
        row.set("UB", fmt_general(reaction.upper_bound));
        row.set("Reaction Flux", fmt_flux(flux.abs()));
        row.set("Net Flux", fmt_flux(net_flux));
        rows.push(row);
    }

    if rows.is_empty() {
        debug!(
            "metabolite {}: no flux above threshold, table skipped",
            metabolite.id
        );
        return Ok(());
    }

    finish_table(rows, &METABOLITE_TITLES, &metabolite.id, sink)
}

/// Append the separator row, sort, color, and hand the table to the sink
fn finish_table<S: HtmlSink>(
    mut rows: Vec<Row>,
    titles: &[&str],
    table: &str,
    sink: &mut S,
) -> Result<(), ReportError> {
    rows.push(Row::separator());
    // Stable ascending sort: most negative flux first, separator in the
    // middle, most positive last
    rows.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));

    let max_key = rows
        .iter()
        .map(|row| row.sort_key.abs())
        .fold(0.0_f64, f64::max);
    if max_key == 0.0 {
        return Err(ReportError::DegenerateTable {
            table: table.to_string(),
        });
    }
    let colors: Vec<String> = rows
        .iter()
        .map(|row| flux_color(row.sort_key / max_key))
        .collect();

    sink.write_table(&rows, titles, Some(&colors))
}

#[cfg(test)]
mod summary_tests {
    use super::*;
    use crate::metabolic_model::metabolite::MetaboliteBuilder;
    use crate::metabolic_model::reaction::ReactionBuilder;
    use crate::report::html::HtmlWriter;
    use crate::solution::OptimizationStatus;
    use indexmap::IndexMap;

    fn add_metabolite(model: &mut Model, id: &str) {
        model.add_metabolite(
            MetaboliteBuilder::default()
                .id(id.to_string())
                .build()
                .unwrap(),
        );
    }

    fn add_reaction(model: &mut Model, id: &str, subsystem: Option<&str>, stoich: &[(&str, f64)]) {
        let mut metabolites = IndexMap::new();
        for (met, coefficient) in stoich {
            metabolites.insert(met.to_string(), *coefficient);
        }
        model.add_reaction(
            ReactionBuilder::default()
                .id(id.to_string())
                .metabolites(metabolites)
                .subsystem(subsystem.map(str::to_string))
                .build()
                .unwrap(),
        );
    }

    /// Two-metabolite toy: uptake of a, conversion a -> b (R1 carries flux,
    /// R2 is the idle reverse), secretion of b
    fn toy_model() -> Model {
        let mut model = Model::new_empty();
        add_metabolite(&mut model, "a_c");
        add_metabolite(&mut model, "b_c");
        add_reaction(&mut model, "EX_a", None, &[("a_c", -1.0)]);
        add_reaction(&mut model, "EX_b", None, &[("b_c", -1.0)]);
        add_reaction(&mut model, "R1", Some("Toy"), &[("a_c", -1.0), ("b_c", 1.0)]);
        add_reaction(&mut model, "R2", Some("Toy"), &[("b_c", -1.0), ("a_c", 1.0)]);
        model
    }

    fn toy_solution() -> FluxSolution {
        let mut fluxes = IndexMap::new();
        fluxes.insert("EX_a".to_string(), -5.0);
        fluxes.insert("EX_b".to_string(), 5.0);
        fluxes.insert("R1".to_string(), 5.0);
        fluxes.insert("R2".to_string(), 0.0);
        FluxSolution {
            status: OptimizationStatus::Optimal,
            objective_value: Some(5.0),
            fluxes,
        }
    }

    fn render(model: &Model, solution: &FluxSolution) -> String {
        let mut sink = HtmlWriter::new(Vec::new()).unwrap();
        write_summary(model, solution, &mut sink).unwrap();
        sink.close().unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn non_optimal_solution_is_skipped() {
        let model = toy_model();
        let solution = FluxSolution {
            status: OptimizationStatus::Infeasible,
            objective_value: None,
            fluxes: IndexMap::new(),
        };
        let output = render(&model, &solution);
        assert!(!output.contains("EXCHANGE"));
        assert!(!output.contains("<table"));
    }

    #[test]
    fn zero_flux_reactions_never_appear() {
        let output = render(&toy_model(), &toy_solution());
        // R2 carries exactly zero flux, so no table mentions it
        assert!(!output.contains("R2"));
        assert!(output.contains("<td>R1</td>"));
    }

    #[test]
    fn exchange_rows_sorted_with_separator_between_signs() {
        let output = render(&toy_model(), &toy_solution());
        // EX_a (flux -5) first, gray separator, then EX_b (flux +5)
        let uptake = output.find("<td>EX_a</td>").unwrap();
        let separator = output.find("bgcolor=\"#646464\"").unwrap();
        let secretion = output.find("<td>EX_b</td>").unwrap();
        assert!(uptake < separator);
        assert!(separator < secretion);
        // Extremes normalize to full green/red
        assert!(output.contains("bgcolor=\"#8cff8c\""));
        assert!(output.contains("bgcolor=\"#ff8c8c\""));
    }

    #[test]
    fn exchange_table_fields() {
        let output = render(&toy_model(), &toy_solution());
        assert!(output.contains("<a name=\"EXCHANGE\"></a>"));
        assert!(output.contains("<td>Exchange</td>"));
        assert!(output.contains("<td>-1000</td>"));
        assert!(output.contains("<td>1000</td>"));
        // Flux magnitudes are displayed unsigned with two significant digits
        assert!(output.contains("<td>5</td>"));
        // Net-negative exchange flux flips the displayed equation
        assert!(output.contains("&#8651; <a href='#a_c'>a_c</a>"));
    }

    #[test]
    fn metabolite_section_headers_and_net_flux() {
        let output = render(&toy_model(), &toy_solution());
        assert!(output.contains("<a name=\"a_c\"></a>"));
        assert!(output.contains("Metabolite name: a_c<br />"));
        assert!(output.contains("Metabolite ID: a_c<br />"));
        assert!(output.contains("Compartment: <br />"));
        // a is consumed by R1 at net -5, highlighted in the equation
        assert!(output.contains("<a href='#a_c'><b>a_c</b></a>"));
        assert!(output.contains("<td>-5</td>"));
        // The reaction's own subsystem label is used, not "Exchange"
        assert!(output.contains("<td>Toy</td>"));
    }

    #[test]
    fn flux_free_metabolite_keeps_header_but_no_table() {
        let mut model = toy_model();
        add_metabolite(&mut model, "d_c");
        add_reaction(&mut model, "R3", Some("Toy"), &[("d_c", -1.0)]);
        let mut solution = toy_solution();
        solution.fluxes.insert("R3".to_string(), 0.0);

        let output = render(&model, &solution);
        assert!(output.contains("<a name=\"d_c\"></a>"));
        assert!(output.contains("Metabolite ID: d_c<br />"));
        // Tables: exchange, a_c, b_c; none for d_c
        assert_eq!(output.matches("<table").count(), 3);
    }

    #[test]
    fn missing_flux_is_an_error() {
        let model = toy_model();
        let mut solution = toy_solution();
        solution.fluxes.shift_remove("EX_b");

        let mut sink = HtmlWriter::new(Vec::new()).unwrap();
        let result = write_summary(&model, &solution, &mut sink);
        assert!(matches!(
            result,
            Err(ReportError::MissingFlux { reaction }) if reaction == "EX_b"
        ));
    }

    #[test]
    fn all_zero_fluxes_is_a_degenerate_table() {
        let model = toy_model();
        let mut solution = toy_solution();
        for flux in solution.fluxes.values_mut() {
            *flux = 0.0;
        }

        let mut sink = HtmlWriter::new(Vec::new()).unwrap();
        let result = write_summary(&model, &solution, &mut sink);
        assert!(matches!(
            result,
            Err(ReportError::DegenerateTable { table }) if table == "Exchange"
        ));
    }

    #[test]
    fn near_threshold_fluxes_are_filtered() {
        let model = toy_model();
        let mut solution = toy_solution();
        solution.fluxes.insert("EX_b".to_string(), 5e-11);
        let output = render(&model, &solution);
        assert!(!output.contains("<td>EX_b</td>"));
    }
}
