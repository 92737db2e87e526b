//! String formatting for reactions and numeric report fields

use crate::metabolic_model::reaction::Reaction;

/// Net direction a reaction carries flux in
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Direction {
    /// Positive flux, the reaction runs left to right as written
    Forward,
    /// Zero or negative flux, the displayed equation is flipped so net
    /// flow always reads left to right
    Reverse,
}

impl Direction {
    pub fn of_flux(flux: f64) -> Direction {
        if flux > 0.0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// Render a reaction equation as an HTML fragment
///
/// Each metabolite becomes a hyperlink to its report anchor, bolded when it
/// is the highlighted one. Coefficients with absolute value 1 are left
/// implicit. Reactants and products sit on either side of an equilibrium
/// arrow, swapped for Reverse so the net-consumed side is always on the left.
pub fn display_reaction(
    reaction: &Reaction,
    highlight: Option<&str>,
    direction: Direction,
) -> String {
    let term = |id: &str, coefficient: f64| -> String {
        let met = if highlight == Some(id) {
            format!("<a href='#{id}'><b>{id}</b></a>")
        } else {
            format!("<a href='#{id}'>{id}</a>")
        };
        if coefficient.abs() == 1.0 {
            met
        } else {
            format!("{} {}", fmt_general(coefficient.abs()), met)
        }
    };

    let left: Vec<String> = reaction
        .reactants()
        .map(|(id, coefficient)| term(id, coefficient))
        .collect();
    let right: Vec<String> = reaction
        .products()
        .map(|(id, coefficient)| term(id, coefficient))
        .collect();

    match direction {
        Direction::Forward => format!("{} &#8651; {}", left.join(" + "), right.join(" + ")),
        Direction::Reverse => format!("{} &#8651; {}", right.join(" + "), left.join(" + ")),
    }
}

/// Format with 6 significant digits, minimal trailing zeros (C's %g)
pub fn fmt_general(value: f64) -> String {
    fmt_sig(value, 6)
}

/// Format a flux magnitude with 2 significant digits (C's %.2g)
pub fn fmt_flux(value: f64) -> String {
    fmt_sig(value, 2)
}

fn fmt_sig(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{}", value);
    }
    let digits = digits.max(1);
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= digits as i32 {
        let rendered = format!("{:.*e}", digits - 1, value);
        // Strip trailing zeros from the mantissa only
        match rendered.split_once('e') {
            Some((mantissa, exp_part)) => {
                let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
                format!("{mantissa}e{exp_part}")
            }
            None => rendered,
        }
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        let rendered = format!("{:.*}", decimals, value);
        if rendered.contains('.') {
            rendered
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            rendered
        }
    }
}
