//! The textual rendering of expressions.
//!
//! A polynomial renders on one line as parenthesized groups by descending
//! degree, e.g. ` ( + C1 R1 ) s + ( + 1 )`. Within a group every symbolic
//! monomial prints its sign, its coefficient when it is not unity, and its
//! symbols; purely numeric monomials are accumulated and printed last. An
//! empty polynomial prints ` NULL`.

use std::fmt::Write;

use crate::poly::{Monomial, Polynomial, TransferFunction};

/// Renders one polynomial on a single line, without a line break.
pub fn render(poly: &Polynomial) -> String {
    let mut out = String::new();
    let terms = poly.terms();
    if terms.is_empty() {
        out.push_str(" NULL");
        return out;
    }
    let mut start = 0;
    while start < terms.len() {
        let degree = terms[start].degree;
        let len = terms[start..].iter().take_while(|term| term.degree == degree).count();
        out.push_str(if start == 0 { " (" } else { " + (" });
        render_group(&mut out, &terms[start..start + len]);
        out.push_str(" )");
        if degree != 0 {
            out.push_str(" s");
            if degree > 1 {
                let _ = write!(out, "^{degree}");
            }
        }
        start += len;
    }
    out
}

/// Renders one degree group.
///
/// A group whose every term vanished in fusion still prints a single `+ 0`,
/// as does a group with no terms at all to print.
fn render_group(out: &mut String, terms: &[Monomial]) {
    let mut acc = 0.0;
    let mut zero = true;
    for term in terms {
        if term.coeff != 0.0 {
            zero = false;
            if term.symbols.is_empty() {
                acc += term.coeff;
            } else {
                out.push_str(if term.coeff < 0.0 { " -" } else { " +" });
                if term.coeff != 1.0 && term.coeff != -1.0 {
                    let _ = write!(out, " {}", short(term.coeff.abs()));
                }
                for symbol in term.symbols.iter() {
                    let _ = write!(out, " {symbol}");
                }
            }
        }
    }
    if acc != 0.0 || zero {
        if acc < 0.0 {
            out.push_str(" -");
            acc = -acc;
        } else {
            out.push_str(" +");
        }
        let _ = write!(out, " {}", short(acc));
    }
}

/// Renders the numerator over the denominator, separated by a dashed line as
/// long as the longer of the two lines (line break included).
pub fn render_transfer(tf: &TransferFunction) -> String {
    let numerator = render(&tf.numerator);
    let denominator = render(&tf.denominator);
    let width = numerator.len().max(denominator.len()) + 1;
    format!("{numerator}\n{}\n{denominator}\n", "-".repeat(width))
}

/// Formats a nonnegative coefficient with three significant digits, after
/// the manner of the C `%.3g` conversion.
fn short(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    // round to three significant digits up front, so that e.g. 999.9 decides
    // for exponent notation as 1e+03
    let scale = 10f64.powi(2 - magnitude);
    let rounded = (value * scale).round() / scale;
    let magnitude = rounded.abs().log10().floor() as i32;
    if !(-4..3).contains(&magnitude) {
        let mantissa = rounded / 10f64.powi(magnitude);
        let mut digits = format!("{mantissa:.2}");
        trim_zeros(&mut digits);
        format!("{digits}e{magnitude:+03}")
    } else {
        let decimals = (2 - magnitude).max(0) as usize;
        let mut digits = format!("{rounded:.decimals$}");
        trim_zeros(&mut digits);
        digits
    }
}

fn trim_zeros(digits: &mut String) {
    if digits.contains('.') {
        while digits.ends_with('0') {
            digits.pop();
        }
        if digits.ends_with('.') {
            digits.pop();
        }
    }
}
