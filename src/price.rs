//! Price normalization.
//!
//! Catalog prices arrive as free text: `"$19.99"`, `"1,299"`, `"$29/mo"`,
//! `"Contact Us"`, or nothing at all. [`parse_price`] turns any of these into
//! a [`Price`], which is either a known monthly amount or [`Price::Unknown`].
//!
//! Parsing never fails. Anything without a usable number becomes `Unknown`,
//! and every comparison in the crate goes through [`Price`] so the sentinel
//! is applied consistently: two unknowns, or one unknown and one amount, are
//! never presented as a saving.
//!
//! ## Accepted Forms
//!
//! ```text
//! "$19.99"         → Amount(19.99)
//! "1,299.00 USD"   → Amount(1299.0)
//! "€1.299,00"      → Amount(1299.0)    (final `,dd` is a decimal comma)
//! "12,5 €"         → Amount(12.5)
//! "From €29/mo"    → Amount(29.0)
//! "Free"           → Amount(0.0)
//! ""               → Unknown
//! "Contact Us"     → Unknown
//! ```

use std::fmt;

/// A parsed monthly price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Amount(f64),
    Unknown,
}

impl Price {
    /// The numeric amount, if known.
    pub fn amount(self) -> Option<f64> {
        match self {
            Price::Amount(v) => Some(v),
            Price::Unknown => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(v) => f.write_str(&format_money(*v)),
            Price::Unknown => f.write_str("unknown"),
        }
    }
}

/// Parse a raw catalog price.
///
/// Strips currency symbols, thousands separators and unit suffixes by
/// taking the first run of digits (with `,` and `.`) in the text.
pub fn parse_price(raw: &str) -> Price {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("free") {
        return Price::Amount(0.0);
    }

    let Some(start) = trimmed.find(|c: char| c.is_ascii_digit()) else {
        return Price::Unknown;
    };
    // A leading ".5" should still read as 0.5
    let start = if start > 0 && trimmed[..start].ends_with('.') {
        start - 1
    } else {
        start
    };

    let run: String = trimmed[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let run = normalize_separators(run.trim_end_matches(['.', ',']));

    match run.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Price::Amount(v),
        _ => Price::Unknown,
    }
}

/// Rewrite a digit run with `,`/`.` separators into `f64` syntax.
///
/// A final `,` followed by one or two digits is a decimal comma (`1.299,00`);
/// any other `,` is a thousands separator (`1,299.50`).
fn normalize_separators(run: &str) -> String {
    let decimal_comma = run
        .rfind([',', '.'])
        .filter(|&i| run[i..].starts_with(','))
        .is_some_and(|i| (1..=2).contains(&(run.len() - i - 1)));
    if decimal_comma {
        run.replace('.', "").replace(',', ".")
    } else {
        run.replace(',', "")
    }
}

/// Whole cents, used for equality so `0.1 + 0.2` equals `0.3`.
fn cents(v: f64) -> i64 {
    (v * 100.0).round() as i64
}

/// True when both prices are known and equal at cent precision.
pub fn same_amount(a: f64, b: f64) -> bool {
    cents(a) == cents(b)
}

/// Display a dollar amount: `$240` for whole values, `$19.99` otherwise.
pub fn format_money(v: f64) -> String {
    let c = cents(v);
    if c % 100 == 0 {
        format!("${}", c / 100)
    } else {
        format!("${}.{:02}", c / 100, c % 100)
    }
}
