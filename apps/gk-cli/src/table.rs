//! Whitespace-delimited property tables.

use std::io::{self, Write};

/// Header line of the transport-property table.
pub const TRANS_PROPS_HEADER: &str = "#  1:T[K]      2:mu[Pa.s]      3:k[W/(m.K)]\n";

/// Format like C `printf("%{width}.{precision}e", value)`.
///
/// Exponent always carries a sign and at least two digits; the result is
/// right-aligned in `width` columns.
pub fn format_exp(value: f64, width: usize, precision: usize) -> String {
    let body = if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let inf = if value > 0.0 { "inf" } else { "-inf" };
        inf.to_string()
    } else {
        let rust = format!("{value:.precision$e}");
        match rust.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            None => rust,
        }
    };
    format!("{body:>width$}")
}

/// One table row: ` %12.6e %12.6e %12.6e\n`.
pub fn format_row(t: f64, mu: f64, k: f64) -> String {
    format!(
        " {} {} {}\n",
        format_exp(t, 12, 6),
        format_exp(mu, 12, 6),
        format_exp(k, 12, 6)
    )
}

/// Write the header and one row per `(T, mu, k)` sample.
pub fn write_trans_props<W, I>(out: &mut W, rows: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = (f64, f64, f64)>,
{
    out.write_all(TRANS_PROPS_HEADER.as_bytes())?;
    let mut count = 0;
    for (t, mu, k) in rows {
        out.write_all(format_row(t, mu, k).as_bytes())?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}
