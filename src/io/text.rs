//! Human-readable text output.
//!
//! Vectors and matrices are written as a type tag followed by their elements in braces. Numbers
//! are formatted like C's `%g`: 6 significant digits, no trailing zeros, and exponential notation
//! for very small and very large magnitudes. Matrix elements are listed column by column.
//!
//! ```text
//! (double[3]) {  1, 2.5, -3  }
//! (dvec3) {{ 1, 2.5, -3 }}
//! (dmat[2]) {  1, 3, /**/ 2, 4  }
//! (dmat2) {{ 1, 3, /**/ 2, 4 }}
//! ```

use std::{
    fmt::{self, Write as _},
    io::{self, Write as _},
};

use crate::{Matrix, Vector};

const CYAN: &str = "\x1B[0;36m";
const RESET: &str = "\x1B[0m";

/// Significant digits used for numbers.
const PRECISION: i32 = 6;

/// Text formatting options.
///
/// The default style is uncolored, untyped and single-line.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// let v = vec3(1.0, 2.5, -3.0);
/// assert_eq!(io::text::vector_string(&v, Style::new()), "(double[3]) {  1, 2.5, -3  }");
/// assert_eq!(io::text::vector_string(&v, Style::new().typed(true)), "(dvec3) {{ 1, 2.5, -3 }}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    colored: bool,
    typed: bool,
    multiline: bool,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            colored: false,
            typed: false,
            multiline: false,
        }
    }

    /// Surrounds the elements with ANSI color codes for terminal output.
    pub const fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Uses the `dvecN`/`dmatN` type tags and double braces for 2 to 4 dimensions.
    ///
    /// Other dimensions are always written untyped.
    pub const fn typed(mut self, typed: bool) -> Self {
        self.typed = typed;
        self
    }

    /// Starts the elements on a new line, and puts every matrix column (or vector element) on a
    /// line of its own.
    pub const fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }
}

/// Formats an `f64` like C's `%g` conversion.
///
/// # Examples
///
/// ```
/// use dmath::io::text::General;
///
/// assert_eq!(General(0.5).to_string(), "0.5");
/// assert_eq!(General(1234567.0).to_string(), "1.23457e+06");
/// assert_eq!(General(0.0001).to_string(), "0.0001");
/// assert_eq!(General(0.00001).to_string(), "1e-05");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct General(pub f64);

impl fmt::Display for General {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if x.is_nan() {
            return f.write_str("nan");
        }
        if x.is_infinite() {
            return f.write_str(if x < 0.0 { "-inf" } else { "inf" });
        }
        if x == 0.0 {
            return f.write_str(if x.is_sign_negative() { "-0" } else { "0" });
        }

        // The exponent has to be taken after rounding to the target precision.
        let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
        let Some((mantissa, exp)) = sci.split_once('e') else {
            return f.write_str(&sci);
        };
        let Ok(exp) = exp.parse::<i32>() else {
            return f.write_str(&sci);
        };

        if exp < -4 || exp >= PRECISION {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
        } else {
            let fixed = format!("{:.*}", (PRECISION - 1 - exp) as usize, x);
            f.write_str(trim_zeros(&fixed))
        }
    }
}

fn trim_zeros(num: &str) -> &str {
    if num.contains('.') {
        num.trim_end_matches('0').trim_end_matches('.')
    } else {
        num
    }
}

/// Forwards to a [`fmt::Write`] while counting the bytes written.
struct Counter<'a, W: ?Sized> {
    inner: &'a mut W,
    written: usize,
}

impl<W: fmt::Write + ?Sized> fmt::Write for Counter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_str(s)?;
        self.written += s.len();
        Ok(())
    }
}

fn write_groups<'a, W: fmt::Write + ?Sized>(
    w: &mut W,
    tag: &str,
    typed: bool,
    groups: impl Iterator<Item = &'a [f64]>,
    group_sep: &str,
    style: Style,
) -> Result<usize, fmt::Error> {
    let mut out = Counter { inner: w, written: 0 };

    out.write_str(tag)?;
    out.write_char(' ')?;
    if style.colored {
        out.write_str(CYAN)?;
    }
    if style.multiline {
        out.write_char('\n')?;
    }
    out.write_str(if typed { "{{ " } else { "{  " })?;

    for (i, group) in groups.enumerate() {
        if i != 0 {
            out.write_str(group_sep)?;
        }
        for (j, &elem) in group.iter().enumerate() {
            if j != 0 {
                out.write_str(", ")?;
            }
            write!(out, "{}", General(elem))?;
        }
    }

    out.write_str(if typed { " }}" } else { "  }" })?;
    if style.colored {
        out.write_str(RESET)?;
    }
    Ok(out.written)
}

fn is_typed(style: Style, n: usize) -> bool {
    style.typed && (2..=4).contains(&n)
}

/// Writes `v` to `w`, returning the number of bytes written.
pub fn write_vector<W: fmt::Write + ?Sized, const N: usize>(
    w: &mut W,
    v: &Vector<f64, N>,
    style: Style,
) -> Result<usize, fmt::Error> {
    let typed = is_typed(style, N);
    let tag = if typed {
        format!("(dvec{})", N)
    } else {
        format!("(double[{}])", N)
    };
    let sep = if style.multiline { ",\n   " } else { ", " };
    write_groups(w, &tag, typed, v.as_slice().chunks(1), sep, style)
}

/// Writes `m` to `w`, returning the number of bytes written.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// let m = Mat2d::from_rows([[1.0, 2.0], [3.0, 4.0]]);
/// let mut out = String::new();
/// let style = Style::new().typed(true).multiline(true);
/// let len = io::text::write_matrix(&mut out, &m, style).unwrap();
/// assert_eq!(out, "(dmat2) \n{{ 1, 3,\n   2, 4 }}");
/// assert_eq!(len, out.len());
/// ```
pub fn write_matrix<W: fmt::Write + ?Sized, const N: usize>(
    w: &mut W,
    m: &Matrix<f64, N, N>,
    style: Style,
) -> Result<usize, fmt::Error> {
    let typed = is_typed(style, N);
    let tag = if typed {
        format!("(dmat{})", N)
    } else {
        format!("(dmat[{}])", N)
    };
    let sep = if style.multiline { ",\n   " } else { ", /**/ " };
    let columns = m.columns().iter().map(|col| col.as_slice());
    write_groups(w, &tag, typed, columns, sep, style)
}

/// A vector or matrix paired with a [`Style`], implementing [`fmt::Display`].
pub struct Styled<'a, T: ?Sized> {
    value: &'a T,
    style: Style,
}

impl<'a, T: ?Sized> Styled<'a, T> {
    pub fn new(value: &'a T, style: Style) -> Self {
        Self { value, style }
    }
}

impl<const N: usize> fmt::Display for Styled<'_, Vector<f64, N>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_vector(f, self.value, self.style).map(drop)
    }
}

impl<const N: usize> fmt::Display for Styled<'_, Matrix<f64, N, N>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix(f, self.value, self.style).map(drop)
    }
}

/// Formats `v` into a new [`String`].
pub fn vector_string<const N: usize>(v: &Vector<f64, N>, style: Style) -> String {
    Styled::new(v, style).to_string()
}

/// Formats `m` into a new [`String`].
pub fn matrix_string<const N: usize>(m: &Matrix<f64, N, N>, style: Style) -> String {
    Styled::new(m, style).to_string()
}

const PRINT_STYLE: Style = Style::new().colored(true).typed(true);

fn print_str(s: &str, newline: bool) -> io::Result<usize> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(s.as_bytes())?;
    if newline {
        stdout.write_all(b"\n")?;
        return Ok(s.len() + 1);
    }
    Ok(s.len())
}

/// Prints `v` to stdout, colored and typed. Returns the number of bytes written.
pub fn print_vector<const N: usize>(v: &Vector<f64, N>) -> io::Result<usize> {
    print_str(&vector_string(v, PRINT_STYLE), false)
}

/// Like [`print_vector`], followed by a newline.
pub fn println_vector<const N: usize>(v: &Vector<f64, N>) -> io::Result<usize> {
    print_str(&vector_string(v, PRINT_STYLE), true)
}

/// Prints `m` to stdout, colored and typed. Returns the number of bytes written.
pub fn print_matrix<const N: usize>(m: &Matrix<f64, N, N>, multiline: bool) -> io::Result<usize> {
    print_str(&matrix_string(m, PRINT_STYLE.multiline(multiline)), false)
}

/// Like [`print_matrix`], followed by a newline.
pub fn println_matrix<const N: usize>(m: &Matrix<f64, N, N>, multiline: bool) -> io::Result<usize> {
    print_str(&matrix_string(m, PRINT_STYLE.multiline(multiline)), true)
}
