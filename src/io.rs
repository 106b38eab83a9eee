//! Whitespace-delimited polygon text format.
//!
//! A polygon is serialized as its vertex count followed by the interleaved
//! coordinates: `<n> <x0> <y0> ... <x_{n-1}> <y_{n-1}>`. A polygon set is
//! a polygon count followed by that many polygon records. Any whitespace
//! separates tokens; there is no versioning and no escaping.

use std::io::{Read, Write};

use crate::error::{IoError, Result};
use crate::math::Point2;

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<&'a str> {
    tokens
        .next()
        .ok_or_else(|| IoError::UnexpectedEnd(expected).into())
}

fn next_count<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<usize> {
    let token = next_token(tokens, expected)?;
    token.parse().map_err(|_| {
        IoError::InvalidToken {
            token: token.to_owned(),
            expected,
        }
        .into()
    })
}

fn next_coordinate<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<f64> {
    let token = next_token(tokens, "coordinate")?;
    token.parse().map_err(|_| {
        IoError::InvalidToken {
            token: token.to_owned(),
            expected: "coordinate",
        }
        .into()
    })
}

fn parse_polygon_tokens<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Vec<Point2>> {
    let n = next_count(tokens, "vertex count")?;
    let mut poly = Vec::with_capacity(n);
    for _ in 0..n {
        let x = next_coordinate(tokens)?;
        let y = next_coordinate(tokens)?;
        poly.push(Point2::new(x, y));
    }
    Ok(poly)
}

/// Parses one polygon record from a string. Trailing tokens are ignored.
///
/// # Errors
///
/// Returns [`IoError`] when the input ends early or a token fails to parse.
pub fn parse_polygon(input: &str) -> Result<Vec<Point2>> {
    parse_polygon_tokens(&mut input.split_whitespace())
}

/// Parses a polygon set (count followed by that many polygon records) from
/// a string. Trailing tokens are ignored.
///
/// # Errors
///
/// Returns [`IoError`] when the input ends early or a token fails to parse.
pub fn parse_polygons(input: &str) -> Result<Vec<Vec<Point2>>> {
    let mut tokens = input.split_whitespace();
    let n = next_count(&mut tokens, "polygon count")?;
    let mut polys = Vec::with_capacity(n);
    for _ in 0..n {
        polys.push(parse_polygon_tokens(&mut tokens)?);
    }
    Ok(polys)
}

/// Reads one polygon record from a reader.
///
/// # Errors
///
/// Returns [`IoError`] on read failure or malformed input.
pub fn read_polygon<R: Read>(input: &mut R) -> Result<Vec<Point2>> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(IoError::from)?;
    parse_polygon(&text)
}

/// Reads a polygon set from a reader.
///
/// # Errors
///
/// Returns [`IoError`] on read failure or malformed input.
pub fn read_polygons<R: Read>(input: &mut R) -> Result<Vec<Vec<Point2>>> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(IoError::from)?;
    parse_polygons(&text)
}

/// Writes one polygon record followed by a newline.
///
/// # Errors
///
/// Returns [`IoError`] when the writer fails.
pub fn write_polygon<W: Write>(out: &mut W, poly: &[Point2]) -> Result<()> {
    write!(out, "{}", poly.len()).map_err(IoError::from)?;
    for p in poly {
        write!(out, " {} {}", p.x, p.y).map_err(IoError::from)?;
    }
    writeln!(out).map_err(IoError::from)?;
    Ok(())
}

/// Writes a polygon set: the count on its own line, then one polygon
/// record per line.
///
/// # Errors
///
/// Returns [`IoError`] when the writer fails.
pub fn write_polygons<W: Write>(out: &mut W, polys: &[Vec<Point2>]) -> Result<()> {
    writeln!(out, "{}", polys.len()).map_err(IoError::from)?;
    for poly in polys {
        write_polygon(out, poly)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PlanisError;

    #[test]
    fn parse_simple_polygon() {
        let poly = parse_polygon("3 0 0 1 0 0.5 1.5").unwrap();
        assert_eq!(poly.len(), 3);
        assert!((poly[2].x - 0.5).abs() < 1e-12);
        assert!((poly[2].y - 1.5).abs() < 1e-12);
    }

    #[test]
    fn parse_accepts_any_whitespace() {
        let poly = parse_polygon("2\n 0.0\t0.0\n  1.0 1.0\n").unwrap();
        assert_eq!(poly.len(), 2);
    }

    #[test]
    fn parse_empty_polygon() {
        assert!(parse_polygon("0").unwrap().is_empty());
    }

    #[test]
    fn truncated_input_errors() {
        let err = parse_polygon("3 0 0 1").unwrap_err();
        assert!(matches!(
            err,
            PlanisError::Io(IoError::UnexpectedEnd("coordinate"))
        ));
        assert!(matches!(
            parse_polygon("").unwrap_err(),
            PlanisError::Io(IoError::UnexpectedEnd("vertex count"))
        ));
    }

    #[test]
    fn malformed_token_errors() {
        let err = parse_polygon("x 0 0").unwrap_err();
        assert!(matches!(
            err,
            PlanisError::Io(IoError::InvalidToken { .. })
        ));
        let err = parse_polygon("1 zero 0").unwrap_err();
        assert!(matches!(
            err,
            PlanisError::Io(IoError::InvalidToken { .. })
        ));
    }

    #[test]
    fn polygon_round_trip() {
        let poly = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.25, 0.0),
            Point2::new(1.25, -2.5),
        ];
        let mut buf = Vec::new();
        write_polygon(&mut buf, &poly).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let parsed = parse_polygon(&text).unwrap();
        assert_eq!(parsed, poly);
    }

    #[test]
    fn polygon_set_round_trip() {
        let polys = vec![
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            vec![
                Point2::new(2.0, 2.0),
                Point2::new(3.0, 2.0),
                Point2::new(2.5, 3.0),
            ],
        ];
        let mut buf = Vec::new();
        write_polygons(&mut buf, &polys).unwrap();
        let parsed = read_polygons(&mut buf.as_slice()).unwrap();
        assert_eq!(parsed, polys);
    }

    #[test]
    fn set_count_is_enforced() {
        assert!(matches!(
            parse_polygons("2 3 0 0 1 0 0.5 1.5").unwrap_err(),
            PlanisError::Io(IoError::UnexpectedEnd(_))
        ));
    }
}
