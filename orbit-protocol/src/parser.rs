//! TLE set parsing and fixed-column element decoding

use chrono::{Duration, NaiveDate};
use nom::{
    bytes::complete::tag,
    character::complete::{line_ending, multispace0, not_line_ending},
    combinator::{eof, opt, recognize},
    error::ErrorKind,
    multi::{fold_many0, many0_count},
    sequence::pair,
};
use orbit_types::prelude::*;
use std::{collections::BTreeSet, ops::Range};

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Unparsed trailing input")]
    TrailingInput(I),
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TleError {
    #[error("TLE line {line} is too short ({len} characters)")]
    LineTooShort { line: u8, len: usize },
    #[error("TLE line {0} does not start with its line number")]
    LineNumber(u8),
    #[error("Invalid TLE field '{0}'")]
    Field(&'static str),
    #[error("TLE lines disagree on the catalog number")]
    CatalogMismatch,
}

/// Parse a set of three-line (name, line 1, line 2) TLE entries.
///
/// Blank lines between entries are allowed, the last line may omit its line ending.
pub fn parse_unstructured_tle_set(set: &str) -> Result<&str, BTreeSet<UnstructuredTle>> {
    let (s, tle_set) = fold_many0(
        tle,
        BTreeSet::new,
        |mut tle_set: BTreeSet<UnstructuredTle>, tle| {
            tle_set.insert(tle);
            tle_set
        },
    )(set)?;
    let (s, _) = multispace0(s)?;
    if s.is_empty() {
        Ok((s, tle_set))
    } else {
        Err(nom::Err::Error(ParseError::TrailingInput(s)))
    }
}

fn tle(s: &str) -> Result<&str, UnstructuredTle> {
    let (s, _) = many0_count(line_ending)(s)?;
    let (s, name) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line1) = recognize(pair(tag("1 "), not_line_ending))(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line2) = recognize(pair(tag("2 "), not_line_ending))(s)?;
    let (s, _) = nom::branch::alt((line_ending, eof))(s)?;
    let (s, _) = opt(line_ending)(s)?;
    Ok((
        s,
        UnstructuredTle {
            satellite_name: name.trim_end().to_string(),
            line1: line1.trim_end().to_string(),
            line2: line2.trim_end().to_string(),
        },
    ))
}

/// Through the end of the mean motion column
const LINE_MIN_LEN: usize = 63;

const CATALOG_NUMBER: Range<usize> = 2..7;
const EPOCH_YEAR: Range<usize> = 18..20;
const EPOCH_DAY: Range<usize> = 20..32;
const INCLINATION: Range<usize> = 8..16;
const RAAN: Range<usize> = 17..25;
const ECCENTRICITY: Range<usize> = 26..33;
const ARG_PERIGEE: Range<usize> = 34..42;
const MEAN_ANOMALY: Range<usize> = 43..51;
const MEAN_MOTION: Range<usize> = 52..63;

/// Decode the classical elements of a TLE entry
pub fn parse_tle_elements(tle: &UnstructuredTle) -> std::result::Result<OrbitalElements, TleError> {
    let l1 = tle.line1.as_str();
    let l2 = tle.line2.as_str();

    check_line(l1, 1, LINE_MIN_LEN)?;
    check_line(l2, 2, LINE_MIN_LEN)?;

    if column(l1, CATALOG_NUMBER, "catalog number")?
        != column(l2, CATALOG_NUMBER, "catalog number")?
    {
        return Err(TleError::CatalogMismatch);
    }

    let epoch = epoch(
        number::<i32>(l1, EPOCH_YEAR, "epoch year")?,
        number::<f64>(l1, EPOCH_DAY, "epoch day")?,
    )?;

    let eccentricity = format!("0.{}", column(l2, ECCENTRICITY, "eccentricity")?)
        .parse::<f64>()
        .map_err(|_| TleError::Field("eccentricity"))?;

    Ok(OrbitalElements {
        mean_motion: number(l2, MEAN_MOTION, "mean motion")?,
        eccentricity: Some(eccentricity),
        inclination: number(l2, INCLINATION, "inclination")?,
        raan: number(l2, RAAN, "raan")?,
        arg_perigee: number(l2, ARG_PERIGEE, "argument of perigee")?,
        mean_anomaly: number(l2, MEAN_ANOMALY, "mean anomaly")?,
        epoch,
    })
}

fn check_line(line: &str, number: u8, min_len: usize) -> std::result::Result<(), TleError> {
    if !line.is_ascii() || line.len() < min_len {
        return Err(TleError::LineTooShort {
            line: number,
            len: line.len(),
        });
    }
    let prefix = format!("{number} ");
    if !line.starts_with(&prefix) {
        return Err(TleError::LineNumber(number));
    }
    Ok(())
}

fn column<'a>(
    line: &'a str,
    cols: Range<usize>,
    field: &'static str,
) -> std::result::Result<&'a str, TleError> {
    line.get(cols)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(TleError::Field(field))
}

fn number<T: std::str::FromStr>(
    line: &str,
    cols: Range<usize>,
    field: &'static str,
) -> std::result::Result<T, TleError> {
    column(line, cols, field)?
        .parse::<T>()
        .map_err(|_| TleError::Field(field))
}

/// Two digit year (57..=99 is 19xx) and fractional day of year, 1.0 is Jan 1 00:00
fn epoch(two_digit_year: i32, day_of_year: f64) -> std::result::Result<UtcTimestamp, TleError> {
    if !(0..=99).contains(&two_digit_year) || !(1.0..367.0).contains(&day_of_year) {
        return Err(TleError::Field("epoch"));
    }
    let year = if two_digit_year >= 57 {
        1900 + two_digit_year
    } else {
        2000 + two_digit_year
    };
    let jan1 = NaiveDate::from_yo_opt(year, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(TleError::Field("epoch"))?;
    let offset = Duration::nanoseconds(((day_of_year - 1.0) * 86_400.0 * 1e9).round() as i64);
    Ok(jan1.and_utc() + offset)
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use indoc::indoc;

    const TLE_SET: &str = indoc! {r#"GEO1
        1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991
        2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578

        GEO2
        1 39120U 13011A   23190.50177227 -.00000262  00000-0  00000+0 0  9997
        2 39120   2.3950  38.7964 0001772  68.0002 323.0070  1.00271163 37822
        "#};

    const ISS: &str = indoc! {r#"ISS (ZARYA)
        1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
        2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537"#};

    fn iss() -> UnstructuredTle {
        let (_, set) = parse_unstructured_tle_set(ISS).unwrap();
        set.into_iter().next().unwrap()
    }

    #[test]
    fn parse_tle_set() {
        let (s, tle_set) = parse_unstructured_tle_set(TLE_SET).unwrap();
        assert!(s.is_empty());
        assert_eq!(tle_set.len(), 2);
        let names: Vec<&str> = tle_set.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["GEO1", "GEO2"]);
    }

    #[test]
    fn parse_tle_without_trailing_newline() {
        let (s, tle_set) = parse_unstructured_tle_set(ISS).unwrap();
        assert!(s.is_empty());
        assert_eq!(tle_set.len(), 1);
        assert_eq!(iss().catalog_number(), Some(SatelliteId::new(25544)));
    }

    #[test]
    fn trailing_garbage() {
        let msg = format!("{TLE_SET}\nnot a tle\n");
        assert!(matches!(
            parse_unstructured_tle_set(&msg),
            Err(nom::Err::Error(ParseError::TrailingInput(_)))
        ));
    }

    #[test]
    fn decode_elements() {
        let el = parse_tle_elements(&iss()).unwrap();
        assert_relative_eq!(el.inclination, 51.6416);
        assert_relative_eq!(el.raan, 247.4627);
        assert_relative_eq!(el.eccentricity.unwrap(), 0.0006703);
        assert_relative_eq!(el.arg_perigee, 130.5360);
        assert_relative_eq!(el.mean_anomaly, 325.0288);
        assert_relative_eq!(el.mean_motion, 15.72125391);
        assert_eq!(
            el.epoch.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2008-09-20 12:25:40"
        );
    }

    #[test]
    fn epoch_century() {
        let t = epoch(57, 1.0).unwrap();
        assert_eq!(t.format("%Y-%j").to_string(), "1957-001");
        let t = epoch(23, 190.5).unwrap();
        assert_eq!(t.format("%Y-%j %H:%M").to_string(), "2023-190 12:00");
        assert_eq!(epoch(23, 0.5), Err(TleError::Field("epoch")));
    }

    #[test]
    fn bad_lines() {
        let mut tle = iss();
        tle.line2.truncate(40);
        assert_eq!(
            parse_tle_elements(&tle),
            Err(TleError::LineTooShort { line: 2, len: 40 })
        );

        // Line 1 carries the epoch in its first 32 columns but must still be complete
        let mut tle = iss();
        tle.line1.truncate(40);
        assert_eq!(
            parse_tle_elements(&tle),
            Err(TleError::LineTooShort { line: 1, len: 40 })
        );

        let mut tle = iss();
        tle.line2.replace_range(2..7, "99999");
        assert_eq!(parse_tle_elements(&tle), Err(TleError::CatalogMismatch));

        let mut tle = iss();
        tle.line2.replace_range(8..16, " 51.6x16");
        assert_eq!(
            parse_tle_elements(&tle),
            Err(TleError::Field("inclination"))
        );
    }
}
