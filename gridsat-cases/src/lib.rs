//! Parser and writer for gridsat trip case files.
//!
//! A case file starts with the number of cases. Each case consists of a line
//! `<streets> <avenues> <trip count>` followed by one line `<s1> <a1> <s2> <a2>` per trip, asking
//! for a trip from the crossing of street `s1` and avenue `a1` to the crossing of street `s2` and
//! avenue `a2`. Street and avenue numbers are 1-based. Tokens are separated by whitespace, blank
//! lines are ignored.

use std::{borrow::Borrow, io};

use gridsat_formula::{Case, Grid, Point, Trip};

use anyhow::Error;
use log::info;
use thiserror::Error;

/// Possible errors while parsing a case file.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {}: Unexpected end of input, expected {}", line, expected)]
    UnexpectedEof { line: usize, expected: &'static str },
    #[error(
        "line {}: Expected {} numbers for {} but found {}",
        line,
        expected,
        what,
        found
    )]
    TokenCount {
        line: usize,
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {}: Expected a non-negative integer but found '{}'", line, token)]
    InvalidNumber { line: usize, token: String },
    #[error(
        "line {}: Grid needs at least one street and one avenue, found {} streets and {} avenues",
        line,
        streets,
        avenues
    )]
    EmptyGrid {
        line: usize,
        streets: usize,
        avenues: usize,
    },
    #[error(
        "line {}: Grid with {} streets and {} avenues exceeds the supported {} segments",
        line,
        streets,
        avenues,
        max
    )]
    GridTooLarge {
        line: usize,
        streets: usize,
        avenues: usize,
        max: usize,
    },
    #[error(
        "line {}: Point {} lies outside of a grid with {} streets and {} avenues",
        line,
        point,
        streets,
        avenues
    )]
    PointOutOfRange {
        line: usize,
        point: Point,
        streets: usize,
        avenues: usize,
    },
    #[error("line {}: Unexpected input after the last case", line)]
    TrailingInput { line: usize },
    #[error("Parser invoked after a previous error")]
    PreviousError,
    #[error("Error reading input: {0}")]
    Io(#[from] io::Error),
}

/// Reader for case files.
///
/// Cases are parsed lazily, one at a time, so only the case currently processed needs to be kept
/// in memory. The reader is also an iterator over the parsed cases, which stops after the first
/// error.
pub struct CaseReader<R> {
    lines: io::Lines<io::BufReader<R>>,
    line_number: usize,
    case_count: Option<usize>,
    cases_read: usize,
    error: bool,
}

impl<R: io::Read> CaseReader<R> {
    /// Create a new reader for a case file.
    pub fn new(input: R) -> CaseReader<R> {
        use io::BufRead;

        CaseReader {
            lines: io::BufReader::new(input).lines(),
            line_number: 0,
            case_count: None,
            cases_read: 0,
            error: false,
        }
    }

    /// Parse all cases of the given input.
    ///
    /// Incremental processing is possible using [`next_case`](CaseReader::next_case) or by
    /// iterating over a [`CaseReader`].
    pub fn parse(input: R) -> Result<Vec<Case>, Error> {
        let mut reader = Self::new(input);
        let mut cases = vec![];
        while let Some(case) = reader.next_case()? {
            cases.push(case);
        }
        Ok(cases)
    }

    /// Number of cases announced by the input.
    ///
    /// Reads the first line if necessary.
    pub fn case_count(&mut self) -> Result<usize, ParserError> {
        if let Some(count) = self.case_count {
            return Ok(count);
        }
        self.guard(|reader| {
            let line = reader.expect_line("the number of cases")?;
            let [count] = reader.numbers::<1>(&line, "the number of cases")?;
            info!("Reading {} cases", count);
            reader.case_count = Some(count);
            Ok(count)
        })
    }

    /// Number of the last line read, 1-based.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Parse the next case.
    ///
    /// Returns `None` after the last announced case. If this method returns an error, the reader is
    /// in an invalid state and cannot parse further cases.
    pub fn next_case(&mut self) -> Result<Option<Case>, ParserError> {
        let case_count = self.case_count()?;
        self.guard(|reader| {
            if reader.cases_read == case_count {
                if reader.next_line()?.is_some() {
                    return Err(ParserError::TrailingInput {
                        line: reader.line_number,
                    });
                }
                return Ok(None);
            }

            let line = reader.expect_line("a case header")?;
            let [streets, avenues, trip_count] = reader.numbers::<3>(&line, "a case header")?;

            if streets == 0 || avenues == 0 {
                return Err(ParserError::EmptyGrid {
                    line: reader.line_number,
                    streets,
                    avenues,
                });
            }

            if streets.saturating_add(avenues) > Grid::max_var_count() {
                return Err(ParserError::GridTooLarge {
                    line: reader.line_number,
                    streets,
                    avenues,
                    max: Grid::max_var_count(),
                });
            }

            let mut case = Case::new(Grid::new(streets, avenues));

            for _ in 0..trip_count {
                let line = reader.expect_line("a trip")?;
                let [s1, a1, s2, a2] = reader.numbers::<4>(&line, "a trip")?;
                let trip = Trip::new(Point::new(s1, a1), Point::new(s2, a2));
                for &point in [trip.origin, trip.destination].iter() {
                    if !case.grid.contains(point) {
                        return Err(ParserError::PointOutOfRange {
                            line: reader.line_number,
                            point,
                            streets,
                            avenues,
                        });
                    }
                }
                case.trips.push(trip);
            }

            reader.cases_read += 1;
            Ok(Some(case))
        })
    }

    /// Runs a parsing step, poisoning the reader when it fails.
    fn guard<T>(
        &mut self,
        step: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Result<T, ParserError> {
        if self.error {
            return Err(ParserError::PreviousError);
        }
        let result = step(self);
        if result.is_err() {
            self.error = true;
        }
        result
    }

    /// Next non-blank line.
    fn next_line(&mut self) -> Result<Option<String>, ParserError> {
        for line in &mut self.lines {
            let line = line?;
            self.line_number += 1;
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<String, ParserError> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(ParserError::UnexpectedEof {
                line: self.line_number,
                expected,
            }),
        }
    }

    /// Parses a line consisting of exactly `N` non-negative integers.
    fn numbers<const N: usize>(
        &self,
        line: &str,
        what: &'static str,
    ) -> Result<[usize; N], ParserError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != N {
            return Err(ParserError::TokenCount {
                line: self.line_number,
                what,
                expected: N,
                found: tokens.len(),
            });
        }

        let mut values = [0; N];
        for (value, token) in values.iter_mut().zip(tokens) {
            *value = token.parse().map_err(|_| ParserError::InvalidNumber {
                line: self.line_number,
                token: token.to_owned(),
            })?;
        }
        Ok(values)
    }
}

impl<R: io::Read> Iterator for CaseReader<R> {
    type Item = Result<Case, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error {
            return None;
        }
        self.next_case().transpose()
    }
}

/// Write the number of cases.
///
/// Can be used with [`write_case`] to implement incremental writing.
pub fn write_case_count(target: &mut impl io::Write, count: usize) -> io::Result<()> {
    itoa::write(&mut *target, count)?;
    target.write_all(b"\n")
}

/// Write a single case without the leading case count.
pub fn write_case(target: &mut impl io::Write, case: &Case) -> io::Result<()> {
    write_numbers(
        &mut *target,
        &[case.grid.streets, case.grid.avenues, case.trips.len()],
    )?;
    for trip in case.trips.iter() {
        write_numbers(
            &mut *target,
            &[
                trip.origin.street,
                trip.origin.avenue,
                trip.destination.street,
                trip.destination.avenue,
            ],
        )?;
    }
    Ok(())
}

/// Write a complete case file.
pub fn write_cases(
    target: &mut impl io::Write,
    cases: impl IntoIterator<Item = impl Borrow<Case>>,
) -> io::Result<()> {
    let cases: Vec<_> = cases.into_iter().collect();
    write_case_count(&mut *target, cases.len())?;
    for case in cases.iter() {
        write_case(&mut *target, case.borrow())?;
    }
    Ok(())
}

fn write_numbers(target: &mut impl io::Write, numbers: &[usize]) -> io::Result<()> {
    for (i, &number) in numbers.iter().enumerate() {
        if i > 0 {
            target.write_all(b" ")?;
        }
        itoa::write(&mut *target, number)?;
    }
    target.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Error;
    use proptest::{test_runner::TestCaseError, *};

    use gridsat_formula::{case, grid::strategy::case as case_strategy};

    #[test]
    fn odd_whitespace() -> Result<(), Error> {
        let parsed = CaseReader::parse(
            b"2\n\n 2  3 2 \n1 1\t2 3\n\n2 3 1 1\n1 1 0\n  \n" as &[_],
        )?;

        let expected = vec![
            case![2, 3; (1, 1) -> (2, 3), (2, 3) -> (1, 1)],
            case![1, 1;],
        ];

        assert_eq!(parsed, expected);

        Ok(())
    }

    #[test]
    fn lazy_reading() -> Result<(), Error> {
        let mut reader = CaseReader::new(b"3\n1 1 0\n1 2 1\n1 1 1 2\n1 1 0\n" as &[_]);

        assert_eq!(reader.case_count()?, 3);
        assert_eq!(reader.next_case()?, Some(case![1, 1;]));
        assert_eq!(reader.line_number(), 2);
        assert_eq!(reader.next_case()?, Some(case![1, 2; (1, 1) -> (1, 2)]));
        assert_eq!(reader.line_number(), 4);

        let rest: Vec<_> = reader.collect::<Result<_, _>>()?;
        assert_eq!(rest, vec![case![1, 1;]]);

        Ok(())
    }

    #[test]
    fn largest_grid() -> Result<(), Error> {
        let input = format!("1\n{} 1 0\n", Grid::max_var_count() - 1);
        let parsed = CaseReader::parse(input.as_bytes())?;

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].grid.var_count(), Grid::max_var_count());

        Ok(())
    }

    macro_rules! expect_error {
        ( $input:expr, $( $cases:tt )* ) => {
            match CaseReader::parse($input as &[_]) {
                Ok(parsed) => panic!("Expected error but got {:?}", parsed),
                Err(err) => match err.downcast_ref() {
                    Some(casted_err) => match casted_err {
                        $( $cases )*,
                        _ => panic!("Unexpected error {:?}", casted_err),
                    },
                    None => panic!("Unexpected error type {:?}", err),
                }
            }
        };
    }

    #[test]
    fn invalid_headers() {
        expect_error!(b"", ParserError::UnexpectedEof { line: 0, .. } => ());
        expect_error!(b"1 2\n", ParserError::TokenCount { expected: 1, found: 2, .. } => ());
        expect_error!(b"x\n", ParserError::InvalidNumber { line: 1, .. } => ());
        expect_error!(b"-1\n", ParserError::InvalidNumber { line: 1, .. } => ());
        expect_error!(b"1\n2 2\n", ParserError::TokenCount { line: 2, expected: 3, .. } => ());
        expect_error!(b"1\n2 2 1 1\n", ParserError::TokenCount { line: 2, found: 4, .. } => ());
        expect_error!(b"1\n0 2 0\n", ParserError::EmptyGrid { streets: 0, .. } => ());
        expect_error!(b"1\n2 0 0\n", ParserError::EmptyGrid { avenues: 0, .. } => ());
        expect_error!(
            format!("1\n{} 1 0\n", Grid::max_var_count()).as_bytes(),
            ParserError::GridTooLarge { line: 2, .. } => ()
        );
        expect_error!(
            b"1\n1073741823 1 0\n",
            ParserError::GridTooLarge { line: 2, .. } => ()
        );
        expect_error!(
            b"1\n2 2 18446744073709551616\n",
            ParserError::InvalidNumber { line: 2, .. } => ()
        );
    }

    #[test]
    fn invalid_trips() {
        expect_error!(b"1\n2 2 1\n1 1 2\n", ParserError::TokenCount { line: 3, found: 3, .. } => ());
        expect_error!(b"1\n2 2 1\n1 1 2 b\n", ParserError::InvalidNumber { line: 3, .. } => ());
        expect_error!(
            b"1\n2 2 1\n1 1 3 2\n",
            ParserError::PointOutOfRange { line: 3, point: Point { street: 3, avenue: 2 }, .. } => ()
        );
        expect_error!(
            b"1\n2 2 1\n0 1 1 1\n",
            ParserError::PointOutOfRange { point: Point { street: 0, avenue: 1 }, .. } => ()
        );
    }

    #[test]
    fn count_mismatch() {
        expect_error!(
            b"1\n2 2 2\n1 1 2 2\n",
            ParserError::UnexpectedEof { expected, .. } if *expected == "a trip" => ()
        );
        expect_error!(
            b"2\n2 2 0\n",
            ParserError::UnexpectedEof { expected, .. } if *expected == "a case header" => ()
        );
        expect_error!(b"1\n2 2 0\n1 1 0\n", ParserError::TrailingInput { line: 3 } => ());
    }

    #[test]
    fn poisoned_after_error() {
        let mut reader = CaseReader::new(b"2\n1 1 x\n1 1 0\n" as &[_]);
        assert!(matches!(
            reader.next_case(),
            Err(ParserError::InvalidNumber { line: 2, .. })
        ));
        assert!(matches!(
            reader.next_case(),
            Err(ParserError::PreviousError)
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn written_format() -> Result<(), Error> {
        let mut buf = vec![];
        write_cases(
            &mut buf,
            &[case![3, 2; (1, 2) -> (3, 1)], case![1, 1; (1, 1) -> (1, 1)]],
        )?;
        assert_eq!(&buf[..], &b"2\n3 2 1\n1 2 3 1\n1 1 1\n1 1 1 1\n"[..]);
        Ok(())
    }

    proptest! {
        #[test]
        fn roundtrip(input in collection::vec(case_strategy(1..20usize, 1..20usize, 0..30), 0..5)) {
            let mut buf = vec![];

            write_cases(&mut buf, &input)?;

            let parsed = CaseReader::parse(&buf[..]).map_err(|e| TestCaseError::fail(e.to_string()))?;

            prop_assert_eq!(parsed, input);
        }
    }
}
