use super::traits::MatrixFile;
use crate::core::linalg::sym2::{EigenvaluePair, Sym2};
use ::csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Line {line}: cannot parse '{field}' as a number")]
    Parse { line: u64, field: String },

    #[error("Line {line}: expected {expected} columns, found {found}")]
    Ragged {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn parse_field(field: &str, line: u64) -> Result<f64, CsvError> {
    field.parse().map_err(|_| CsvError::Parse {
        line,
        field: field.to_string(),
    })
}

/// A dense square matrix, one header-less comma-separated row per line.
///
/// Lines starting with `#` are comments.
pub struct DenseMatrixCsv;

impl MatrixFile for DenseMatrixCsv {
    type Data = DMatrix<f64>;
    type Error = CsvError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut values = Vec::new();
        let mut cols: Option<usize> = None;
        let mut rows = 0;

        for record in csv_reader.records() {
            let record = record?;
            let line = line_of(&record);
            match cols {
                None => cols = Some(record.len()),
                Some(expected) if expected != record.len() => {
                    return Err(CsvError::Ragged {
                        line,
                        expected,
                        found: record.len(),
                    });
                }
                Some(_) => {}
            }
            for field in record.iter() {
                values.push(parse_field(field, line)?);
            }
            rows += 1;
        }

        let cols = cols.unwrap_or(0);
        if rows != cols {
            return Err(CsvError::NotSquare { rows, cols });
        }
        Ok(DMatrix::from_row_slice(rows, cols, &values))
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        for row in data.row_iter() {
            csv_writer.serialize(row.iter().copied().collect::<Vec<f64>>())?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// A list of symmetric 2×2 problems with header `a,b,c`.
pub struct Sym2Csv;

impl MatrixFile for Sym2Csv {
    type Data = Vec<Sym2>;
    type Error = CsvError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let mut csv_reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(reader);
        let matrices = csv_reader.deserialize().collect::<Result<Vec<Sym2>, _>>()?;
        Ok(matrices)
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = WriterBuilder::new().from_writer(writer);
        for matrix in data {
            csv_writer.serialize(matrix)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EigenvalueRecord {
    index: usize,
    eigenvalue: f64,
}

/// A list of eigenvalues with header `index,eigenvalue`, in list order.
pub struct EigenvalueCsv;

impl MatrixFile for EigenvalueCsv {
    type Data = Vec<f64>;
    type Error = CsvError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let mut csv_reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(reader);
        let mut records = csv_reader
            .deserialize()
            .collect::<Result<Vec<EigenvalueRecord>, _>>()?;
        records.sort_by_key(|r| r.index);
        Ok(records.into_iter().map(|r| r.eigenvalue).collect())
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = WriterBuilder::new().from_writer(writer);
        for (index, &eigenvalue) in data.iter().enumerate() {
            csv_writer.serialize(EigenvalueRecord { index, eigenvalue })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Eigenvalue pairs of 2×2 problems with header `rt1,rt2`.
pub struct EigenPairCsv;

impl MatrixFile for EigenPairCsv {
    type Data = Vec<EigenvaluePair>;
    type Error = CsvError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let mut csv_reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(reader);
        let pairs = csv_reader
            .deserialize()
            .collect::<Result<Vec<EigenvaluePair>, _>>()?;
        Ok(pairs)
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = WriterBuilder::new().from_writer(writer);
        for pair in data {
            csv_writer.serialize(pair)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn read<F: MatrixFile<Error = CsvError>>(content: &str) -> Result<F::Data, CsvError> {
        let mut reader = Cursor::new(content.as_bytes());
        F::read_from(&mut reader)
    }

    fn write<F: MatrixFile<Error = CsvError>>(data: &F::Data) -> String {
        let mut buffer = Vec::new();
        F::write_to(data, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn dense_matrix_is_read_row_major_with_comments_and_whitespace() {
        let content = "# force constants\n1.0, 2.0, 3.0\n2.0,4.5 ,-1e-3\n3.0, -1e-3, 6\n";
        let m = read::<DenseMatrixCsv>(content).unwrap();
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 1)], 4.5);
        assert_eq!(m[(1, 2)], -1e-3);
        assert_eq!(m[(2, 2)], 6.0);
    }

    #[test]
    fn dense_matrix_written_then_read_is_unchanged() {
        let m = DMatrix::from_row_slice(2, 2, &[0.1, -2.5e-17, -2.5e-17, 1e300]);
        let text = write::<DenseMatrixCsv>(&m);
        assert_eq!(read::<DenseMatrixCsv>(&text).unwrap(), m);
    }

    #[test]
    fn ragged_dense_matrix_reports_offending_line() {
        let result = read::<DenseMatrixCsv>("1,2\n3\n");
        assert!(matches!(
            result,
            Err(CsvError::Ragged {
                line: 2,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn non_square_dense_matrix_is_rejected() {
        let result = read::<DenseMatrixCsv>("1,2,3\n4,5,6\n");
        assert!(matches!(
            result,
            Err(CsvError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn unparsable_entry_is_reported_with_its_text() {
        let result = read::<DenseMatrixCsv>("1,x\n2,3\n");
        match result {
            Err(CsvError::Parse { line, field }) => {
                assert_eq!(line, 1);
                assert_eq!(field, "x");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_an_empty_matrix() {
        let m = read::<DenseMatrixCsv>("# nothing here\n").unwrap();
        assert_eq!(m.shape(), (0, 0));
    }

    #[test]
    fn sym2_list_is_read_by_header_names() {
        let content = "a,b,c\n3,4,-3\n# identity\n2, 0, 2\n";
        let pairs = read::<Sym2Csv>(content).unwrap();
        assert_eq!(pairs, vec![Sym2::new(3.0, 4.0, -3.0), Sym2::new(2.0, 0.0, 2.0)]);
    }

    #[test]
    fn sym2_list_with_missing_column_fails() {
        assert!(matches!(
            read::<Sym2Csv>("a,b\n1,2\n"),
            Err(CsvError::Csv(_))
        ));
    }

    #[test]
    fn eigenvalues_are_written_with_index_column() {
        let text = write::<EigenvalueCsv>(&vec![-1.5, 2.0]);
        assert_eq!(text, "index,eigenvalue\n0,-1.5\n1,2.0\n");
        assert_eq!(read::<EigenvalueCsv>(&text).unwrap(), vec![-1.5, 2.0]);
    }

    #[test]
    fn eigen_pairs_are_written_with_root_headers() {
        let data = vec![EigenvaluePair { rt1: 5.0, rt2: -5.0 }];
        let text = write::<EigenPairCsv>(&data);
        assert_eq!(text, "rt1,rt2\n5.0,-5.0\n");
        assert_eq!(read::<EigenPairCsv>(&text).unwrap(), data);
    }

    #[test]
    fn path_round_trip_creates_and_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        let data = vec![Sym2::new(1.0, 0.5, -1.0)];
        Sym2Csv::write_to_path(&data, &path).unwrap();
        assert_eq!(Sym2Csv::read_from_path(&path).unwrap(), data);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = DenseMatrixCsv::read_from_path(dir.path().join("absent.csv"));
        assert!(matches!(result, Err(CsvError::Io(_))));
    }
}
