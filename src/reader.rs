/// Dataset reader
///
/// Parses generated files back into typed records. The header must match the
/// literal header byte for byte; every row is checked for field count, enum
/// values, integers and fractional prices. Errors carry the 1-based line number.

use std::fs::File;
use std::io;
use std::path::Path;
use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use crate::fractional::{FractionalPrice, PriceError};
use crate::records::{
    BookLevel, Book, CsvRecord, InquiryRecord, MarketDataRecord, PriceRecord, Side, TradeRecord,
    DEPTH,
};

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("csv read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing header")]
    MissingHeader,

    #[error("header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch { expected: String, found: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount { line: u64, expected: usize, found: usize },

    #[error("line {line}: invalid value {value:?} in column {column}")]
    InvalidField { line: u64, column: usize, value: String },

    #[error("line {line}: {source}")]
    Price { line: u64, source: PriceError },
}

pub type ReadResult<T> = Result<T, ReadError>;

/// A record type that can be rebuilt from its CSV fields
pub trait FromFields: CsvRecord {
    fn from_fields(fields: &StringRecord, line: u64) -> ReadResult<Self>;
}

fn field<'r>(fields: &'r StringRecord, column: usize, line: u64) -> ReadResult<&'r str> {
    fields.get(column).ok_or(ReadError::FieldCount {
        line,
        expected: column + 1,
        found: fields.len(),
    })
}

fn invalid(line: u64, column: usize, value: &str) -> ReadError {
    ReadError::InvalidField {
        line,
        column,
        value: value.to_string(),
    }
}

fn parse_u64(fields: &StringRecord, column: usize, line: u64) -> ReadResult<u64> {
    let value = field(fields, column, line)?;
    value.parse().map_err(|_| invalid(line, column, value))
}

fn parse_side(fields: &StringRecord, column: usize, line: u64) -> ReadResult<Side> {
    let value = field(fields, column, line)?;
    value
        .parse::<u8>()
        .ok()
        .and_then(Side::from_u8)
        .ok_or_else(|| invalid(line, column, value))
}

fn parse_price(fields: &StringRecord, column: usize, line: u64) -> ReadResult<FractionalPrice> {
    field(fields, column, line)?
        .parse()
        .map_err(|source| ReadError::Price { line, source })
}

impl FromFields for TradeRecord {
    fn from_fields(fields: &StringRecord, line: u64) -> ReadResult<Self> {
        let price_text = field(fields, 2, line)?;
        let book_text = field(fields, 3, line)?;
        Ok(TradeRecord {
            product_id: field(fields, 0, line)?.to_string(),
            trade_id: field(fields, 1, line)?.to_string(),
            price: price_text.parse().map_err(|_| invalid(line, 2, price_text))?,
            book: Book::from_name(book_text).ok_or_else(|| invalid(line, 3, book_text))?,
            quantity: parse_u64(fields, 4, line)?,
            side: parse_side(fields, 5, line)?,
        })
    }
}

impl FromFields for InquiryRecord {
    fn from_fields(fields: &StringRecord, line: u64) -> ReadResult<Self> {
        Ok(InquiryRecord {
            product_id: field(fields, 0, line)?.to_string(),
            inquiry_id: field(fields, 1, line)?.to_string(),
            side: parse_side(fields, 2, line)?,
            quantity: parse_u64(fields, 3, line)?,
        })
    }
}

impl FromFields for PriceRecord {
    fn from_fields(fields: &StringRecord, line: u64) -> ReadResult<Self> {
        Ok(PriceRecord {
            product_id: field(fields, 0, line)?.to_string(),
            mid: parse_price(fields, 1, line)?,
            spread: parse_price(fields, 2, line)?,
        })
    }
}

impl FromFields for MarketDataRecord {
    fn from_fields(fields: &StringRecord, line: u64) -> ReadResult<Self> {
        let level_at = |column: usize| -> ReadResult<BookLevel> {
            Ok(BookLevel {
                price: parse_price(fields, column, line)?,
                volume: parse_u64(fields, column + 1, line)?,
            })
        };

        let empty = BookLevel {
            price: FractionalPrice::from_ticks(0),
            volume: 0,
        };
        let mut bids = [empty; DEPTH];
        let mut offers = [empty; DEPTH];
        for k in 0..DEPTH {
            bids[k] = level_at(1 + 2 * k)?;
            offers[k] = level_at(1 + 2 * (DEPTH + k))?;
        }

        Ok(MarketDataRecord {
            product_id: field(fields, 0, line)?.to_string(),
            bids,
            offers,
        })
    }
}

/// Stream records from any reader, returning the number of data rows
pub fn read_each_from<R, T, F>(input: R, mut on_record: F) -> ReadResult<usize>
where
    R: io::Read,
    T: FromFields,
    F: FnMut(T),
{
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut fields = StringRecord::new();
    if !reader.read_record(&mut fields)? {
        return Err(ReadError::MissingHeader);
    }
    let found = fields.iter().collect::<Vec<_>>().join(",");
    if found != T::HEADER {
        return Err(ReadError::HeaderMismatch {
            expected: T::HEADER.to_string(),
            found,
        });
    }

    let mut count = 0;
    while reader.read_record(&mut fields)? {
        let line = fields.position().map(|p| p.line()).unwrap_or(0);
        if fields.len() != T::FIELD_COUNT {
            return Err(ReadError::FieldCount {
                line,
                expected: T::FIELD_COUNT,
                found: fields.len(),
            });
        }
        on_record(T::from_fields(&fields, line)?);
        count += 1;
    }
    Ok(count)
}

/// Stream records from a file
pub fn read_each<T, F>(path: &Path, on_record: F) -> ReadResult<usize>
where
    T: FromFields,
    F: FnMut(T),
{
    read_each_from(File::open(path)?, on_record)
}

/// Load a whole dataset into memory
pub fn read_dataset<T: FromFields>(path: &Path) -> ReadResult<Vec<T>> {
    let mut records = Vec::new();
    read_each(path, |record| records.push(record))?;
    Ok(records)
}

pub fn read_trades(path: &Path) -> ReadResult<Vec<TradeRecord>> {
    read_dataset(path)
}

pub fn read_inquiries(path: &Path) -> ReadResult<Vec<InquiryRecord>> {
    read_dataset(path)
}

pub fn read_prices(path: &Path) -> ReadResult<Vec<PriceRecord>> {
    read_dataset(path)
}

pub fn read_market_data(path: &Path) -> ReadResult<Vec<MarketDataRecord>> {
    read_dataset(path)
}
