//! Delimited text reading.

mod encoding;
mod reader;
mod sniff;

pub use encoding::decode_text;
pub use reader::read_csv;
pub use sniff::{CSV_DELIMITERS, sniff_delimiter};
