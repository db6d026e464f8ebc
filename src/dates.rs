use chrono::{
    format::{self, Item, Parsed, StrftimeItems},
    NaiveDate,
};
use log::debug;
use once_cell::sync::Lazy;
use thiserror::Error;

/// `DD-MM-YYYY`, as the post front matter writes dates
pub const INPUT_PATTERN: &str = "%d-%m-%Y";
/// `D MMM YYYY`. Month abbreviations are always English: chrono's own names are used and no
/// locale is threaded through.
pub const OUTPUT_PATTERN: &str = "%-d %b %Y";

const INPUT_LENGTH: usize = "DD-MM-YYYY".len();
const SEPARATOR_POSITIONS: [usize; 2] = [2, 5];

static INPUT_ITEMS: Lazy<Vec<Item<'static>>> =
    Lazy::new(|| StrftimeItems::new(INPUT_PATTERN).collect());
static OUTPUT_ITEMS: Lazy<Vec<Item<'static>>> =
    Lazy::new(|| StrftimeItems::new(OUTPUT_PATTERN).collect());

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("{input:?} doesn't match the DD-MM-YYYY pattern")]
    Pattern { input: String },
    #[error("{input:?} isn't a real calendar date: {source}")]
    Calendar {
        input: String,
        source: format::ParseError,
    },
}

fn matches_input_shape(input: &str) -> bool {
    input.len() == INPUT_LENGTH
        && input.bytes().enumerate().all(|(index, byte)| {
            if SEPARATOR_POSITIONS.contains(&index) {
                byte == b'-'
            } else {
                byte.is_ascii_digit()
            }
        })
}

/// Two-digit day and month and a four-digit year are required; chrono alone would also accept
/// `1-1-2000`.
pub fn parse_date(input: &str) -> Result<NaiveDate, FormatError> {
    if !matches_input_shape(input) {
        debug!("Rejected date {:?}: wrong shape", input);
        return Err(FormatError::Pattern {
            input: input.to_owned(),
        });
    }
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, input, INPUT_ITEMS.iter())
        .and_then(|()| parsed.to_naive_date())
        .map_err(|source| FormatError::Calendar {
            input: input.to_owned(),
            source,
        })
}

pub fn render_date(date: NaiveDate) -> String {
    date.format_with_items(OUTPUT_ITEMS.iter()).to_string()
}

/// `"25-12-2024"` becomes `"25 Dec 2024"`
pub fn format_date(input: &str) -> Result<String, FormatError> {
    parse_date(input).map(render_date)
}
