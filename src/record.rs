//! Film records, CSV column resolution, and row decoding.
//!
//! The decoder consumes rows produced by the `csv` crate reader (which owns
//! the quoting rules: quoted fields may contain delimiters, and surrounding
//! quotes/whitespace are stripped before we see a field) and turns each row
//! into a [`Film`]. Rows missing a required column are reported as malformed
//! via `None`; numeric fields parse permissively to `0.0`.

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One decoded data row.
///
/// String fields are already trimmed and truncated to the configured display
/// widths; `rating` and `popularity` are the permissive parse of their columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub language: String,
    pub release_date: String,
    pub rating: f64,
    pub popularity: f64,
}

/// Maximum stored lengths (in bytes, cut at a char boundary) for the string
/// fields of a [`Film`]. Truncation is a display policy, not a safety measure.
#[derive(Clone, Copy, Debug)]
pub struct FieldWidths {
    pub title: usize,
    pub language: usize,
    pub release_date: usize,
}

impl Default for FieldWidths {
    fn default() -> Self {
        Self {
            title: 256,
            language: 16,
            release_date: 32,
        }
    }
}

/// Indices of the required columns, resolved once from the header row.
///
/// `release_date` is only resolved (and only required) when the report tracks
/// release dates.
#[derive(Clone, Copy, Debug)]
pub struct ColumnLayout {
    pub language: usize,
    pub popularity: usize,
    pub rating: usize,
    pub title: usize,
    pub release_date: Option<usize>,
}

impl ColumnLayout {
    /// Resolve required column indices from a header record.
    ///
    /// Header names match exactly and case-sensitively. All missing columns
    /// are reported in one error so a bad file fails with a complete
    /// diagnosis rather than one name at a time.
    ///
    /// # Errors
    /// Returns an error naming every missing required column.
    pub fn resolve(header: &csv::StringRecord, track_release_date: bool) -> Result<Self> {
        let position = |name: &str| header.iter().position(|field| field == name);

        let language = position("original_language");
        let popularity = position("popularity");
        let rating = position("vote_average");
        let title = position("original_title");
        let release_date = position("release_date");

        let mut missing = Vec::new();
        if language.is_none() {
            missing.push("original_language");
        }
        if popularity.is_none() {
            missing.push("popularity");
        }
        if rating.is_none() {
            missing.push("vote_average");
        }
        if title.is_none() {
            missing.push("original_title");
        }
        if track_release_date && release_date.is_none() {
            missing.push("release_date");
        }
        if !missing.is_empty() {
            bail!("missing required column(s): {}", missing.join(", "));
        }

        match (language, popularity, rating, title) {
            (Some(language), Some(popularity), Some(rating), Some(title)) => Ok(Self {
                language,
                popularity,
                rating,
                title,
                release_date: if track_release_date { release_date } else { None },
            }),
            _ => unreachable!("missing columns reported above"),
        }
    }

    /// Open `path`, read its header, and resolve the layout.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is empty, or lacks a
    /// required column. All three are fatal before any data row is read.
    pub fn from_path(path: impl AsRef<Path>, track_release_date: bool) -> Result<Self> {
        let path = path.as_ref();
        let mut rdr = open_reader(path)?;
        let header = rdr
            .headers()
            .with_context(|| format!("read header of {}", path.display()))?;
        ensure!(!header.is_empty(), "empty input file: {}", path.display());
        Self::resolve(header, track_release_date)
    }
}

/// Build the standard reader for an input file: header row, flexible record
/// lengths (short rows are the decoder's problem, not the reader's), and
/// whitespace trimming on every field.
pub(crate) fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(f))
}

/// Decode one data row into a [`Film`].
///
/// Returns `None` when the row is missing any required column (too few
/// fields). Everything else decodes: an empty language field is the
/// scanner's skip condition, not a decode failure, and unparseable numerics
/// become `0.0` rather than an error.
pub fn decode(
    record: &csv::StringRecord,
    layout: &ColumnLayout,
    widths: FieldWidths,
) -> Option<Film> {
    let language = record.get(layout.language)?;
    let popularity = record.get(layout.popularity)?;
    let rating = record.get(layout.rating)?;
    let title = record.get(layout.title)?;
    let release_date = match layout.release_date {
        Some(idx) => record.get(idx)?,
        None => "",
    };

    Some(Film {
        title: truncate_display(title, widths.title),
        language: truncate_display(language, widths.language),
        release_date: truncate_display(release_date, widths.release_date),
        rating: parse_or_zero(rating),
        popularity: parse_or_zero(popularity),
    })
}

/// Permissive numeric parse: anything that is not a full `f64` literal is 0.0.
///
/// A malformed rating therefore ranks as 0.0 instead of dropping the row;
/// changing this changes which films can reach the chart.
pub fn parse_or_zero(field: &str) -> f64 {
    field.trim().parse().unwrap_or(0.0)
}

/// Truncate `s` to at most `max` bytes without splitting a char.
fn truncate_display(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_owned();
    }
    let mut cut = max;
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s[..cut].to_owned()
}
