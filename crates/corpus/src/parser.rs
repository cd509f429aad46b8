//! Parser for the recipe CSV.
//!
//! Expected columns (any order, extra columns ignored):
//! `Title`, `Ingredients`, `Instructions`, `Image_Name`, `Cleaned_Ingredients`
//!
//! Rows are read as raw bytes and decoded lossily so that one bad row can
//! never abort the whole load. A missing column reads as an empty field.

use crate::error::Result;
use crate::types::Recipe;
use csv::{ByteRecord, ReaderBuilder};
use rayon::prelude::*;
use std::io::Read;
use tracing::debug;

const TITLE: &str = "Title";
const INGREDIENTS: &str = "Ingredients";
const INSTRUCTIONS: &str = "Instructions";
const IMAGE_NAME: &str = "Image_Name";
const CLEANED_INGREDIENTS: &str = "Cleaned_Ingredients";

/// Raw string fields of one CSV row, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecipeRow {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub image_name: String,
    pub cleaned_ingredients: String,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy, Default)]
struct Columns {
    title: Option<usize>,
    ingredients: Option<usize>,
    instructions: Option<usize>,
    image_name: Option<usize>,
    cleaned_ingredients: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &ByteRecord) -> Self {
        let mut columns = Columns::default();
        for (pos, raw) in headers.iter().enumerate() {
            let name = String::from_utf8_lossy(raw);
            match name.trim_start_matches('\u{feff}').trim() {
                TITLE => columns.title = Some(pos),
                INGREDIENTS => columns.ingredients = Some(pos),
                INSTRUCTIONS => columns.instructions = Some(pos),
                IMAGE_NAME => columns.image_name = Some(pos),
                CLEANED_INGREDIENTS => columns.cleaned_ingredients = Some(pos),
                _ => {}
            }
        }
        columns
    }

    fn read_row(&self, record: &ByteRecord) -> RawRecipeRow {
        let field = |pos: Option<usize>| {
            pos.and_then(|p| record.get(p))
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default()
        };

        RawRecipeRow {
            title: field(self.title),
            ingredients: field(self.ingredients),
            instructions: field(self.instructions),
            image_name: field(self.image_name),
            cleaned_ingredients: field(self.cleaned_ingredients),
        }
    }
}

/// Parse CSV data into normalized recipes, in source order.
///
/// Only reader-level failures (unreadable input) are errors. Row ids are the
/// zero-based record positions, so they stay stable across loads of the same
/// file.
pub fn parse_recipes<R: Read>(reader: R) -> Result<Vec<Recipe>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(csv_reader.byte_headers()?);
    if columns.title.is_none() {
        debug!("Recipe CSV has no Title column; titles will be generated");
    }

    let mut rows = Vec::new();
    for record in csv_reader.byte_records() {
        rows.push(columns.read_row(&record?));
    }

    // Normalization is independent per row; indexed parallel iterators keep order
    let recipes = rows
        .par_iter()
        .enumerate()
        .map(|(idx, row)| normalize_row(row, idx))
        .collect();

    Ok(recipes)
}

/// Parse CSV held in memory
pub fn parse_recipes_str(data: &str) -> Result<Vec<Recipe>> {
    parse_recipes(data.as_bytes())
}

/// Turn one raw row into a `Recipe`
pub fn normalize_row(row: &RawRecipeRow, idx: usize) -> Recipe {
    let title = match row.title.trim() {
        "" => format!("Recipe {}", idx + 1),
        title => title.to_string(),
    };

    let image_name = match row.image_name.trim() {
        "" => None,
        name => Some(name.to_string()),
    };

    Recipe {
        id: idx.to_string(),
        title,
        ingredients: parse_ingredients(&row.ingredients),
        instructions: parse_instructions(&row.instructions),
        image_name,
        cleaned_ingredients_text: row.cleaned_ingredients.to_lowercase(),
    }
}

/// Parse the ingredients field.
///
/// The dataset stores lists like `['1 cup rice', '2 eggs']`. Those are read
/// as JSON after swapping single and curly quotes for double quotes. When
/// that fails (an apostrophe inside an item is enough) the field degrades to
/// comma-separated fragments.
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        let json_like = trimmed.replace(['\u{201c}', '\u{201d}', '\''], "\"");
        if let Ok(items) = serde_json::from_str::<Vec<String>>(&json_like) {
            return items;
        }
    }
    split_fragments(raw)
}

fn split_fragments(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .trim_matches(|c| matches!(c, '[' | ']' | '\'' | '"' | '\u{201c}' | '\u{201d}'))
                .trim()
        })
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// One instruction step per non-blank line
pub fn parse_instructions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
