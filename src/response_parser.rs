//! # Response Parser Module
//!
//! Named adapters between backend response shapes and displayable values.
//! The SMILE2IUPAC backend answers (in HTML mode) with a styled table whose
//! rows are `SMILES | IUPAC name` pairs; the display name lives in the last
//! cell of the last row. That shape knowledge is isolated here so a backend
//! format change is a single-point update.

use crate::api_client::ApiError;
use scraper::{Html, Selector};

/// Extracts the IUPAC name from a SMILE2IUPAC HTML response.
///
/// Contract: the input is an HTML fragment containing at least one table
/// cell; the output is the trimmed text content of the last `<td>` in the
/// fragment (the last cell of the last row). A fragment with no non-empty
/// cell yields [`ApiError::NameNotFound`].
pub fn extract_iupac_from_html(html: &str) -> Result<String, ApiError> {
    let fragment = Html::parse_fragment(html);
    let cell_selector = Selector::parse("td").unwrap();
    fragment
        .select(&cell_selector)
        .last()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::NameNotFound)
}

/// Builds the anchor fragment shown for an external lookup result: the name
/// linked to its compound info page, opening in a new tab.
pub fn link_fragment(name: &str, url: &str) -> String {
    format!(
        "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"link\">{name}<span class=\"sr-only\"> (opens in a new tab)</span></a>"
    )
}
