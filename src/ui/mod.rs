//! Plain-text rendering of the board, cards and listing details.

use crate::board::Board;
use crate::models::House;

/// Shown in columns with no listings
pub const EMPTY_COLUMN: &str = "(drag or move a listing here)";

/// One-line summary of a listing
pub fn render_card(house: &House) -> String {
    let mut line = format!("[{}] {} ({})", house.id, house.name, house.price);
    if !house.address.is_empty() {
        line.push_str(&format!(" - {}", house.address));
    }
    if !house.gallery.is_empty() {
        line.push_str(&format!(" [{} media]", house.gallery.len()));
    }
    line
}

/// All four columns with their counts and cards
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    if !board.query().is_empty() {
        out.push_str(&format!("Search: \"{}\"\n\n", board.query()));
    }

    for view in board.columns() {
        out.push_str(&format!("== {} ({})\n", view.column.title, view.count()));
        out.push_str(&format!("   {}\n", view.column.description));
        if view.houses.is_empty() {
            out.push_str(&format!("   {}\n", EMPTY_COLUMN));
        }
        for house in &view.houses {
            out.push_str(&format!("   {}\n", render_card(house)));
        }
        out.push('\n');
    }
    out
}

/// Full details view of one listing
pub fn render_details(house: &House) -> String {
    let mut lines = vec![
        house.name.clone(),
        format!("  ID:       {}", house.id),
        format!("  Price:    {}", house.price),
        format!("  Address:  {}", house.address),
        format!("  Status:   {} ({})", house.status.column().title, house.status),
        format!("  Cover:    {}", house.cover_image),
    ];
    if !house.features.is_empty() {
        lines.push(format!("  Features: {}", house.feature_text()));
    }
    if !house.description.is_empty() {
        lines.push(format!("\n  {}", house.description));
    }
    lines.push(format!("\n  Gallery: {} items", house.gallery.len()));
    lines.extend(
        house
            .gallery
            .iter()
            .map(|media| format!("    [{}] {} {}", media.id, media.kind, media.url)),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
