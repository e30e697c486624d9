//! Plain-text presentation for the command-line consumer

use crate::models::{BookSummary, DetailResult, Rating};
use std::fmt::Write;

/// `by A, B`
pub fn byline(authors: &[String]) -> String {
    format!("by {}", authors.join(", "))
}

/// `Published in 1813`, or `Published in N/A`
pub fn published_line(published_year: &str) -> String {
    let year: String = published_year.chars().take(4).collect();
    format!("Published in {}", year)
}

/// `4.5 (120 reviews)`
pub fn rating_line(rating: &Rating) -> String {
    format!("{:.1} ({} reviews)", rating.average, rating.count)
}

/// One numbered search result block
pub fn summary_block(index: usize, book: &BookSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>2}. {}", index, book.title);
    let _ = writeln!(out, "    {}", byline(&book.authors));
    let _ = writeln!(
        out,
        "    {} | {}",
        published_line(&book.published_year),
        rating_line(&Rating {
            average: book.average_rating,
            count: book.ratings_count,
        })
    );
    let _ = writeln!(out, "    {}", book.short_description);
    if let Some(cover) = &book.cover_thumbnail_url {
        let _ = writeln!(out, "    Cover: {}", cover);
    }
    let _ = writeln!(out, "    Key: {}", book.id);
    out
}

pub fn detail_block(detail: &DetailResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rating: {}", rating_line(&detail.rating));
    let _ = writeln!(out);
    let _ = writeln!(out, "About the author");
    let _ = writeln!(out, "{}", detail.author_bio);
    let _ = writeln!(out);
    let _ = writeln!(out, "Overview");
    let _ = writeln!(out, "{}", detail.description);
    out
}
