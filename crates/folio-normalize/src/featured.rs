//! Featured-series projection.

use std::cmp::Ordering;

use chrono::NaiveDate;
use folio_core::entities::{FeaturedArticle, FeaturedSeries, Post, Series};

/// Build the featured card for `series` from its posts.
///
/// Returns `None` when no post is published as of `today`. Articles are
/// ordered by part (unnumbered last), then date, then title, and capped at
/// `article_limit` (at least one).
#[must_use]
pub fn project_featured(
    series: Series,
    posts: &[Post],
    today: NaiveDate,
    article_limit: usize,
) -> Option<FeaturedSeries> {
    let mut published: Vec<&Post> = posts.iter().filter(|p| p.is_published(today)).collect();
    if published.is_empty() {
        return None;
    }
    published.sort_by(|a, b| reading_order(a, b));

    let published_count = published.len();
    let articles = published
        .into_iter()
        .take(article_limit.max(1))
        .map(FeaturedArticle::from)
        .collect();

    Some(FeaturedSeries {
        series,
        articles,
        published_count,
    })
}

fn reading_order(a: &Post, b: &Post) -> Ordering {
    let part = |p: &Post| p.series.as_ref().and_then(|s| s.part);
    match (part(a), part(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then(a.published_on.cmp(&b.published_on))
    .then_with(|| a.title.cmp(&b.title))
}
