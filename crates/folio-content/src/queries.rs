//! Store queries issued by the content service.

use chrono::NaiveDate;
use folio_config::StoreConfig;
use folio_normalize::fields::{post, series};
use folio_store::{Condition, Filter, QueryRequest, Sort};

fn published_by(today: NaiveDate) -> Filter {
    Filter::property(
        post::PUBLISHED.name,
        Condition::DateOnOrBefore(today.format("%Y-%m-%d").to_string()),
    )
}

/// Every post published on or before `today`, newest first.
pub fn published_posts(store: &StoreConfig, today: NaiveDate) -> QueryRequest {
    QueryRequest::new(&store.posts_database_id, store.effective_page_size())
        .filter(published_by(today))
        .sort(Sort::descending(post::PUBLISHED.name))
}

/// The post whose slug is exactly `slug`.
pub fn post_by_slug(store: &StoreConfig, slug: &str) -> QueryRequest {
    QueryRequest::new(&store.posts_database_id, 1).filter(Filter::property(
        post::SLUG.name,
        Condition::RichTextEquals(slug.to_string()),
    ))
}

/// All series, by name.
pub fn all_series(store: &StoreConfig) -> QueryRequest {
    QueryRequest::new(&store.series_database_id, store.effective_page_size())
        .sort(Sort::ascending(series::NAME.name))
}

/// Published posts linked to `series_id`, in part order.
pub fn series_posts(store: &StoreConfig, series_id: &str, today: NaiveDate) -> QueryRequest {
    QueryRequest::new(&store.posts_database_id, store.effective_page_size())
        .filter(Filter::And(vec![
            Filter::property(
                post::SERIES.name,
                Condition::RelationContains(series_id.to_string()),
            ),
            published_by(today),
        ]))
        .sort(Sort::ascending(post::PART.name))
        .sort(Sort::ascending(post::PUBLISHED.name))
}
