//! The content query orchestrator.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use folio_cache::{CacheClass, CachePolicy, Clock, SystemClock, TtlCache, cache_key};
use folio_config::{FeaturedConfig, FolioConfig, StoreConfig};
use folio_core::entities::{Block, FeaturedSeries, Post, Series};
use folio_core::errors::QueryError;
use folio_normalize::{AssetResolver, Assembler, Batch, normalize_batch, project_featured};
use folio_store::{ContentSource, QueryRequest, RawRecord, StoreError};
use futures::future::join_all;

use crate::error::ContentError;
use crate::queries;

/// Cached, normalized reads over a [`ContentSource`].
///
/// Batch operations skip records that fail to assemble and return the rest;
/// [`skipped_records`](Self::skipped_records) counts what was left out.
/// Remote failures fail the whole operation with [`ContentError::Query`].
pub struct ContentService<S, C = SystemClock> {
    source: S,
    cache: TtlCache<C>,
    policy: CachePolicy,
    assembler: Assembler,
    store: StoreConfig,
    featured: FeaturedConfig,
    skipped: AtomicUsize,
}

impl<S: ContentSource> ContentService<S> {
    /// Build a service over `source` using the wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] when `config` fails validation.
    pub fn new(source: S, config: &FolioConfig) -> Result<Self, ContentError> {
        Self::with_clock(source, config, SystemClock)
    }
}

impl<S: ContentSource, C: Clock> ContentService<S, C> {
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] when `config` fails validation.
    pub fn with_clock(source: S, config: &FolioConfig, clock: C) -> Result<Self, ContentError> {
        config.validate()?;
        Ok(Self {
            source,
            cache: TtlCache::new(clock),
            policy: CachePolicy::from_config(&config.cache),
            assembler: Assembler::new(AssetResolver::from_config(&config.assets)),
            store: config.store.clone(),
            featured: config.featured.clone(),
            skipped: AtomicUsize::new(0),
        })
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub const fn cache(&self) -> &TtlCache<C> {
        &self.cache
    }

    /// Records dropped from batch results because they failed to assemble.
    ///
    /// Counted each time a batch is loaded from the store; cache hits add
    /// nothing.
    pub fn skipped_records(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }

    fn keep_items<T>(&self, batch: Batch<T>) -> Vec<T> {
        self.skipped.fetch_add(batch.failure_count(), Ordering::Relaxed);
        batch.into_items()
    }

    fn today(&self) -> NaiveDate {
        self.cache.clock().now().date_naive()
    }

    /// Every published post, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Query`] if the store query fails.
    pub async fn posts(&self) -> Result<Vec<Post>, ContentError> {
        let today = self.today();
        let key = cache_key("posts", [("as_of", today)]);
        self.cache
            .get_or_compute(&key, self.policy.ttl(CacheClass::Posts), || {
                self.load_posts(today)
            })
            .await
    }

    /// The post with `slug`, or `None` when no record matches.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Query`] if the store query fails, and
    /// [`ContentError::Record`] if the matching record cannot be assembled.
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let key = cache_key("post_by_slug", [("slug", slug)]);
        self.cache
            .get_or_compute(&key, self.policy.ttl(CacheClass::Posts), || {
                self.load_post_by_slug(slug)
            })
            .await
    }

    /// Every series that assembles, by name.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Query`] if the store query fails.
    pub async fn series(&self) -> Result<Vec<Series>, ContentError> {
        let key = cache_key("series", std::iter::empty::<(&str, &str)>());
        self.cache
            .get_or_compute(&key, self.policy.ttl(CacheClass::Series), || {
                self.load_series()
            })
            .await
    }

    /// Published posts of one series, in part order.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Query`] if the store query fails.
    pub async fn series_posts(&self, series_id: &str) -> Result<Vec<Post>, ContentError> {
        let today = self.today();
        let key = cache_key(
            "series_posts",
            [("as_of", today.to_string()), ("series_id", series_id.to_string())],
        );
        self.cache
            .get_or_compute(&key, self.policy.ttl(CacheClass::Posts), || {
                self.load_series_posts(series_id, today)
            })
            .await
    }

    /// Series with at least one published post, each with its leading articles.
    ///
    /// Per-series post lookups run concurrently. A failed lookup is logged and
    /// counts as no posts, so that series is left out while the others proceed.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Query`] if the series query itself fails.
    pub async fn featured_series(&self) -> Result<Vec<FeaturedSeries>, ContentError> {
        let today = self.today();
        let limit = self.featured.article_limit;
        let key = cache_key(
            "featured_series",
            [("as_of", today.to_string()), ("limit", limit.to_string())],
        );
        self.cache
            .get_or_compute(&key, self.policy.ttl(CacheClass::Featured), || {
                self.load_featured(today, limit)
            })
            .await
    }

    /// Every child block of `page_id`, following continuation cursors.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Query`] if any page fetch fails or the store
    /// hands back a cursor it already returned.
    pub async fn page_blocks(&self, page_id: &str) -> Result<Vec<Block>, ContentError> {
        let key = cache_key("page_blocks", [("page_id", page_id)]);
        self.cache
            .get_or_compute(&key, self.policy.ttl(CacheClass::Pages), || {
                self.fetch_all_children(page_id)
            })
            .await
    }

    async fn load_posts(&self, today: NaiveDate) -> Result<Vec<Post>, ContentError> {
        let records = self
            .fetch("posts", &queries::published_posts(&self.store, today))
            .await?;
        Ok(self.keep_items(normalize_batch("post", &records, |r| {
            self.assembler.post(r)
        })))
    }

    async fn load_post_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        const OPERATION: &str = "post_by_slug";
        let records = self
            .fetch(OPERATION, &queries::post_by_slug(&self.store, slug))
            .await?;
        let Some(record) = records.first() else {
            tracing::debug!(operation = OPERATION, slug, "no post with slug");
            return Ok(None);
        };
        self.assembler
            .post(record)
            .map(Some)
            .map_err(|error| ContentError::Record {
                operation: OPERATION,
                error,
            })
    }

    async fn load_series(&self) -> Result<Vec<Series>, ContentError> {
        let records = self
            .fetch("series", &queries::all_series(&self.store))
            .await?;
        Ok(self.keep_items(normalize_batch("series", &records, |r| {
            self.assembler.series(r)
        })))
    }

    async fn load_series_posts(
        &self,
        series_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<Post>, ContentError> {
        let request = queries::series_posts(&self.store, series_id, today);
        let records = self.fetch("series_posts", &request).await?;
        Ok(self.keep_items(normalize_batch("post", &records, |r| {
            self.assembler.post(r)
        })))
    }

    async fn load_featured(
        &self,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<FeaturedSeries>, ContentError> {
        let all_series = self.series().await?;
        let mut posts_by_series = self.posts_by_series(&all_series).await;

        let featured: Vec<FeaturedSeries> = all_series
            .into_iter()
            .filter_map(|series| {
                let posts = posts_by_series.remove(&series.id).unwrap_or_default();
                project_featured(series, &posts, today, limit)
            })
            .collect();
        tracing::debug!(
            operation = "featured_series",
            featured = featured.len(),
            "featured series projected"
        );
        Ok(featured)
    }

    async fn posts_by_series(&self, all_series: &[Series]) -> HashMap<String, Vec<Post>> {
        let lookups = all_series.iter().map(|series| async move {
            (series.id.clone(), self.series_posts(&series.id).await)
        });

        join_all(lookups)
            .await
            .into_iter()
            .map(|(series_id, result)| {
                let posts = result.unwrap_or_else(|e| {
                    tracing::warn!(
                        operation = "featured_series",
                        series_id = %series_id,
                        error = %e,
                        outcome = "empty",
                        "series post lookup failed"
                    );
                    Vec::new()
                });
                (series_id, posts)
            })
            .collect()
    }

    async fn fetch_all_children(&self, page_id: &str) -> Result<Vec<Block>, ContentError> {
        const OPERATION: &str = "page_blocks";
        let page_size = self.store.effective_page_size();
        let mut blocks = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .source
                .list_children(page_id, cursor.as_deref(), page_size)
                .await
                .map_err(|e| remote_failure(OPERATION, e).with_context("page_id", page_id))?;
            blocks.extend(page.blocks.into_iter().map(Block::from));

            match page.next_cursor {
                None => break,
                Some(next) if !seen.insert(next.clone()) => {
                    let err = QueryError::new(OPERATION, "store repeated a pagination cursor")
                        .with_context("page_id", page_id)
                        .with_context("cursor", next);
                    tracing::error!(operation = OPERATION, page_id, %err, "pagination stalled");
                    return Err(err.into());
                }
                Some(next) => cursor = Some(next),
            }
        }

        tracing::debug!(operation = OPERATION, page_id, blocks = blocks.len(), "children fetched");
        Ok(blocks)
    }

    async fn fetch(
        &self,
        operation: &'static str,
        request: &QueryRequest,
    ) -> Result<Vec<RawRecord>, ContentError> {
        let records = self.source.query(request).await.map_err(|e| {
            remote_failure(operation, e).with_context("database_id", request.database_id.clone())
        })?;
        tracing::debug!(operation, records = records.len(), "store query returned");
        Ok(records)
    }
}

fn remote_failure(operation: &'static str, err: StoreError) -> QueryError {
    tracing::error!(operation, error = %err, "store request failed");
    let retry_after = match &err {
        StoreError::RateLimited { retry_after_secs } => Some(*retry_after_secs),
        _ => None,
    };
    let query = QueryError::from_source(operation, err);
    match retry_after {
        Some(secs) => query.with_context("retry_after_secs", secs.to_string()),
        None => query,
    }
}
