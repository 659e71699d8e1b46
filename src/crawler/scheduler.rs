//! Scheduler driving the depth-first crawl
//!
//! This module handles:
//! - The explicit frontier stack of (URL, depth) pairs
//! - Depth and page-limit accounting
//! - Visited-set admission (mark before fetching, so cycles terminate)
//! - Feeding discovered links back into the frontier in document order

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::visited::VisitedSet;
use crate::document::Document;
use crate::url::normalize_url;
use url::Url;

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// Canonical URL to fetch
    pub url: Url,

    /// Link hops from the seed (0 = seed)
    pub depth: u32,
}

/// What to do with a URL popped from the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    /// Mark visited and fetch it
    Visit,
    /// Drop it and keep going
    Skip,
    /// The page budget is spent; nothing else will be fetched
    Stop,
}

/// Mutable state of a single traversal
///
/// Owned by one [`Scheduler::crawl_with`] call and discarded when it returns.
#[derive(Debug)]
struct CrawlState {
    frontier: Vec<QueuedUrl>,
    visited: VisitedSet,
}

impl CrawlState {
    fn new(seed: Url) -> Self {
        Self {
            frontier: vec![QueuedUrl { url: seed, depth: 0 }],
            visited: VisitedSet::new(),
        }
    }

    fn next(&mut self) -> Option<QueuedUrl> {
        self.frontier.pop()
    }

    fn admit(&mut self, queued: &QueuedUrl, config: &CrawlerConfig) -> Admission {
        if self.visited.len() >= config.page_limit {
            return Admission::Stop;
        }

        if queued.depth > config.max_depth {
            tracing::trace!("Depth {} exceeds limit: {}", queued.depth, queued.url);
            return Admission::Skip;
        }

        if !self.visited.insert(&queued.url) {
            tracing::trace!("Already visited: {}", queued.url);
            return Admission::Skip;
        }

        Admission::Visit
    }

    /// Pushes links so that the first one in document order is popped first
    fn enqueue_links(&mut self, links: Vec<Url>, depth: u32, config: &CrawlerConfig) {
        if depth > config.max_depth {
            return;
        }

        for url in links.into_iter().rev() {
            if !self.visited.contains(&url) {
                self.frontier.push(QueuedUrl { url, depth });
            }
        }
    }
}

/// Crawl scheduler
///
/// Traverses links depth-first from a seed. Depth and page count are
/// independent stopping conditions; the visited set never exceeds the page
/// limit and no URL is visited twice.
pub struct Scheduler {
    fetcher: Fetcher,
    config: CrawlerConfig,
}

impl Scheduler {
    /// Creates a new scheduler
    pub fn new(fetcher: Fetcher, config: CrawlerConfig) -> Self {
        Self { fetcher, config }
    }

    /// Crawls from `seed` and returns the visited set
    pub async fn crawl(&self, seed: &Url) -> VisitedSet {
        self.crawl_with(seed, |_, _| {}).await
    }

    /// Crawls from `seed`, calling `on_visit` once for every page fetched
    ///
    /// Each page is fetched and parsed exactly once; the same [`Document`] is
    /// used for link discovery and handed to `on_visit`. A fetch failure is
    /// logged and ends that branch only.
    pub async fn crawl_with<F>(&self, seed: &Url, mut on_visit: F) -> VisitedSet
    where
        F: FnMut(&Url, &Document),
    {
        let seed = match normalize_url(seed.as_str()) {
            Ok(seed) => seed,
            Err(e) => {
                tracing::warn!("Cannot crawl {}: {}", seed, e);
                return VisitedSet::new();
            }
        };

        tracing::info!(
            "Starting crawl from {} (max depth {}, page limit {})",
            seed,
            self.config.max_depth,
            self.config.page_limit
        );

        let mut state = CrawlState::new(seed);

        while let Some(queued) = state.next() {
            match state.admit(&queued, &self.config) {
                Admission::Visit => {}
                Admission::Skip => continue,
                Admission::Stop => {
                    tracing::info!(
                        "Page limit of {} reached, {} URLs left unvisited",
                        self.config.page_limit,
                        state.frontier.len() + 1
                    );
                    break;
                }
            }

            tracing::info!("Crawling: {} (depth {})", queued.url, queued.depth);

            let body = match self.fetcher.fetch(&queued.url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Dead branch: {}", e);
                    continue;
                }
            };

            let links = {
                let document = Document::parse(&body);
                on_visit(&queued.url, &document);
                document.links(&queued.url)
            };

            tracing::debug!("Found {} links on {}", links.len(), queued.url);
            state.enqueue_links(links, queued.depth + 1, &self.config);
        }

        tracing::info!("Crawl finished: {} pages visited", state.visited.len());
        state.visited
    }
}
