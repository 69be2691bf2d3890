use std::collections::{HashSet, VecDeque};
use url::Url;

/// True when both URLs share the host and port reported by the parser.
/// The crawl boundary is the seed's authority, so two ports on one host
/// count as different sites. Hosts come back from parsing already
/// lowercased and default ports already stripped.
pub fn same_authority(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}

/// BFS state for one seed: the FIFO of URLs waiting to be fetched plus the
/// set of URLs that have ever been drawn into a batch. Discovery order is
/// queue order. Lives exactly as long as one seed's crawl.
pub struct Frontier {
    seed: Url,
    queue: VecDeque<Url>,
    queued: HashSet<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    /// Fresh frontier holding only the seed itself.
    pub fn new(seed: Url) -> Self {
        let mut queue = VecDeque::new();
        let mut queued = HashSet::new();
        queue.push_back(seed.clone());
        queued.insert(seed.clone());

        Self {
            seed,
            queue,
            queued,
            visited: HashSet::new(),
        }
    }

    /// Admit `url` if it sits on the seed's authority and has never been
    /// queued or visited. Off-domain and repeat URLs are dropped without
    /// error; the return value exists for debug logging only.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if !same_authority(&self.seed, &url) {
            return false;
        }
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Remove and return up to `max` URLs from the front of the queue.
    /// Every returned URL is marked visited here, before any fetch starts,
    /// so it can never appear in a later batch or be re-enqueued while its
    /// fetch is still in flight.
    pub fn draw_batch(&mut self, max: usize) -> Vec<Url> {
        let mut batch = Vec::new();
        while batch.len() < max {
            match self.queue.pop_front() {
                Some(url) => {
                    self.queued.remove(&url);
                    if self.visited.contains(&url) {
                        continue;
                    }
                    self.visited.insert(url.clone());
                    batch.push(url);
                }
                None => break,
            }
        }
        batch
    }

    /// URLs still waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// URLs ever drawn into a batch.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
