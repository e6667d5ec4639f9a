// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: pages waiting to be visited, plus pages already seen.
//
// - VecDeque gives us a FIFO queue, which makes the crawl breadth-first
// - HashSet remembers every URL we have already popped and visited
//
// A frontier belongs to exactly one crawl. It is created with the seed at
// depth 0 and thrown away when the crawl returns.
// =============================================================================

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A page waiting in the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub address: Url,
    /// How many link hops from the seed (seed = 0)
    pub depth: usize,
}

#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new(seed: Url) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry {
            address: seed,
            depth: 0,
        });

        Self {
            queue,
            visited: HashSet::new(),
        }
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    // Queues a discovered link unless it was already visited
    //
    // Returns: true if the link was queued
    pub fn push(&mut self, address: Url, depth: usize) -> bool {
        if self.is_visited(&address) {
            return false;
        }
        self.queue.push_back(FrontierEntry { address, depth });
        true
    }

    // Test-and-set: marks the address visited and reports whether it was new
    //
    // If fetching is ever parallelised, this is the one call that has to
    // stay atomic (behind a Mutex) to keep "fetch each URL at most once".
    pub fn mark_visited(&mut self, address: &Url) -> bool {
        self.visited.insert(address.as_str().to_string())
    }

    pub fn is_visited(&self, address: &Url) -> bool {
        self.visited.contains(address.as_str())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    // Nothing left to pop (entries already visited still count until popped)
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_starts_with_seed_at_depth_zero() {
        let mut frontier = Frontier::new(url("https://example.com/"));
        let entry = frontier.pop().unwrap();
        assert_eq!(entry.address.as_str(), "https://example.com/");
        assert_eq!(entry.depth, 0);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(url("https://example.com/"));
        frontier.pop();
        frontier.push(url("https://example.com/a"), 1);
        frontier.push(url("https://example.com/b"), 1);
        assert_eq!(frontier.pop().unwrap().address.path(), "/a");
        assert_eq!(frontier.pop().unwrap().address.path(), "/b");
    }

    #[test]
    fn test_mark_visited_only_once() {
        let mut frontier = Frontier::new(url("https://example.com/"));
        let seed = url("https://example.com/");
        assert!(frontier.mark_visited(&seed));
        assert!(!frontier.mark_visited(&seed));
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_visited_links_are_not_queued() {
        let mut frontier = Frontier::new(url("https://example.com/"));
        let seed = frontier.pop().unwrap().address;
        frontier.mark_visited(&seed);

        assert!(!frontier.push(seed, 1));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_is_empty_after_last_pop() {
        let mut frontier = Frontier::new(url("https://example.com/"));
        assert!(!frontier.is_empty());
        frontier.pop();
        assert!(frontier.is_empty());
        frontier.push(url("https://example.com/a"), 1);
        assert!(!frontier.is_empty());
    }
}
