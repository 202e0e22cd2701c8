//! Shared test support: a canned-page fetcher double with call counters.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ratebeer_core::{FetchError, Fetcher};
use scraper::Html;
use serde_json::Value;

/// A [`Fetcher`] serving canned bodies from memory, counting every call.
///
/// Paths not seeded respond like a dead server (HTTP 404 transport error),
/// so a test that fetches more than it declared fails loudly.
#[derive(Default)]
pub struct FakeFetcher {
    pages: Mutex<HashMap<String, String>>,
    graph_body: Mutex<Option<String>>,
    get_calls: AtomicUsize,
    post_form_calls: AtomicUsize,
    graph_calls: AtomicUsize,
    last_form: Mutex<Option<(String, String)>>,
    last_graph: Mutex<Option<(String, Value)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a GET page body for `path`.
    pub fn page(self, path: &str, body: &str) -> Self {
        self.add_page(path, body);
        self
    }

    /// Seeds a page after construction.
    pub fn add_page(&self, path: &str, body: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(path.to_string(), body.to_string());
    }

    /// Seeds the JSON API response body.
    pub fn graph_response(self, body: &str) -> Self {
        *self.graph_body.lock().unwrap() = Some(body.to_string());
        self
    }

    /// Total fetches of any kind.
    pub fn fetch_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
            + self.post_form_calls.load(Ordering::SeqCst)
            + self.graph_calls.load(Ordering::SeqCst)
    }

    pub fn get_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn post_form_count(&self) -> usize {
        self.post_form_calls.load(Ordering::SeqCst)
    }

    pub fn graph_count(&self) -> usize {
        self.graph_calls.load(Ordering::SeqCst)
    }

    /// The last form post as (path, body).
    pub fn last_form(&self) -> Option<(String, String)> {
        self.last_form.lock().unwrap().clone()
    }

    /// The last graph post as (operation name, variables).
    pub fn last_graph(&self) -> Option<(String, Value)> {
        self.last_graph.lock().unwrap().clone()
    }

    fn lookup(&self, path: &str) -> Result<Html, FetchError> {
        match self.pages.lock().unwrap().get(path) {
            Some(body) => Ok(Html::parse_document(body)),
            None => Err(FetchError::Status {
                url: path.to_string(),
                status: 404,
            }),
        }
    }
}

impl Fetcher for FakeFetcher {
    fn get(&self, path: &str) -> Result<Html, FetchError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(path)
    }

    fn post_form(&self, path: &str, body: String) -> Result<Html, FetchError> {
        self.post_form_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_form.lock().unwrap() = Some((path.to_string(), body));
        self.lookup(path)
    }

    fn post_graph_query(
        &self,
        operation_name: &str,
        variables: &Value,
        _query: &str,
    ) -> Result<String, FetchError> {
        self.graph_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_graph.lock().unwrap() = Some((operation_name.to_string(), variables.clone()));
        self.graph_body
            .lock()
            .unwrap()
            .clone()
            .ok_or(FetchError::Status {
                url: "graphql".to_string(),
                status: 404,
            })
    }
}
