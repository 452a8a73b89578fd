//! Shared server state.
//!
//! The mutable example stores live here and are handed to handlers through
//! axum's `State`, so each router (and each test) gets its own copy.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};

use crate::{error::ApiError, latency::Latency};

/// The todo every optimistic-updates list starts with.
pub const DEFAULT_TODO: &str = "Default todo";

/// State shared by every route.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Delay applied to simulated slow endpoints.
    pub latency: Latency,
    /// Optimistic-updates todo list.
    pub todos: TodoStore,
    /// Invalidations-from-mutations posts.
    pub posts: PostStore,
}

impl AppState {
    /// Fresh stores with the given latency.
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            todos: TodoStore::default(),
            posts: PostStore::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ApiError> {
    mutex.lock().map_err(|_| ApiError::StoreUnavailable)
}

/// Ordered list of todo titles.
#[derive(Debug, Clone)]
pub struct TodoStore {
    todos: Arc<Mutex<Vec<String>>>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self {
            todos: Arc::new(Mutex::new(vec![DEFAULT_TODO.to_string()])),
        }
    }
}

impl TodoStore {
    /// All todos, oldest first.
    pub fn list(&self) -> Result<Vec<String>, ApiError> {
        Ok(lock(&self.todos)?.clone())
    }

    /// Append a todo. Returns the new length.
    pub fn push(&self, title: String) -> Result<usize, ApiError> {
        let mut todos = lock(&self.todos)?;
        todos.push(title);
        Ok(todos.len())
    }

    /// Back to just the default todo.
    pub fn reset(&self) -> Result<(), ApiError> {
        let mut todos = lock(&self.todos)?;
        todos.clear();
        todos.push(DEFAULT_TODO.to_string());
        Ok(())
    }
}

/// Editable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    /// Post title.
    pub title: String,
    /// Post body.
    pub description: String,
}

impl Default for PostContent {
    fn default() -> Self {
        Self {
            title: "Default title".to_string(),
            description: "Default description".to_string(),
        }
    }
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Client-chosen id.
    pub id: i64,
    /// Title and description.
    #[serde(flatten)]
    pub content: PostContent,
}

/// Posts keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Arc<Mutex<BTreeMap<i64, PostContent>>>,
}

impl PostStore {
    /// The post stored under `id`, if any.
    pub fn get(&self, id: i64) -> Result<Option<Post>, ApiError> {
        Ok(lock(&self.posts)?
            .get(&id)
            .cloned()
            .map(|content| Post { id, content }))
    }

    /// Insert or replace. Returns `true` when a post was replaced.
    pub fn upsert(&self, id: i64, content: PostContent) -> Result<bool, ApiError> {
        Ok(lock(&self.posts)?.insert(id, content).is_some())
    }

    /// Remove every post.
    pub fn clear(&self) -> Result<(), ApiError> {
        lock(&self.posts)?.clear();
        Ok(())
    }
}
