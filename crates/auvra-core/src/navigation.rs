//! Push/pop route stack between the entry screen and the two top-level
//! screens. Routes carry no parameters.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Entry,
    Chatbot,
    Rewards,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Route::Entry => "entry",
            Route::Chatbot => "chatbot",
            Route::Rewards => "rewards",
        })
    }
}

impl FromStr for Route {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" => Ok(Route::Entry),
            "chatbot" | "chat" => Ok(Route::Chatbot),
            "rewards" => Ok(Route::Rewards),
            other => Err(ValidationError::InvalidValue {
                field: "route".into(),
                message: format!("unknown route '{other}'"),
            }),
        }
    }
}

/// Route stack rooted at [`Route::Entry`]. The root is never popped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavStack {
    stack: Vec<Route>,
}

impl NavStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Entry],
        }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Entry)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, route: Route) -> Event {
        self.stack.push(route);
        tracing::debug!(%route, depth = self.stack.len(), "route pushed");
        Event::RoutePushed {
            route,
            depth: self.stack.len(),
            at: Utc::now(),
        }
    }

    /// Pop the current route. Returns `None` at the root.
    pub fn pop(&mut self) -> Option<Event> {
        if self.stack.len() <= 1 {
            return None;
        }
        let route = self.stack.pop()?;
        Some(Event::RoutePopped {
            route,
            depth: self.stack.len(),
            at: Utc::now(),
        })
    }
}

impl Default for NavStack {
    fn default() -> Self {
        Self::new()
    }
}
