//! Domain types for the to-do list.
//!
//! A to-do list is an ordered sequence of records. Records are created by the
//! backend (the client only supplies the text), toggled and recolored in
//! place by id, and removed by id or in bulk.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Server-assigned identifier for a todo record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color tag of a todo
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Green
    Green,
    /// Blue
    Blue,
    /// Orange
    Orange,
    /// Purple
    Purple,
    /// Red
    Red,
}

impl Color {
    /// Every available color, in picker order
    pub const ALL: [Self; 5] = [Self::Green, Self::Blue, Self::Orange, Self::Purple, Self::Red];

    /// Wire name of the color
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A color name that is not one of [`Color::ALL`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color: {0:?}")]
pub struct UnknownColor(pub String);

impl std::str::FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// Serde adapter for an optional color that is `""` on the wire when unset
pub mod optional_color {
    use super::Color;
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serialize `None` as `""` and `Some(color)` as its name
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)] // Signature required by `#[serde(with)]`
    pub fn serialize<S: Serializer>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(color.map_or("", Color::as_str))
    }

    /// Deserialize `""` (or `null`) as `None`
    ///
    /// # Errors
    ///
    /// Fails on a color name outside [`Color::ALL`].
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Color>, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if name.is_empty() {
            return Ok(None);
        }
        name.parse().map(Some).map_err(de::Error::custom)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned by the server
    pub id: TodoId,
    /// Text of the todo
    pub text: String,
    /// Whether the todo is completed
    #[serde(default)]
    pub completed: bool,
    /// Color tag, if any
    #[serde(default, with = "optional_color")]
    pub color: Option<Color>,
}

impl Todo {
    /// Creates an uncompleted, uncolored todo
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            color: None,
        }
    }

    /// Returns this todo with the given completion flag
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Returns this todo with the given color
    #[must_use]
    pub const fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }
}

/// Coarse loading flag of the record store
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingStatus {
    /// No fetch in flight
    #[default]
    Idle,
    /// A fetch-all is in flight
    Loading,
}

/// State of the record store
///
/// `entities` is shared between snapshots; a transition that changes the
/// records always installs a new sequence, so pointer identity tells whether
/// the records changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodosState {
    /// Loading flag
    pub status: LoadingStatus,
    /// Records in arrival order
    pub entities: Arc<Vec<Todo>>,
}

impl TodosState {
    /// Creates an idle, empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle state holding `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            status: LoadingStatus::Idle,
            entities: Arc::new(todos),
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.entities.iter().filter(|t| t.completed).count()
    }

    /// Returns the number of todos still to do
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.count() - self.completed_count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.entities.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Actions accepted by the record store
///
/// On the wire an action is `{"type": <kind>, "payload": <payload>}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum TodoAction {
    /// A fetch-all started
    #[serde(rename = "todos/todosLoading")]
    TodosLoading,

    /// A fetch-all completed; replaces every record
    #[serde(rename = "todos/todosLoaded")]
    TodosLoaded(Vec<Todo>),

    /// The server created a record; appended as is
    #[serde(rename = "todos/todoAdded")]
    TodoAdded(Todo),

    /// Flip the completion flag of a record
    #[serde(rename = "todos/todoToggled")]
    TodoToggled(TodoId),

    /// Set the color of a record
    #[serde(rename = "todos/colorSelected")]
    ColorSelected {
        /// Record to recolor
        #[serde(rename = "todoId")]
        todo_id: TodoId,
        /// New color, `None` to clear
        #[serde(with = "optional_color")]
        color: Option<Color>,
    },

    /// Remove a record
    #[serde(rename = "todos/todoDeleted")]
    TodoDeleted(TodoId),

    /// Mark every record completed
    #[serde(rename = "todos/allCompleted")]
    AllCompleted,

    /// Remove every completed record
    #[serde(rename = "todos/completedCleared")]
    CompletedCleared,
}
