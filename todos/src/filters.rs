//! View filters: completion status and a set of colors.
//!
//! Filters never touch the records; they only decide which records a
//! filtered view shows.

use crate::types::{Color, Todo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use todo_flux_core::reducer::Reducer;

/// Completion status filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl StatusFilter {
    /// Whether a todo with the given completion flag passes this filter
    #[must_use]
    pub const fn accepts(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

/// Whether a color is being added to or removed from the color filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChange {
    /// Start showing this color
    Added,
    /// Stop showing this color
    Removed,
}

/// Current view filters
///
/// An empty color set means "any color".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Completion status filter
    pub status: StatusFilter,
    /// Colors to show
    pub colors: BTreeSet<Color>,
}

impl FilterState {
    /// Creates filters with the given status and colors
    #[must_use]
    pub fn new(status: StatusFilter, colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            status,
            colors: colors.into_iter().collect(),
        }
    }

    /// Whether these filters let every todo through
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.status == StatusFilter::All && self.colors.is_empty()
    }

    /// Whether `todo` passes both filters
    ///
    /// A todo without a color never passes a non-empty color filter.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        self.status.accepts(todo.completed)
            && (self.colors.is_empty() || todo.color.is_some_and(|c| self.colors.contains(&c)))
    }
}

/// Actions accepted by the filters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum FilterAction {
    /// Replace the status filter
    #[serde(rename = "filters/statusFilterChanged")]
    StatusFilterChanged(StatusFilter),

    /// Add a color to or remove a color from the color filter
    #[serde(rename = "filters/colorFilterChanged")]
    ColorFilterChanged {
        /// Color being changed
        color: Color,
        /// Direction of the change
        #[serde(rename = "changeType")]
        change: ColorChange,
    },
}

/// Reducer for the view filters
#[derive(Clone, Debug, Default)]
pub struct FiltersReducer;

impl Reducer for FiltersReducer {
    type State = FilterState;
    type Action = FilterAction;
    type Environment = ();

    fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) {
        match action {
            FilterAction::StatusFilterChanged(status) => state.status = status,
            FilterAction::ColorFilterChanged { color, change } => match change {
                ColorChange::Added => {
                    state.colors.insert(color);
                }
                ColorChange::Removed => {
                    state.colors.remove(&color);
                }
            },
        }
    }
}
