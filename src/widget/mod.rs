//! The live keyword search widget.
//!
//! A [`SearchWidget`] owns one keyword index and the search state built
//! from it. Events are handled synchronously in arrival order:
//!
//! - a query change recomputes the result list unless the query text is
//!   identical to the previous one,
//! - a selection in the rendered title list is expanded to its line and
//!   captures that row's tag as the current choice,
//! - a submit navigates to the chosen entry and ends the widget's life.

use crate::index::KeywordIndex;
use crate::navigate::{NavigationConfig, Navigator, Target, compose_target};
use crate::search::{self, LineSelection, ResultList, SearchOptions, resolve_selection, tokenize};

/// Where the widget is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// No query; the unfiltered list is rendered.
    Idle,
    /// A non-empty query is applied.
    Filtered,
    /// A row has been chosen.
    Selected,
    /// Navigation has been issued. Terminal.
    Navigated,
}

/// Input events, in the order the user produces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The full query text after an edit.
    QueryChanged(String),
    /// A selection in the rendered title list, as character offsets.
    Select { start: usize, end: usize },
    /// Enter in the query field, or an explicit go action.
    Submit,
}

/// The visible effect of one handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The result list was rebuilt.
    Recomputed,
    /// The query text was unchanged, so nothing was rebuilt.
    Unchanged,
    /// A selection was expanded to whole lines.
    Selected(Selection),
    /// A navigation was issued.
    Navigated(Target),
    /// The event had no effect in the current state.
    Ignored,
}

/// A selection expanded to its line, with the tag it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub line: LineSelection,
    pub tag: Option<String>,
}

/// Per-widget search state: the last applied query and its results.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    last_query: Option<String>,
    results: ResultList,
}

impl SearchState {
    /// Recompute results for `query` unless it equals the last query.
    ///
    /// Returns `true` when the results were rebuilt.
    pub fn update(&mut self, index: &KeywordIndex, query: &str, options: &SearchOptions) -> bool {
        if self.last_query.as_deref() == Some(query) {
            return false;
        }

        self.results = search::search(index, query, options);
        self.last_query = Some(query.to_string());
        true
    }

    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    #[must_use]
    pub fn results(&self) -> &ResultList {
        &self.results
    }

    #[must_use]
    pub fn row_to_tag(&self) -> &[String] {
        self.results.row_to_tag()
    }
}

/// One search widget instance.
#[derive(Debug, Clone)]
pub struct SearchWidget {
    index: KeywordIndex,
    options: SearchOptions,
    navigation: NavigationConfig,
    state: SearchState,
    phase: WidgetState,
    choice: String,
    highlight: Option<LineSelection>,
}

impl SearchWidget {
    /// Create a widget and render the unfiltered list.
    #[must_use]
    pub fn new(index: KeywordIndex, options: SearchOptions, navigation: NavigationConfig) -> Self {
        let mut state = SearchState::default();
        state.update(&index, "", &options);

        Self {
            index,
            options,
            navigation,
            state,
            phase: WidgetState::Idle,
            choice: String::new(),
            highlight: None,
        }
    }

    /// Dispatch one event.
    pub fn handle<N: Navigator>(&mut self, event: WidgetEvent, navigator: &mut N) -> Outcome {
        match event {
            WidgetEvent::QueryChanged(query) => {
                if self.phase == WidgetState::Navigated {
                    Outcome::Ignored
                } else if self.set_query(&query) {
                    Outcome::Recomputed
                } else {
                    Outcome::Unchanged
                }
            }
            WidgetEvent::Select { start, end } => self
                .select(start, end)
                .map_or(Outcome::Ignored, Outcome::Selected),
            WidgetEvent::Submit => self
                .submit(navigator)
                .map_or(Outcome::Ignored, Outcome::Navigated),
        }
    }

    /// Apply new query text. Returns `true` when the results were rebuilt.
    ///
    /// Any rebuild invalidates the current choice, since rows now refer to
    /// a different result list.
    pub fn set_query(&mut self, query: &str) -> bool {
        if self.phase == WidgetState::Navigated {
            return false;
        }
        if !self.state.update(&self.index, query, &self.options) {
            return false;
        }

        self.choice.clear();
        self.highlight = None;
        self.phase = if tokenize(query).is_empty() {
            WidgetState::Idle
        } else {
            WidgetState::Filtered
        };
        true
    }

    /// Expand a selection in the rendered titles to its line and capture
    /// that row's tag.
    ///
    /// Selecting outside every row leaves the current choice untouched.
    /// Returns `None` once the widget has navigated.
    pub fn select(&mut self, start: usize, end: usize) -> Option<Selection> {
        if self.phase == WidgetState::Navigated {
            return None;
        }

        let resolved = resolve_selection(
            self.state.results().titles(),
            start,
            end,
            self.state.row_to_tag(),
        );
        let tag = resolved.tag.map(str::to_string);
        self.highlight = Some(resolved.selection);

        if let Some(tag) = &tag {
            self.choice = tag.to_lowercase();
            self.phase = WidgetState::Selected;
        }

        Some(Selection {
            line: resolved.selection,
            tag,
        })
    }

    /// Navigate to the current choice. A no-op without one.
    ///
    /// Navigator failures are logged and not retried; the widget is
    /// considered navigated either way.
    pub fn submit<N: Navigator>(&mut self, navigator: &mut N) -> Option<Target> {
        if self.phase != WidgetState::Selected || self.choice.is_empty() {
            tracing::debug!(phase = ?self.phase, "submit without a chosen entry ignored");
            return None;
        }

        let target = compose_target(&self.choice, &self.navigation);
        match navigator.navigate(&target) {
            Ok(()) => tracing::info!(location = %target.location, "navigated"),
            Err(e) => tracing::warn!(error = %e, "navigation failed"),
        }

        self.phase = WidgetState::Navigated;
        Some(target)
    }

    #[must_use]
    pub fn state(&self) -> WidgetState {
        self.phase
    }

    #[must_use]
    pub fn search_state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub fn results(&self) -> &ResultList {
        self.state.results()
    }

    /// The chosen tag, lower-cased; empty when nothing is chosen.
    #[must_use]
    pub fn choice(&self) -> &str {
        &self.choice
    }

    /// The last expanded selection, if it is still current.
    #[must_use]
    pub fn highlight(&self) -> Option<LineSelection> {
        self.highlight
    }

    #[must_use]
    pub fn index(&self) -> &KeywordIndex {
        &self.index
    }
}
