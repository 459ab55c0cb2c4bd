//! To-do list model and its persisted settings.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use defaults_core::{plist_storable, UserDefault};
use defaults_store::DefaultsStore;
use serde::{Deserialize, Serialize};

/// A single to-do entry, stored as a blob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodoListItem {
    pub name: String,
    pub added: DateTime<Utc>,
    pub completed: bool,
}

plist_storable!(TodoListItem);

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("row {row} is out of range ({visible} visible items)")]
    RowOutOfRange { row: usize, visible: usize },
}

/// The settings the app persists.
#[derive(Clone, Debug)]
pub struct Storage {
    pub todo_list: UserDefault<Vec<TodoListItem>>,
    pub show_completed: UserDefault<bool>,
}

impl Storage {
    pub const TODO_LIST_KEY: &'static str = "todo_list";
    pub const SHOW_COMPLETED_KEY: &'static str = "show_completed";

    pub fn new(store: Arc<dyn DefaultsStore>) -> Self {
        Self {
            todo_list: UserDefault::new(Self::TODO_LIST_KEY, Arc::clone(&store)),
            show_completed: UserDefault::new(Self::SHOW_COMPLETED_KEY, store),
        }
    }

    /// Forget everything the app has stored.
    pub fn clear(&self) {
        self.todo_list.clear();
        self.show_completed.clear();
    }
}

/// In-memory to-do list state.
#[derive(Clone, Debug, PartialEq)]
pub struct TodoList {
    pub items: Vec<TodoListItem>,
    pub show_completed: bool,
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            show_completed: true,
        }
    }
}

impl TodoList {
    pub fn load(storage: &Storage) -> Self {
        Self {
            items: storage.todo_list.get_or(Vec::new()),
            show_completed: storage.show_completed.get_or(true),
        }
    }

    pub fn save(&self, storage: &Storage) {
        storage.todo_list.set(&self.items);
        storage.show_completed.set(&self.show_completed);
    }

    pub fn add(&mut self, name: impl Into<String>, added: DateTime<Utc>) -> &TodoListItem {
        self.items.push(TodoListItem {
            name: name.into(),
            added,
            completed: false,
        });
        &self.items[self.items.len() - 1]
    }

    /// Items currently shown, each with its index in `items`.
    ///
    /// Completed items are hidden unless `show_completed` is set.
    pub fn visible_items(&self) -> Vec<(usize, &TodoListItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.show_completed || !item.completed)
            .collect()
    }

    /// Toggle completion of the item shown at `row` (zero-based).
    pub fn toggle(&mut self, row: usize) -> Result<&TodoListItem, TodoError> {
        let index = {
            let visible = self.visible_items();
            match visible.get(row) {
                Some(&(index, _)) => index,
                None => {
                    return Err(TodoError::RowOutOfRange {
                        row,
                        visible: visible.len(),
                    })
                }
            }
        };
        let item = &mut self.items[index];
        item.completed = !item.completed;
        Ok(item)
    }

    /// Flip the completed-items filter, returning the new setting.
    pub fn toggle_show_completed(&mut self) -> bool {
        self.show_completed = !self.show_completed;
        self.show_completed
    }
}

/// Render a timestamp the way the list shows it, e.g. `12 Jan 09:30`.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d %b %H:%M").to_string()
}
