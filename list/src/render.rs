//! Plain-text rendering adapter.
//!
//! Rendering is a pure function of a [`ListSnapshot`]; the list core never
//! calls into this module.

use crate::view::ListSnapshot;
use std::fmt::Write;

/// Turns a snapshot into something a user can look at
pub trait Renderer {
    /// Render the snapshot
    fn render(&self, snapshot: &ListSnapshot) -> String;
}

/// Renders the list as lines of text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    const EMPTY_TITLE: &'static str = "Your shopping list is empty";
    const EMPTY_HINT: &'static str = "Add items above to get started";
}

impl Renderer for TextRenderer {
    fn render(&self, snapshot: &ListSnapshot) -> String {
        if !snapshot.ready {
            return "Loading...\n".to_string();
        }

        let mut out = String::new();

        if snapshot.is_empty_view() {
            let _ = writeln!(out, "{}\n{}", Self::EMPTY_TITLE, Self::EMPTY_HINT);
        } else {
            for item in &snapshot.filtered_items {
                let mark = if item.completed { 'x' } else { ' ' };
                let _ = writeln!(out, "[{mark}] {}", item.text);
            }
        }

        if snapshot.show_footer() {
            let _ = write!(out, "-- {} | filter: {}", snapshot.items_left_label(), snapshot.filter);
            if snapshot.can_clear_completed() {
                let _ = write!(out, " | {} completed", snapshot.completed_count);
            }
            out.push('\n');
        }

        out
    }
}
