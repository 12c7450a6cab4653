//! Display items: the grouping transform over the event history
//!
//! Consecutive `WorkflowTask` bookkeeping events collapse into one collapsible
//! group row; every other event stands alone. The transform is pure and is
//! computed once from the static log, not per frame.

use crate::workflow::{EventCategory, EventHistory};
use serde::Serialize;

/// One row as shown to the viewer: a single event, or a collapsed run of
/// consecutive `WorkflowTask` events.
///
/// Invariants: display items partition the event log in original order, every
/// event belongs to exactly one item, group runs are maximal, and a group only
/// ever contains `WorkflowTask` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DisplayItem {
    #[serde(rename_all = "camelCase")]
    Single { event_index: usize },
    #[serde(rename_all = "camelCase")]
    Group {
        event_indices: Vec<usize>,
        label: String,
    },
}

impl DisplayItem {
    /// Event indices covered by this item, in original order
    pub fn event_indices(&self) -> Vec<usize> {
        match self {
            Self::Single { event_index } => vec![*event_index],
            Self::Group { event_indices, .. } => event_indices.clone(),
        }
    }

    /// Index of the last event covered by this item
    pub fn last_event_index(&self) -> usize {
        match self {
            Self::Single { event_index } => *event_index,
            Self::Group { event_indices, .. } => *event_indices.last().expect("group is non-empty"),
        }
    }

    /// Number of events covered by this item
    pub fn event_count(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Group { event_indices, .. } => event_indices.len(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }
}

/// Fold the history into display items.
///
/// Scans left to right; a maximal contiguous run of `WorkflowTask` events
/// becomes one `Group` (a run of length 1 included), anything else becomes a
/// `Single`. Group labels join the first and last event-name suffixes, with
/// `"Scheduled → <last>"` when the two suffixes coincide.
pub fn build_display_items(history: &EventHistory) -> Vec<DisplayItem> {
    let events = history.events();
    let mut items = Vec::new();
    let mut i = 0;

    while i < events.len() {
        if events[i].category == EventCategory::WorkflowTask {
            let start = i;
            while i < events.len() && events[i].category == EventCategory::WorkflowTask {
                i += 1;
            }
            let event_indices: Vec<usize> = (start..i).collect();
            let first = events[start]
                .name
                .workflow_task_suffix()
                .expect("run contains only WorkflowTask events");
            let last = events[i - 1]
                .name
                .workflow_task_suffix()
                .expect("run contains only WorkflowTask events");
            let label = if first == last {
                format!("Scheduled \u{2192} {last}")
            } else {
                format!("{first} \u{2192} {last}")
            };
            items.push(DisplayItem::Group {
                event_indices,
                label,
            });
        } else {
            items.push(DisplayItem::Single { event_index: i });
            i += 1;
        }
    }

    items
}
