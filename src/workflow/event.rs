//! Event types for the recorded workflow execution
//!
//! The history is authored once at build time and never mutated: one linear,
//! non-branching checkout execution of 23 events. Identity, names, activities,
//! and display timestamps are fixed.

use serde::Serialize;

/// Coarse category of a history event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventCategory {
    Workflow,
    WorkflowTask,
    Activity,
}

/// Named unit of work referenced by activity events and source lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Activity {
    ChargeCard,
    ReserveInventory,
    ShipOrder,
}

impl Activity {
    /// The camelCase identifier used in source listings and event rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChargeCard => "chargeCard",
            Self::ReserveInventory => "reserveInventory",
            Self::ShipOrder => "shipOrder",
        }
    }
}

/// Closed vocabulary of event-type names in the recorded history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventName {
    WorkflowExecutionStarted,
    WorkflowTaskScheduled,
    WorkflowTaskStarted,
    WorkflowTaskCompleted,
    ActivityTaskScheduled,
    ActivityTaskStarted,
    ActivityTaskCompleted,
    WorkflowExecutionCompleted,
}

impl EventName {
    /// String representation matching the server-side event names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkflowExecutionStarted => "WorkflowExecutionStarted",
            Self::WorkflowTaskScheduled => "WorkflowTaskScheduled",
            Self::WorkflowTaskStarted => "WorkflowTaskStarted",
            Self::WorkflowTaskCompleted => "WorkflowTaskCompleted",
            Self::ActivityTaskScheduled => "ActivityTaskScheduled",
            Self::ActivityTaskStarted => "ActivityTaskStarted",
            Self::ActivityTaskCompleted => "ActivityTaskCompleted",
            Self::WorkflowExecutionCompleted => "WorkflowExecutionCompleted",
        }
    }

    /// Category this event name belongs to
    pub fn category(&self) -> EventCategory {
        match self {
            Self::WorkflowExecutionStarted | Self::WorkflowExecutionCompleted => {
                EventCategory::Workflow
            }
            Self::WorkflowTaskScheduled
            | Self::WorkflowTaskStarted
            | Self::WorkflowTaskCompleted => EventCategory::WorkflowTask,
            Self::ActivityTaskScheduled
            | Self::ActivityTaskStarted
            | Self::ActivityTaskCompleted => EventCategory::Activity,
        }
    }

    /// Short suffix after the `WorkflowTask` prefix, used for group labels.
    /// Returns `None` for events outside the `WorkflowTask` category.
    pub fn workflow_task_suffix(&self) -> Option<&'static str> {
        match self {
            Self::WorkflowTaskScheduled => Some("Scheduled"),
            Self::WorkflowTaskStarted => Some("Started"),
            Self::WorkflowTaskCompleted => Some("Completed"),
            _ => None,
        }
    }
}

/// One immutable record in the execution history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEvent {
    /// Small ascending identity assigned at authoring time, never regenerated
    pub id: u32,
    pub name: EventName,
    /// Present only for activity-related events
    pub activity: Option<Activity>,
    pub category: EventCategory,
    /// Fixed display timestamp
    pub timestamp: &'static str,
}

impl HistoryEvent {
    /// Create an event with no associated activity
    pub fn new(id: u32, name: EventName, timestamp: &'static str) -> Self {
        Self {
            id,
            name,
            activity: None,
            category: name.category(),
            timestamp,
        }
    }

    /// Create an activity-related event
    pub fn with_activity(
        id: u32,
        name: EventName,
        activity: Activity,
        timestamp: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            activity: Some(activity),
            category: name.category(),
            timestamp,
        }
    }
}

/// Ordered, immutable sequence of events for one workflow execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventHistory {
    events: Vec<HistoryEvent>,
}

impl EventHistory {
    /// Wrap an authored event sequence
    pub fn new(events: Vec<HistoryEvent>) -> Self {
        Self { events }
    }

    /// The reference scenario: one checkout workflow execution, 23 events,
    /// three activities, recorded timestamps.
    pub fn checkout() -> Self {
        use Activity::*;
        use EventName::*;

        Self::new(vec![
            HistoryEvent::new(1, WorkflowExecutionStarted, "00:00:00.000"),
            HistoryEvent::new(2, WorkflowTaskScheduled, "00:00:00.001"),
            HistoryEvent::new(3, WorkflowTaskStarted, "00:00:00.012"),
            HistoryEvent::new(4, WorkflowTaskCompleted, "00:00:00.014"),
            HistoryEvent::with_activity(5, ActivityTaskScheduled, ChargeCard, "00:00:00.015"),
            HistoryEvent::with_activity(6, ActivityTaskStarted, ChargeCard, "00:00:00.045"),
            HistoryEvent::with_activity(7, ActivityTaskCompleted, ChargeCard, "00:00:00.892"),
            HistoryEvent::new(8, WorkflowTaskScheduled, "00:00:00.893"),
            HistoryEvent::new(9, WorkflowTaskStarted, "00:00:00.901"),
            HistoryEvent::new(10, WorkflowTaskCompleted, "00:00:00.904"),
            HistoryEvent::with_activity(
                11,
                ActivityTaskScheduled,
                ReserveInventory,
                "00:00:00.905",
            ),
            HistoryEvent::with_activity(12, ActivityTaskStarted, ReserveInventory, "00:00:00.932"),
            HistoryEvent::with_activity(
                13,
                ActivityTaskCompleted,
                ReserveInventory,
                "00:00:01.156",
            ),
            HistoryEvent::new(14, WorkflowTaskScheduled, "00:00:01.157"),
            HistoryEvent::new(15, WorkflowTaskStarted, "00:00:01.165"),
            HistoryEvent::new(16, WorkflowTaskCompleted, "00:00:01.167"),
            HistoryEvent::with_activity(17, ActivityTaskScheduled, ShipOrder, "00:00:01.168"),
            HistoryEvent::with_activity(18, ActivityTaskStarted, ShipOrder, "00:00:01.201"),
            HistoryEvent::with_activity(19, ActivityTaskCompleted, ShipOrder, "00:00:02.445"),
            HistoryEvent::new(20, WorkflowTaskScheduled, "00:00:02.446"),
            HistoryEvent::new(21, WorkflowTaskStarted, "00:00:02.447"),
            HistoryEvent::new(22, WorkflowTaskCompleted, "00:00:02.448"),
            HistoryEvent::new(23, WorkflowExecutionCompleted, "00:00:02.449"),
        ])
    }

    /// All events in original order
    pub fn events(&self) -> &[HistoryEvent] {
        &self.events
    }

    /// Event at the given index
    pub fn get(&self, index: usize) -> Option<&HistoryEvent> {
        self.events.get(index)
    }

    /// Number of events in the history
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
