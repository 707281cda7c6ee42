use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::core::context::{ModuleContext, RequestContext};
use crate::error::{Error, Result};

/// The audit events this plugin raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AttemptCreated,
    AttemptPrinted,
    AttemptViewed,
    RightAnswerPrinted,
    RightAnswerViewed,
    ResponsesSubmitted,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::AttemptCreated,
        EventKind::AttemptPrinted,
        EventKind::AttemptViewed,
        EventKind::RightAnswerPrinted,
        EventKind::RightAnswerViewed,
        EventKind::ResponsesSubmitted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::AttemptCreated => "attempt_created",
            EventKind::AttemptPrinted => "attempt_printed",
            EventKind::AttemptViewed => "attempt_viewed",
            EventKind::RightAnswerPrinted => "right_answer_printed",
            EventKind::RightAnswerViewed => "right_answer_viewed",
            EventKind::ResponsesSubmitted => "responses_submitted",
        }
    }

    /// Fully qualified name under which the host registers the event.
    pub fn event_name(self) -> &'static str {
        match self {
            EventKind::AttemptCreated => "\\quiz_answersheets\\event\\attempt_created",
            EventKind::AttemptPrinted => "\\quiz_answersheets\\event\\attempt_printed",
            EventKind::AttemptViewed => "\\quiz_answersheets\\event\\attempt_viewed",
            EventKind::RightAnswerPrinted => "\\quiz_answersheets\\event\\right_answer_printed",
            EventKind::RightAnswerViewed => "\\quiz_answersheets\\event\\right_answer_viewed",
            EventKind::ResponsesSubmitted => "\\quiz_answersheets\\event\\responses_submitted",
        }
    }

    /// Key of the human readable event name in the plugin strings.
    pub fn description_key(self) -> &'static str {
        match self {
            EventKind::AttemptCreated => "event_attempt_created",
            EventKind::AttemptPrinted => "event_attempt_printed",
            EventKind::AttemptViewed => "event_attempt_viewed",
            EventKind::RightAnswerPrinted => "event_right_answer_printed",
            EventKind::RightAnswerViewed => "event_right_answer_viewed",
            EventKind::ResponsesSubmitted => "event_responses_submitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOther {
    pub quizid: i64,
    pub attemptid: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub relateduserid: i64,
    pub courseid: i64,
    pub context: ModuleContext,
    pub other: EventOther,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    /// The viewer who caused the event.
    pub userid: i64,
    pub record: EventRecord,
}

/// The host's event bus. Delivery is synchronous and never retried here.
pub trait EventSink: Send + Sync {
    fn dispatch(&self, event: &Event) -> anyhow::Result<()>;
}

/// Writes every event to the structured log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn dispatch(&self, event: &Event) -> anyhow::Result<()> {
        tracing::info!(
            event = event.kind.event_name(),
            userid = event.userid,
            relateduserid = event.record.relateduserid,
            courseid = event.record.courseid,
            contextid = event.record.context.id,
            quizid = event.record.other.quizid,
            attemptid = event.record.other.attemptid,
            "Answer sheet event"
        );
        Ok(())
    }
}

/// Buffers events in memory, e.g. to flush them after the request commits.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<Event>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Event> {
        let mut guard = self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *guard)
    }
}

impl EventSink for MemoryEventSink {
    fn dispatch(&self, event: &Event) -> anyhow::Result<()> {
        let mut guard = self.events.lock().map_err(|_| anyhow::anyhow!("event buffer poisoned"))?;
        guard.push(event.clone());
        Ok(())
    }
}

pub fn build_event(
    kind: EventKind,
    viewer_id: i64,
    attempt_id: i64,
    user_id: i64,
    course_id: i64,
    module_context: &ModuleContext,
    quiz_id: i64,
) -> Event {
    Event {
        kind,
        userid: viewer_id,
        record: EventRecord {
            relateduserid: user_id,
            courseid: course_id,
            context: *module_context,
            other: EventOther { quizid: quiz_id, attemptid: attempt_id },
        },
    }
}

/// Raises `kind` for an attempt owned by `user_id`. Sink failures reach the
/// caller unchanged.
pub fn emit_event(
    ctx: &RequestContext<'_>,
    kind: EventKind,
    attempt_id: i64,
    user_id: i64,
    course_id: i64,
    module_context: &ModuleContext,
    quiz_id: i64,
) -> Result<()> {
    let event =
        build_event(kind, ctx.viewer().id, attempt_id, user_id, course_id, module_context, quiz_id);

    ctx.events().dispatch(&event).map_err(|source| {
        tracing::error!(event = kind.event_name(), error = %source, "Event dispatch failed");
        Error::EventDispatch { event: kind.as_str(), source }
    })?;

    metrics::counter!("answersheet_events_total", "kind" => kind.as_str()).increment(1);
    Ok(())
}
