//! # Cogload Core Library
//!
//! Core business logic for Cogload, a personal cognitive-budget manager
//! for a calendar: every scheduled event carries a computed mental-effort
//! cost, a daily budget caps acceptable load, and a greedy week optimizer
//! proposes how to redistribute movable events so no day overflows. All
//! operations are available through the standalone CLI binary.
//!
//! ## Architecture
//!
//! - **Cost Model**: pure per-event costing with a neighborhood surcharge
//!   for back-to-back scheduling
//! - **Week Optimizer**: deterministic slot-finding, day scoring, and a
//!   propose/apply protocol for redistributing movable events
//! - **Budget / Recovery**: daily and weekly budget reports plus recovery
//!   activity suggestions with candidate slots
//! - **Storage**: SQLite-backed event collection and TOML configuration
//!
//! ## Key Components
//!
//! - [`Event`]: the calendar event entity
//! - [`WeekOptimizer`]: proposal generation; [`apply_proposal`] commits
//! - [`EventStore`]: in-memory repository with a single-writer discipline
//! - [`EventsDb`] / [`AppConfig`]: persistence and configuration
//! - [`CalendarSource`]: seam for event producers

pub mod budget;
pub mod cost;
pub mod error;
pub mod event;
pub mod optimizer;
pub mod recovery;
pub mod sources;
pub mod storage;
pub mod store;

pub use budget::{BudgetStatus, Overdraft};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use event::{Event, EventCategory};
pub use optimizer::{
    apply_proposal, ChangeKind, OptimizerConfig, ScheduleChange, WeekOptimizationProposal,
    WeekOptimizer,
};
pub use recovery::{OptimizationSuggestion, RecoveryActivity, SuggestionKind, TimeSlot};
pub use sources::{CalendarSource, DemoCalendar};
pub use storage::{AppConfig, EventsDb};
pub use store::EventStore;
