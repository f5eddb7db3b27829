//! Activity log for terminal generate runs.
//!
//! Every `timetable-dash generate` appends one JSON line to
//! `~/.timetable-dash/generate-log.jsonl`; `timetable-dash history` reads
//! it back and aggregates it.

pub mod logger;
pub mod reporter;
