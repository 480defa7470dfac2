//! HostelDesk core — the complaint lifecycle and analytics engine behind
//! a hostel maintenance portal.
//!
//! Students file complaints; administrators move them through a status
//! lifecycle and broadcast announcements. This crate owns the parts with
//! actual invariants: the transition rules, announcement visibility and
//! expiry, the merged activity feed, dashboard statistics, and the
//! staff/block leaderboards — plus the SQLite stores beneath them.
//!
//! LAYERING (strict, one direction):
//!   - `store`: the only module that speaks SQL.
//!   - `transition`, `feed`, `stats`, `leaderboard`, and the visibility
//!     functions in `announcement`: pure transforms over records.
//!   - `portal`: the facade wiring stores + engines into the operations
//!     a client calls; owns authorization and validation.
//!
//! Presentation, sessions, and routing live outside this crate; identity
//! arrives as an explicit [`actor::Actor`] value.

pub mod actor;
pub mod announcement;
pub mod clock;
pub mod complaint;
pub mod error;
pub mod feed;
pub mod leaderboard;
pub mod portal;
pub mod stats;
pub mod store;
pub mod transition;
pub mod types;
