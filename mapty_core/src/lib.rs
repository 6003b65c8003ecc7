#![forbid(unsafe_code)]

//! Core domain model and application logic for Mapty.
//!
//! This crate provides:
//! - Domain types (coordinates, running and cycling workouts)
//! - Derived metrics (pace, speed, description)
//! - Form validation and rendering of markers and list entries
//! - Persistence of the workout list in a key-value slot
//! - The application controller driving map, list and storage

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod workout;
pub mod form;
pub mod render;
pub mod storage;
pub mod controller;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use workout::describe;
pub use form::{FormInput, FormPrefill, ValidationError};
pub use render::{DetailRow, ListEntry, Marker};
pub use storage::{load_workouts, save_workouts, FileStore, KeyValueStore, MemoryStore, STORAGE_KEY};
pub use controller::{App, FormMode, Geolocator, MapView, Pan, SubmitOutcome, WorkoutView};
pub use export::export_csv;
