//! Application controller.
//!
//! Owns the workout list and the form state, turns user actions into list
//! mutations and keeps three views in sync: map markers, the rendered list
//! and the storage slot. Every collaborator is injected as a trait so the
//! transitions can be driven without a real map or terminal.

use crate::form::{FormInput, FormPrefill, ValidationError};
use crate::render::{self, ListEntry, Marker};
use crate::storage::{self, KeyValueStore};
use crate::{Config, Coords, Result, Workout, WorkoutId, WorkoutKind};
use chrono::Utc;
use std::time::Duration;

pub const LOCATION_UNAVAILABLE: &str = "Could not get your location";
pub const NO_LOCATION_SELECTED: &str = "No location selected";
pub const INVALID_INPUT: &str = "Inputs have to be positive numbers";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this workout?";

/// Source of the user's current position
pub trait Geolocator {
    fn current_position(&mut self) -> Result<Coords>;
}

/// Animation used when recentring the map
#[derive(Clone, Debug, PartialEq)]
pub struct Pan {
    pub animate: bool,
    pub duration: Duration,
}

/// Map widget
pub trait MapView {
    fn show_map(&mut self, center: Coords, zoom: u8);
    fn add_tile_layer(&mut self, url: &str, attribution: &str);
    fn add_marker(&mut self, marker: &Marker);
    fn remove_marker(&mut self, workout_id: &WorkoutId);
    fn set_view(&mut self, center: Coords, zoom: u8, pan: &Pan);
}

/// Workout list, form and user prompts
pub trait WorkoutView {
    fn render_entry(&mut self, entry: &ListEntry);
    fn replace_entry(&mut self, entry: &ListEntry);
    fn remove_entry(&mut self, id: &WorkoutId);
    fn clear_entries(&mut self);
    fn show_form(&mut self, prefill: &FormPrefill);
    fn hide_form(&mut self);
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}

/// What the form is currently doing
#[derive(Clone, Debug, PartialEq)]
pub enum FormMode {
    Idle,
    /// A map location was picked and the form is open for a new workout
    Composing { coords: Coords },
    /// The form is pre-filled with an existing workout
    Editing { id: WorkoutId },
}

/// Result of submitting the form
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Created(WorkoutId),
    Updated(WorkoutId),
    /// Input refused; the form stays open with its contents
    Rejected(ValidationError),
    /// Nothing to submit against: no location picked, or the edit target is gone
    NoTarget,
}

pub struct App<S, V, M> {
    store: S,
    view: V,
    map: M,
    config: Config,
    workouts: Vec<Workout>,
    mode: FormMode,
    prefill: Option<FormPrefill>,
    map_ready: bool,
}

impl<S, V, M> App<S, V, M>
where
    S: KeyValueStore,
    V: WorkoutView,
    M: MapView,
{
    /// Load saved workouts and render them as list entries
    ///
    /// Markers wait until the map is loaded.
    pub fn start(store: S, view: V, map: M, config: Config) -> Self {
        let workouts = storage::load_workouts(&store, &config.data.storage_key);
        let mut app = Self {
            store,
            view,
            map,
            config,
            workouts,
            mode: FormMode::Idle,
            prefill: None,
            map_ready: false,
        };
        for workout in &app.workouts {
            app.view.render_entry(&render::entry(workout));
        }
        tracing::info!("Started with {} saved workouts", app.workouts.len());
        app
    }

    /// Centre the map on the current position and draw every marker
    ///
    /// Returns whether the map is ready. Without a position the user is
    /// told so and the map stays unavailable.
    pub fn load_map<G: Geolocator + ?Sized>(&mut self, geolocator: &mut G) -> bool {
        let position = match geolocator.current_position() {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!("Geolocation failed: {}", e);
                self.view.alert(LOCATION_UNAVAILABLE);
                return false;
            }
        };

        self.map.show_map(position, self.config.map.zoom);
        self.map
            .add_tile_layer(&self.config.map.tile_url, &self.config.map.attribution);
        for workout in &self.workouts {
            self.map.add_marker(&render::marker(workout));
        }
        self.map_ready = true;
        tracing::debug!("Map ready at {}", position);
        true
    }

    /// Pick a location for a new workout and open a blank form
    pub fn map_click(&mut self, coords: Coords) {
        if !self.map_ready {
            tracing::debug!("Ignoring map click at {} before the map is ready", coords);
            return;
        }
        self.mode = FormMode::Composing { coords };
        let prefill = FormPrefill::empty(WorkoutKind::Running);
        self.view.show_form(&prefill);
        self.prefill = Some(prefill);
    }

    /// Switch the visible type-specific field while the form is open
    pub fn toggle_kind(&mut self, kind: WorkoutKind) {
        if let Some(prefill) = self.prefill.take() {
            let prefill = prefill.with_kind(kind);
            self.view.show_form(&prefill);
            self.prefill = Some(prefill);
        }
    }

    /// Open the form pre-filled with an existing workout
    ///
    /// Unknown ids are ignored.
    pub fn begin_edit(&mut self, id: &WorkoutId) {
        let Some(workout) = self.find(id) else {
            tracing::debug!("Edit requested for unknown workout {}", id);
            return;
        };
        let prefill = FormPrefill::from(workout);
        self.view.show_form(&prefill);
        self.prefill = Some(prefill);
        self.mode = FormMode::Editing { id: id.clone() };
    }

    /// Close the form without saving
    pub fn cancel(&mut self) {
        self.close_form();
    }

    /// Create or update a workout from the form
    ///
    /// The new list is saved before anything else changes, so a failed
    /// write leaves the list, the views and the open form as they were.
    pub fn submit(&mut self, input: &FormInput) -> Result<SubmitOutcome> {
        if self.mode == FormMode::Idle {
            self.view.alert(NO_LOCATION_SELECTED);
            return Ok(SubmitOutcome::NoTarget);
        }

        let fields = match input.validate() {
            Ok(fields) => fields,
            Err(e) => {
                tracing::debug!("Rejected form input: {}", e);
                self.view.alert(INVALID_INPUT);
                return Ok(SubmitOutcome::Rejected(e));
            }
        };

        match self.mode.clone() {
            FormMode::Idle => Ok(SubmitOutcome::NoTarget),
            FormMode::Composing { coords } => {
                let workout = Workout::from_fields(Utc::now(), coords, &fields);
                let id = workout.id.clone();

                let mut next = self.workouts.clone();
                next.push(workout.clone());
                self.persist(&next)?;
                self.workouts = next;

                if self.map_ready {
                    self.map.add_marker(&render::marker(&workout));
                }
                self.view.render_entry(&render::entry(&workout));
                self.close_form();

                tracing::info!("Created {} workout {}", fields.detail.kind(), id);
                Ok(SubmitOutcome::Created(id))
            }
            FormMode::Editing { id } => {
                let Some(index) = self.position(&id) else {
                    tracing::debug!("Edit target {} no longer exists", id);
                    self.close_form();
                    return Ok(SubmitOutcome::NoTarget);
                };

                let mut next = self.workouts.clone();
                next[index].apply(&fields);
                self.persist(&next)?;
                self.workouts = next;

                let workout = &self.workouts[index];
                let (entry, marker) = (render::entry(workout), render::marker(workout));
                self.view.replace_entry(&entry);
                if self.map_ready {
                    self.map.remove_marker(&id);
                    self.map.add_marker(&marker);
                }
                self.close_form();

                tracing::info!("Updated workout {}", id);
                Ok(SubmitOutcome::Updated(id))
            }
        }
    }

    /// Delete a workout after the user confirms
    ///
    /// Returns whether anything was removed.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<bool> {
        let Some(index) = self.position(id) else {
            tracing::debug!("Delete requested for unknown workout {}", id);
            return Ok(false);
        };
        if !self.view.confirm(CONFIRM_DELETE) {
            return Ok(false);
        }

        let mut next = self.workouts.clone();
        next.remove(index);
        self.persist(&next)?;
        self.workouts = next;

        self.view.remove_entry(id);
        if self.map_ready {
            self.map.remove_marker(id);
        }
        if matches!(&self.mode, FormMode::Editing { id: editing } if editing == id) {
            self.close_form();
        }

        tracing::info!("Deleted workout {}", id);
        Ok(true)
    }

    /// Recentre the map on a workout
    pub fn select(&mut self, id: &WorkoutId) {
        if !self.map_ready {
            return;
        }
        let Some(workout) = self.find(id) else {
            return;
        };
        let pan = Pan {
            animate: true,
            duration: Duration::try_from_secs_f64(self.config.map.pan_duration_secs)
                .unwrap_or_default(),
        };
        let coords = workout.coords;
        self.map.set_view(coords, self.config.map.zoom, &pan);
    }

    /// Forget every workout, stored and rendered
    pub fn reset(&mut self) -> Result<()> {
        self.store.remove(&self.config.data.storage_key)?;
        if self.map_ready {
            for workout in &self.workouts {
                self.map.remove_marker(&workout.id);
            }
        }
        self.workouts.clear();
        self.view.clear_entries();
        self.close_form();
        tracing::info!("Cleared all saved workouts");
        Ok(())
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| &w.id == id)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn position(&self, id: &WorkoutId) -> Option<usize> {
        self.workouts.iter().position(|w| &w.id == id)
    }

    fn close_form(&mut self) {
        if self.prefill.take().is_some() {
            self.view.hide_form();
        }
        self.mode = FormMode::Idle;
    }

    fn persist(&mut self, workouts: &[Workout]) -> Result<()> {
        storage::save_workouts(&mut self.store, &self.config.data.storage_key, workouts)
    }
}
