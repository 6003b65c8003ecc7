use clap::{Parser, Subcommand};
use mapty_core::form::parse_number;
use mapty_core::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mapty")]
#[command(about = "Map-based running and cycling log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Current position as LAT,LNG (overrides [map] home)
    #[arg(long, global = true, allow_hyphen_values = true)]
    home: Option<Coords>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout at a map location
    Add {
        /// Location of the workout as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        at: Coords,

        /// Workout type (running, cycling)
        #[arg(long = "type", default_value = "running")]
        kind: WorkoutKind,

        /// Distance in km
        #[arg(long)]
        distance: String,

        /// Duration in minutes
        #[arg(long)]
        duration: String,

        /// Cadence in steps/min (running)
        #[arg(long, default_value = "")]
        cadence: String,

        /// Elevation gain in meters (cycling)
        #[arg(long, default_value = "")]
        elevation: String,
    },

    /// List logged workouts (default)
    List,

    /// Centre the map on a workout
    Show { id: WorkoutId },

    /// Change a workout; omitted fields keep their current value
    Edit {
        id: WorkoutId,

        /// Switch the workout type (running, cycling)
        #[arg(long = "type")]
        kind: Option<WorkoutKind>,

        #[arg(long)]
        distance: Option<String>,

        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        cadence: Option<String>,

        #[arg(long)]
        elevation: Option<String>,
    },

    /// Delete a workout
    Delete {
        id: WorkoutId,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Remove every saved workout
    Reset,

    /// Write all workouts to a CSV file
    Export { path: PathBuf },
}

fn main() -> Result<()> {
    // Unreadable saved data is not reported unless RUST_LOG asks for it
    mapty_core::logging::init_with_level("error");

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }
    if cli.home.is_some() {
        config.map.home = cli.home;
    }

    match cli.command.unwrap_or(Commands::List) {
        Commands::Add {
            at,
            kind,
            distance,
            duration,
            cadence,
            elevation,
        } => {
            let input = FormInput::parse(kind, &distance, &duration, &cadence, &elevation);
            cmd_add(config, at, input)
        }
        Commands::List => cmd_list(config),
        Commands::Show { id } => cmd_show(config, id),
        Commands::Edit {
            id,
            kind,
            distance,
            duration,
            cadence,
            elevation,
        } => cmd_edit(
            config,
            id,
            EditArgs {
                kind,
                distance,
                duration,
                cadence,
                elevation,
            },
        ),
        Commands::Delete { id, yes } => cmd_delete(config, id, yes),
        Commands::Reset => cmd_reset(config),
        Commands::Export { path } => cmd_export(config, &path),
    }
}

type TerminalApp = App<FileStore, TerminalView, TerminalMap>;

fn open_app(config: Config, echo: bool, assume_yes: bool) -> TerminalApp {
    let store = FileStore::new(config.data.data_dir.clone());
    let view = TerminalView { echo, assume_yes };
    App::start(store, view, TerminalMap { echo: false }, config)
}

fn cmd_add(config: Config, at: Coords, input: FormInput) -> Result<()> {
    // Without a configured position the map opens where the workout is
    let mut locator = FixedLocator(config.map.home.or(Some(at)));
    let mut app = open_app(config, false, false);
    app.load_map(&mut locator);
    app.view_mut().echo = true;
    app.map_mut().echo = true;

    app.map_click(at);
    app.toggle_kind(input.kind);
    if let SubmitOutcome::Created(id) = app.submit(&input)? {
        println!("\n✓ Workout logged ({})", id);
    }
    Ok(())
}

fn cmd_list(config: Config) -> Result<()> {
    let app = open_app(config, true, false);
    if app.workouts().is_empty() {
        println!("No workouts logged yet.");
    }
    Ok(())
}

fn cmd_show(config: Config, id: WorkoutId) -> Result<()> {
    let home = config.map.home;
    let mut app = open_app(config, false, false);
    let Some(workout) = app.find(&id).cloned() else {
        eprintln!("No workout with id {}", id);
        return Ok(());
    };

    let mut locator = FixedLocator(home.or(Some(workout.coords)));
    app.load_map(&mut locator);
    app.map_mut().echo = true;
    app.select(&id);
    app.view().print_entry(&render::entry(&workout));
    Ok(())
}

struct EditArgs {
    kind: Option<WorkoutKind>,
    distance: Option<String>,
    duration: Option<String>,
    cadence: Option<String>,
    elevation: Option<String>,
}

fn cmd_edit(config: Config, id: WorkoutId, args: EditArgs) -> Result<()> {
    let mut app = open_app(config, false, false);
    app.begin_edit(&id);
    if !matches!(app.mode(), FormMode::Editing { .. }) {
        eprintln!("No workout with id {}", id);
        return Ok(());
    }
    app.view_mut().echo = true;

    // Start from the pre-filled form and overwrite what was given
    let Some(current) = app.find(&id).map(FormInput::from) else {
        return Ok(());
    };
    let pick = |arg: &Option<String>, current: f64| {
        arg.as_deref().map(parse_number).unwrap_or(current)
    };
    let input = FormInput {
        kind: args.kind.unwrap_or(current.kind),
        distance: pick(&args.distance, current.distance),
        duration: pick(&args.duration, current.duration),
        cadence: pick(&args.cadence, current.cadence),
        elevation_gain: pick(&args.elevation, current.elevation_gain),
    };
    if let Some(kind) = args.kind {
        app.toggle_kind(kind);
    }

    if let SubmitOutcome::Updated(id) = app.submit(&input)? {
        println!("\n✓ Workout updated ({})", id);
    }
    Ok(())
}

fn cmd_delete(config: Config, id: WorkoutId, yes: bool) -> Result<()> {
    let mut app = open_app(config, false, yes);
    if app.find(&id).is_none() {
        eprintln!("No workout with id {}", id);
        return Ok(());
    }
    if app.delete(&id)? {
        println!("✓ Workout deleted ({})", id);
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

fn cmd_reset(config: Config) -> Result<()> {
    let mut app = open_app(config, false, true);
    let count = app.workouts().len();
    app.reset()?;
    println!("✓ Removed {} workouts", count);
    Ok(())
}

fn cmd_export(config: Config, path: &std::path::Path) -> Result<()> {
    let app = open_app(config, false, false);
    let count = export_csv(path, app.workouts())?;
    println!("✓ Exported {} workouts", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

/// Reports a fixed position, or fails when none is known
struct FixedLocator(Option<Coords>);

impl Geolocator for FixedLocator {
    fn current_position(&mut self) -> Result<Coords> {
        self.0.ok_or_else(|| {
            Error::Geolocation("no position known; pass --home or set [map] home".into())
        })
    }
}

/// Prints list entries to stdout and prompts on stdin
struct TerminalView {
    /// Print entries as they are rendered (off while loading saved data)
    echo: bool,
    assume_yes: bool,
}

impl TerminalView {
    fn print_entry(&self, entry: &ListEntry) {
        println!();
        println!("  {} {}", entry.kind.icon(), entry.title);
        println!("  id: {}", entry.id);
        let details: Vec<String> = entry
            .rows
            .iter()
            .map(|row| format!("{} {} {}", row.icon, row.value, row.unit))
            .collect();
        println!("  {}", details.join("   "));
    }
}

impl WorkoutView for TerminalView {
    fn render_entry(&mut self, entry: &ListEntry) {
        if self.echo {
            self.print_entry(entry);
        }
    }

    fn replace_entry(&mut self, entry: &ListEntry) {
        if self.echo {
            self.print_entry(entry);
        }
    }

    fn remove_entry(&mut self, id: &WorkoutId) {
        tracing::debug!("Removed entry {}", id);
    }

    fn clear_entries(&mut self) {
        tracing::debug!("Cleared workout list");
    }

    fn show_form(&mut self, prefill: &FormPrefill) {
        tracing::debug!("Form opened: {:?}", prefill);
    }

    fn hide_form(&mut self) {
        tracing::debug!("Form closed");
    }

    fn alert(&mut self, message: &str) {
        eprintln!("! {}", message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Describes map changes on stdout
struct TerminalMap {
    echo: bool,
}

impl MapView for TerminalMap {
    fn show_map(&mut self, center: Coords, zoom: u8) {
        tracing::debug!("Map centred on {} at zoom {}", center, zoom);
    }

    fn add_tile_layer(&mut self, url: &str, attribution: &str) {
        tracing::debug!("Tile layer {} ({})", url, attribution);
    }

    fn add_marker(&mut self, marker: &Marker) {
        if self.echo {
            println!("📍 [{}] {}", marker.coords, marker.popup);
        }
    }

    fn remove_marker(&mut self, workout_id: &WorkoutId) {
        tracing::debug!("Removed marker for {}", workout_id);
    }

    fn set_view(&mut self, center: Coords, zoom: u8, pan: &Pan) {
        if self.echo {
            println!(
                "📍 Map centred on {} (zoom {}, {:.1}s pan)",
                center,
                zoom,
                pan.duration.as_secs_f64()
            );
        }
    }
}
