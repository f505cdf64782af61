use clap::{Parser, Subcommand};
use recomp_core::export::{export_weigh_ins_csv, export_workouts_csv, update_data_file};
use recomp_core::top25::{is_logged, logged_exercises, BodyPart, Tier, Top25Sort};
use recomp_core::goals::{effective_current, GoalsProgress};
use recomp_core::load::{compare_periods, VolumeDirection};
use recomp_core::metrics::{lean_mass, period_deltas, CompositionTrend};
use recomp_core::*;
use std::path::{Path, PathBuf};

const DATA_FILE: &str = "recomp.json";
const PREFERENCES_FILE: &str = "goal_preferences.json";

#[derive(Parser)]
#[command(name = "recomp")]
#[command(about = "Body recomposition training dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Period overview (default)
    Summary {
        /// Period token: "all" or YYYY-MM
        #[arg(long)]
        period: Option<String>,
    },

    /// Per-muscle load analysis
    Load {
        #[arg(long)]
        period: Option<String>,
    },

    /// Compare muscle load between two periods
    Compare { a: String, b: String },

    /// Weigh-ins and body composition deltas
    Metrics {
        #[arg(long)]
        period: Option<String>,
    },

    /// Strength goals with progress
    Goals {
        /// Only show one muscle group
        #[arg(long)]
        group: Option<String>,

        /// Include hidden goals
        #[arg(long)]
        all: bool,
    },

    /// Manage the workout log
    #[command(subcommand)]
    Workout(WorkoutCommand),

    /// Manage weigh-ins
    #[command(subcommand)]
    WeighIn(WeighInCommand),

    /// Manage the goal progress log
    #[command(subcommand)]
    Progress(ProgressCommand),

    /// Manage selectable periods
    #[command(subcommand)]
    Period(PeriodCommand),

    /// Goal display preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Top-25 hypertrophy exercises
    Top25 {
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        /// S, A or B
        #[arg(long)]
        tier: Option<String>,

        /// Body part, e.g. legs
        #[arg(long)]
        part: Option<String>,

        /// Sort by body part instead of rank
        #[arg(long)]
        by_part: bool,
    },

    /// Export all data as JSON (and optionally CSV)
    Export {
        /// Output file; defaults to the configured export file name
        output: Option<PathBuf>,

        /// Print the JSON to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Also write workouts.csv and weigh_ins.csv into this directory
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Import a JSON export, replacing the collections it contains
    Import { input: PathBuf },

    /// Discard all edits and restore the seed data
    Reset,
}

#[derive(Subcommand)]
enum WorkoutCommand {
    List {
        #[arg(long)]
        period: Option<String>,
    },
    Add {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Category, e.g. "Upper Body", "Pilates", "Cardio"
        #[arg(long = "type")]
        kind: String,

        /// Muscle intensity as key=level (level 1-3), repeatable
        #[arg(long, value_parser = parse_intensity)]
        intensity: Vec<(String, i32)>,

        /// Display-only muscle names, repeatable
        #[arg(long)]
        muscle: Vec<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum WeighInCommand {
    List {
        #[arg(long)]
        period: Option<String>,
    },
    Add {
        #[arg(long)]
        date: String,
        #[arg(long)]
        weight: f64,
        /// Body-fat percentage
        #[arg(long)]
        bf: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
    Edit {
        /// Date of the weigh-in to change
        original_date: String,
        /// Move the weigh-in to another date
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        bf: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
    Delete { date: String },
}

#[derive(Subcommand)]
enum ProgressCommand {
    List,
    /// Log a new current value for an exercise
    Add { exercise: String, value: String },
    /// Delete by the index shown in `progress list`
    Delete { index: usize },
}

#[derive(Subcommand)]
enum PeriodCommand {
    List,
    /// Register a YYYY-MM month
    Add {
        key: String,
        #[arg(long)]
        label: Option<String>,
    },
}

#[derive(Subcommand)]
enum PrefsCommand {
    Hide { group: String, exercise: String },
    Up { group: String, exercise: String },
    Down { group: String, exercise: String },
    /// Toggle the achieved tick
    Achieve { group: String, exercise: String },
    /// Override the displayed target
    Target { exercise: String, value: String },
    /// Undo hiding, reordering and target overrides for a group
    Restore { group: String },
    /// Move a muscle up in the load table
    LoadUp { muscle: String },
    /// Move a muscle down in the load table
    LoadDown { muscle: String },
    /// Restore the default load table order
    LoadRestore,
    Show,
}

fn parse_intensity(s: &str) -> std::result::Result<(String, i32), String> {
    let (key, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=level, got {:?}", s))?;
    let level: i32 = level
        .trim()
        .parse()
        .map_err(|_| format!("level must be a number, got {:?}", level))?;
    if !(1..=3).contains(&level) {
        return Err(format!("level must be 1, 2 or 3, got {}", level));
    }
    Ok((key.trim().to_lowercase(), level))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    recomp_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let data_path = data_dir.join(DATA_FILE);
    tracing::debug!("Using data file {:?}", data_path);
    let default_period = config.display.default_period.clone();
    let period_or_default = |p: Option<String>| p.unwrap_or_else(|| default_period.clone());

    match cli.command {
        Some(Commands::Summary { period }) => cmd_summary(&data_path, &period_or_default(period)),
        Some(Commands::Load { period }) => cmd_load(&data_dir, &period_or_default(period)),
        Some(Commands::Compare { a, b }) => cmd_compare(&data_path, &a, &b),
        Some(Commands::Metrics { period }) => cmd_metrics(&data_path, &period_or_default(period)),
        Some(Commands::Goals { group, all }) => cmd_goals(&data_dir, group.as_deref(), all),
        Some(Commands::Workout(cmd)) => cmd_workout(&data_path, cmd, &default_period),
        Some(Commands::WeighIn(cmd)) => cmd_weigh_in(&data_path, cmd, &default_period),
        Some(Commands::Progress(cmd)) => cmd_progress(&data_path, cmd),
        Some(Commands::Period(cmd)) => cmd_period(&data_path, cmd),
        Some(Commands::Prefs(cmd)) => cmd_prefs(&data_dir, cmd),
        Some(Commands::Top25 {
            search,
            tier,
            part,
            by_part,
        }) => cmd_top25(&data_path, search, tier, part, by_part),
        Some(Commands::Export { output, stdout, csv }) => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
            cmd_export(&data_path, (!stdout).then_some(output), csv)
        }
        Some(Commands::Import { input }) => cmd_import(&data_path, &input),
        Some(Commands::Reset) => cmd_reset(&data_path),
        None => cmd_summary(&data_path, &default_period),
    }
}

fn check_period(period: &str) -> Result<()> {
    if period::is_valid_period_token(period) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Period must be \"all\" or YYYY-MM, got {:?}",
            period
        )))
    }
}

fn fmt_opt(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}{}", v, unit))
}

fn fmt_delta(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:+.1}{}", v, unit))
}

fn cmd_summary(data_path: &Path, period: &str) -> Result<()> {
    check_period(period)?;
    let store = load_data_file(data_path)?;
    let summary = PeriodSummary::build(&store, period);

    println!("\n{} ({})", summary.label, summary.period);
    println!("─────────────────────────────────────────");
    println!(
        "  Workouts: {} ({} strength, {} cardio, {} pilates)",
        summary.mix.total, summary.mix.strength, summary.mix.cardio, summary.mix.pilates
    );
    println!("  Total load: {}", summary.total_load);
    if let Some(delta) = summary.trend.volume_delta {
        let word = match summary.trend.direction {
            Some(VolumeDirection::Increasing) => "up",
            Some(VolumeDirection::Decreasing) => "down",
            _ => "flat",
        };
        println!("  Volume vs previous month: {:+} ({})", delta, word);
    }
    if !summary.focus.top.is_empty() {
        println!("  Focus: {}", summary.focus.top.join(", "));
        println!("  Lagging: {}", summary.focus.low.join(", "));
    }
    let (least, points) = summary.trend.least_trained;
    println!("  Least trained: {} ({} pts)", least, points);
    if let Some((muscle, gain)) = &summary.trend.focus_shift {
        println!("  Focus shift: {} (+{})", muscle, gain);
    }

    println!();
    println!(
        "  Weight: {} ({})",
        fmt_opt(summary.deltas.last_weight, "kg"),
        fmt_delta(summary.deltas.weight, "kg")
    );
    println!(
        "  Body fat: {} ({})",
        fmt_opt(summary.deltas.last_bf, "%"),
        fmt_delta(summary.deltas.bf, "%")
    );
    println!(
        "  Lean mass: {} ({})",
        fmt_opt(summary.deltas.last_lean, "kg"),
        fmt_delta(summary.deltas.lean, "kg")
    );
    if let Some(trend) = summary.composition {
        println!("  Trend: {}", trend);
    }

    println!();
    print_goals_progress(&summary.goals);
    println!();
    Ok(())
}

fn print_goals_progress(progress: &GoalsProgress) {
    println!(
        "  Goals: {}/{} achieved ({}%), {} in progress",
        progress.achieved, progress.total, progress.pct, progress.in_progress
    );
}

fn parse_muscle(name: &str) -> Result<Muscle> {
    Muscle::from_name(&load::title_case(&name.trim().to_lowercase()))
        .ok_or_else(|| Error::NotFound(format!("muscle {}", name)))
}

fn cmd_load(data_dir: &Path, period: &str) -> Result<()> {
    check_period(period)?;
    let store = load_data_file(&data_dir.join(DATA_FILE))?;
    let order = open_preferences(data_dir)?.prefs().load_order();
    let workouts = store.workouts_in(period);
    let analysis = get_muscle_analysis(&workouts);

    println!(
        "{:<10} {:>6} {:>8} {:>4} {:>4} {:>4}  {}",
        "Muscle", "Points", "Sessions", "I3", "I2", "I1", "Level"
    );
    for muscle in order {
        let Some(load) = analysis.get(&muscle) else {
            continue;
        };
        println!(
            "{:<10} {:>6} {:>8} {:>4} {:>4} {:>4}  {}",
            muscle,
            load.points,
            load.sessions,
            load.i3.len(),
            load.i2.len(),
            load.i1.len(),
            load.level()
        );
    }
    Ok(())
}

fn cmd_compare(data_path: &Path, a: &str, b: &str) -> Result<()> {
    check_period(a)?;
    check_period(b)?;
    let store = load_data_file(data_path)?;
    let rows = compare_periods(&store.workouts, a, b);
    if rows.is_empty() {
        println!("No load recorded in either period.");
        return Ok(());
    }

    println!(
        "{:<10} {:>10} {:>10} {:>6}",
        "Muscle",
        store.periods.display_label(a),
        store.periods.display_label(b),
        "Delta"
    );
    for row in rows {
        println!("{:<10} {:>10} {:>10} {:>+6}", row.muscle, row.a, row.b, row.delta());
    }
    Ok(())
}

fn cmd_metrics(data_path: &Path, period: &str) -> Result<()> {
    check_period(period)?;
    let store = load_data_file(data_path)?;
    let metrics = store.metrics_in(period);
    print_weigh_ins(&metrics);

    let deltas = period_deltas(&metrics);
    println!();
    println!(
        "Change: weight {}, body fat {}, lean {}",
        fmt_delta(deltas.weight, "kg"),
        fmt_delta(deltas.bf, "%"),
        fmt_delta(deltas.lean, "kg")
    );
    if let Some(weight) = deltas.weight {
        let trend = CompositionTrend::classify(weight, deltas.bf.unwrap_or(0.0));
        println!("Trend: {}", trend);
    }
    Ok(())
}

fn print_weigh_ins(metrics: &[WeighIn]) {
    if metrics.is_empty() {
        println!("No weigh-ins.");
        return;
    }
    println!("{:<12} {:>8} {:>6} {:>8}  {}", "Date", "Weight", "BF", "Lean", "Note");
    for m in metrics {
        println!(
            "{:<12} {:>8} {:>6} {:>8}  {}",
            m.date,
            fmt_opt(Some(m.weight), ""),
            fmt_opt(m.bf, ""),
            fmt_opt(m.bf.map(|bf| lean_mass(m.weight, bf)), ""),
            m.note.as_deref().unwrap_or("")
        );
    }
}

fn open_preferences(data_dir: &Path) -> Result<PreferencesSession<JsonFilePreferences>> {
    PreferencesSession::open(JsonFilePreferences::new(data_dir.join(PREFERENCES_FILE)))
}

fn cmd_goals(data_dir: &Path, group: Option<&str>, include_hidden: bool) -> Result<()> {
    let store = load_data_file(&data_dir.join(DATA_FILE))?;
    let session = open_preferences(data_dir)?;
    let prefs = session.prefs();

    let groups: Vec<&str> = match group {
        Some(g) if !store.goals.contains_key(g) => {
            return Err(Error::NotFound(format!("goal group {}", g)));
        }
        Some(g) => vec![g],
        None => GOAL_GROUPS
            .iter()
            .copied()
            .filter(|g| store.goals.contains_key(*g))
            .collect(),
    };

    for group in groups {
        let goals = &store.goals[group];
        let shown: Vec<&Goal> = if include_hidden {
            prefs.ordered_goals(group, goals)
        } else {
            prefs.displayed_goals(group, goals)
        };

        println!("\n{}", load::title_case(group));
        for goal in shown {
            let current = effective_current(goal, &store.progress);
            let target = prefs.target_for(&goal.exercise).unwrap_or(&goal.target);
            let tick = if prefs.is_achieved(group, &goal.exercise) { "✓" } else { " " };
            println!(
                "  [{}] {:<32} {:<22} → {:<22} {}",
                tick,
                goal.exercise,
                current,
                target,
                classify_goal(current, target)
            );
        }
    }

    println!();
    print_goals_progress(&compute_goals_progress(&store.goals));
    Ok(())
}

fn cmd_workout(data_path: &Path, cmd: WorkoutCommand, default_period: &str) -> Result<()> {
    match cmd {
        WorkoutCommand::List { period } => {
            let period = period.as_deref().unwrap_or(default_period);
            check_period(period)?;
            let store = load_data_file(data_path)?;
            let workouts = store.workouts_in(period);
            if workouts.is_empty() {
                println!("No workouts.");
            }
            for w in workouts {
                let intensity = w
                    .intensity
                    .iter()
                    .flatten()
                    .map(|(k, v)| format!("{}:{}", k, v))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{:>4}  {}  {:<14} {}", w.id, w.date, w.kind, intensity);
            }
            Ok(())
        }
        WorkoutCommand::Add {
            date,
            kind,
            intensity,
            muscle,
            notes,
        } => {
            let id = update_data_file(data_path, |store| {
                let id = store.next_workout_id();
                let mut workout = Workout::new(id, date, kind);
                if !intensity.is_empty() {
                    workout = workout.with_intensity(intensity);
                }
                workout.muscles = muscle;
                workout.notes = notes;
                store.add_workout(workout)?;
                Ok(id)
            })?;
            println!("✓ Workout {} added", id);
            Ok(())
        }
        WorkoutCommand::Delete { id } => {
            let removed = update_data_file(data_path, |store| store.delete_workout(id))?;
            println!("✓ Deleted workout {} ({} {})", removed.id, removed.date, removed.kind);
            Ok(())
        }
    }
}

fn cmd_weigh_in(data_path: &Path, cmd: WeighInCommand, default_period: &str) -> Result<()> {
    match cmd {
        WeighInCommand::List { period } => {
            let period = period.as_deref().unwrap_or(default_period);
            check_period(period)?;
            let store = load_data_file(data_path)?;
            print_weigh_ins(&store.metrics_in(period));
            Ok(())
        }
        WeighInCommand::Add {
            date,
            weight,
            bf,
            note,
        } => {
            let mut record = WeighIn::new(date, weight, bf);
            record.note = Some(note.unwrap_or_else(|| "Manual Entry".to_string()));
            let date = record.date.clone();
            update_data_file(data_path, |store| store.add_weigh_in(record))?;
            println!("✓ Weigh-in for {} added", date);
            Ok(())
        }
        WeighInCommand::Edit {
            original_date,
            date,
            weight,
            bf,
            note,
        } => {
            update_data_file(data_path, |store| {
                let existing = store
                    .weigh_ins
                    .iter()
                    .find(|m| m.date == original_date)
                    .cloned()
                    .ok_or_else(|| Error::NotFound(format!("weigh-in on {}", original_date)))?;
                let updated = WeighIn {
                    date: date.unwrap_or(existing.date),
                    weight: weight.unwrap_or(existing.weight),
                    bf: bf.or(existing.bf),
                    note: note.or(existing.note),
                };
                store.edit_weigh_in(&original_date, updated)
            })?;
            println!("✓ Weigh-in for {} updated", original_date);
            Ok(())
        }
        WeighInCommand::Delete { date } => {
            update_data_file(data_path, |store| store.delete_weigh_in(&date))?;
            println!("✓ Weigh-in for {} deleted", date);
            Ok(())
        }
    }
}

fn cmd_progress(data_path: &Path, cmd: ProgressCommand) -> Result<()> {
    match cmd {
        ProgressCommand::List => {
            let store = load_data_file(data_path)?;
            if store.progress.is_empty() {
                println!("No progress logged.");
            }
            for (index, p) in store.progress.iter().enumerate() {
                println!(
                    "{:>3}  {}  {:<32} {}",
                    index,
                    p.date.format("%Y-%m-%d %H:%M"),
                    p.exercise,
                    p.value
                );
            }
            Ok(())
        }
        ProgressCommand::Add { exercise, value } => {
            let now = chrono::Utc::now();
            update_data_file(data_path, |store| store.record_progress(&exercise, &value, now))?;
            println!("✓ Logged {} for {}", value.trim(), exercise.trim());
            Ok(())
        }
        ProgressCommand::Delete { index } => {
            let removed = update_data_file(data_path, |store| store.delete_progress(index))?;
            println!("✓ Deleted {} entry ({})", removed.exercise, removed.value);
            Ok(())
        }
    }
}

fn cmd_period(data_path: &Path, cmd: PeriodCommand) -> Result<()> {
    match cmd {
        PeriodCommand::List => {
            let store = load_data_file(data_path)?;
            for (key, label) in store.periods.iter() {
                println!("{:<8} {}", key, label);
            }
            Ok(())
        }
        PeriodCommand::Add { key, label } => {
            update_data_file(data_path, |store| store.add_period(&key, label.as_deref()))?;
            println!("✓ Period {} added", key);
            Ok(())
        }
    }
}

fn cmd_prefs(data_dir: &Path, cmd: PrefsCommand) -> Result<()> {
    let store = load_data_file(&data_dir.join(DATA_FILE))?;
    let mut session = open_preferences(data_dir)?;

    let group_goals = |group: &str| -> Result<Vec<Goal>> {
        store
            .goals
            .get(group)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("goal group {}", group)))
    };

    match cmd {
        PrefsCommand::Show => {
            let prefs = session.prefs();
            for (group, names) in &prefs.hidden {
                println!("hidden   {:<10} {}", group, names.join(", "));
            }
            for (group, names) in &prefs.order {
                println!("order    {:<10} {}", group, names.join(", "));
            }
            for (group, names) in &prefs.achieved {
                println!("achieved {:<10} {}", group, names.join(", "));
            }
            for (exercise, target) in &prefs.targets {
                println!("target   {:<32} {}", exercise, target);
            }
            let load_order: Vec<&str> = prefs.load_order().iter().map(|m| m.name()).collect();
            println!("load     {}", load_order.join(", "));
        }
        PrefsCommand::Hide { group, exercise } => {
            group_goals(&group)?;
            session.prefs_mut().hide(&group, &exercise);
        }
        PrefsCommand::Up { group, exercise } => {
            let goals = group_goals(&group)?;
            if !session.prefs_mut().move_up(&group, &goals, &exercise) {
                println!("{} is already first or not shown", exercise);
            }
        }
        PrefsCommand::Down { group, exercise } => {
            let goals = group_goals(&group)?;
            if !session.prefs_mut().move_down(&group, &goals, &exercise) {
                println!("{} is already last or not shown", exercise);
            }
        }
        PrefsCommand::Achieve { group, exercise } => {
            group_goals(&group)?;
            let now = session.prefs_mut().toggle_achieved(&group, &exercise);
            println!("{} {}", exercise, if now { "marked achieved" } else { "unmarked" });
        }
        PrefsCommand::Target { exercise, value } => {
            session.prefs_mut().set_target(&exercise, &value)?;
        }
        PrefsCommand::Restore { group } => {
            let goals = group_goals(&group)?;
            session.prefs_mut().restore_group(&group, &goals);
        }
        PrefsCommand::LoadUp { muscle } => {
            let muscle = parse_muscle(&muscle)?;
            if !session.prefs_mut().load_move_up(muscle) {
                println!("{} is already first", muscle);
            }
        }
        PrefsCommand::LoadDown { muscle } => {
            let muscle = parse_muscle(&muscle)?;
            if !session.prefs_mut().load_move_down(muscle) {
                println!("{} is already last", muscle);
            }
        }
        PrefsCommand::LoadRestore => session.prefs_mut().restore_load_order(),
    }

    if session.has_unsaved_changes() {
        session.save()?;
        println!("✓ Preferences saved");
    }
    Ok(())
}

fn cmd_export(data_path: &Path, output: Option<PathBuf>, csv: Option<PathBuf>) -> Result<()> {
    let store = load_data_file(data_path)?;
    let json = export_json(&store)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("✓ Exported to {}", path.display());
        }
        None => println!("{}", json),
    }

    if let Some(dir) = csv {
        let workouts = export_workouts_csv(&dir.join("workouts.csv"), &store.workouts)?;
        let weigh_ins = export_weigh_ins_csv(&dir.join("weigh_ins.csv"), &store.weigh_ins)?;
        eprintln!(
            "✓ Wrote {} workouts and {} weigh-ins to {}",
            workouts,
            weigh_ins,
            dir.display()
        );
    }
    Ok(())
}

fn cmd_import(data_path: &Path, input: &Path) -> Result<()> {
    let json = std::fs::read_to_string(input)?;
    let report = update_data_file(data_path, |store| import_json(store, &json))?;

    if report.is_empty() {
        println!("Nothing to import.");
    }
    for (key, count) in report.sections() {
        println!("✓ Replaced {} ({})", key, count);
    }
    Ok(())
}

fn cmd_top25(
    data_path: &Path,
    search: Option<String>,
    tier: Option<String>,
    part: Option<String>,
    by_part: bool,
) -> Result<()> {
    let tier = match tier.as_deref() {
        None => None,
        Some(label) if label.eq_ignore_ascii_case("all") => None,
        Some(label) => Some(
            Tier::from_label(label)
                .ok_or_else(|| Error::Validation(format!("Tier must be S, A or B, got {:?}", label)))?,
        ),
    };
    let body_part = match part.as_deref() {
        None => None,
        Some(name) if name.eq_ignore_ascii_case("all") => None,
        Some(name) => Some(
            BodyPart::from_name(name).ok_or_else(|| Error::NotFound(format!("body part {}", name)))?,
        ),
    };
    let filter = Top25Filter {
        search: search.unwrap_or_default(),
        tier,
        body_part,
        sort: if by_part { Top25Sort::BodyPart } else { Top25Sort::Rank },
    };

    let store = load_data_file(data_path)?;
    let logged = logged_exercises(&store.goals, &store.progress);
    let shown = filter_top25(&filter);
    if shown.is_empty() {
        println!("No exercises match.");
        return Ok(());
    }

    println!(
        "{:>4} {:<4} {:<24} {:<10} {:<22} {:<22} {}",
        "Rank", "Tier", "Exercise", "Part", "Focus", "Equipment", "Logged"
    );
    for exercise in shown {
        println!(
            "{:>4} {:<4} {:<24} {:<10} {:<22} {:<22} {}",
            exercise.rank,
            exercise.tier,
            exercise.name,
            exercise.body_part,
            exercise.focus,
            exercise.equipment,
            if is_logged(exercise, &logged) { "✓" } else { "" }
        );
    }
    Ok(())
}

/// Overwrites the data file without reading it, so a corrupt file can be
/// recovered from
fn cmd_reset(data_path: &Path) -> Result<()> {
    let mut store = AppStore::empty();
    store.reset();
    save_data_file(data_path, &store)?;
    println!("✓ Data reset to seed");
    Ok(())
}
