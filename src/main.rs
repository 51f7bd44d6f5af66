use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use liftrs::alerts::{CompletionAlerts, TerminalSink};
use liftrs::config::{AppConfig, WeightUnit};
use liftrs::display;
use liftrs::export::{export_json, ProgramExport};
use liftrs::logging::{init_logging, LogLevel};
use liftrs::schedule;
use liftrs::{
    LiftRsError, ProgramGenerator, RestLabel, RestTimer, TimerCommand, TimerListener, TimerPhase,
    TimerState, TrainingDay, WorkoutSession,
};

/// liftrs - periodized strength program CLI
///
/// Generates a 26-week hypertrophy program with block periodization, deload
/// weeks and supersets, and runs a rest timer between sets.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(version)]
#[command(about = "Periodized strength program and rest timer", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the workouts of a week
    Week {
        /// Week number (1-26), defaults to the configured current week
        #[arg(short, long)]
        week: Option<u32>,

        /// Only show this day (sunday, tuesday, friday, home)
        #[arg(short, long)]
        day: Option<String>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show the block periodization schedule
    Schedule,

    /// Show how an exercise progresses over the program
    Progression {
        /// Exercise name, e.g. "Trap Bar Deadlift"
        name: String,
    },

    /// List every exercise in the program
    Exercises,

    /// Show total sets, reps and load for a week
    Volume {
        #[arg(short, long)]
        week: Option<u32>,
    },

    /// Check the program catalog for structural problems
    Validate,

    /// Export the program as JSON
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export a single week instead of all 26
        #[arg(short, long)]
        week: Option<u32>,
    },

    /// Log a completed set and start the rest timer
    Log {
        /// Exercise id within the day, e.g. sun_1
        exercise: String,

        /// Set number (1-based)
        #[arg(short, long)]
        set: u32,

        /// Reps performed
        #[arg(short, long)]
        reps: u32,

        /// Weight used in the configured unit, defaults to the prescribed weight
        #[arg(long)]
        weight: Option<Decimal>,

        #[arg(short, long)]
        week: Option<u32>,

        #[arg(short, long)]
        day: Option<String>,
    },

    /// Clear logged sets for a day
    ResetDay {
        #[arg(short, long)]
        week: Option<u32>,

        #[arg(short, long)]
        day: Option<String>,
    },

    /// Run a rest countdown
    Rest {
        /// Rest length in seconds, defaults to the configured rest
        seconds: Option<u32>,

        /// Label shown next to the clock
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Configure application settings
    Config {
        /// Print the current configuration
        #[arg(short, long)]
        list: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Set a configuration value (key=value)
        #[arg(short, long)]
        set: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let mut config = AppConfig::load_or_default(Some(&config_path));

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(config.logging.level, cli.verbose);
    init_logging(&log_config)?;

    if cli.verbose > 0 {
        eprintln!("{}", format!("Log level: {}", log_config.level.to_filter()).dimmed());
    }

    let generator = ProgramGenerator::default();

    match run(cli.command, &mut config, &config_path, &generator) {
        Err(e) => match e.downcast_ref::<LiftRsError>() {
            Some(lift_error) => {
                lift_error.log("Command failed");
                eprintln!("{} {}", "Error:".red().bold(), lift_error.user_message());
                std::process::exit(1);
            }
            None => Err(e),
        },
        Ok(()) => Ok(()),
    }
}

fn run(
    command: Commands,
    config: &mut AppConfig,
    config_path: &Path,
    generator: &ProgramGenerator,
) -> Result<()> {
    let unit = config.program.weight_unit;

    match command {
        Commands::Week { week, day, json } => {
            let week = week.unwrap_or(config.program.current_week);
            match day {
                Some(day) => {
                    let workout = generator
                        .generate_day_by_key(week, &day)
                        .map_err(LiftRsError::from)?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&workout)?);
                    } else {
                        println!("{}", display::render_workout(&workout, unit));
                    }
                }
                None => {
                    let program = generator.generate_week(week).map_err(LiftRsError::from)?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&program)?);
                    } else {
                        println!("{}", display::render_week(&program, unit));
                    }
                }
            }
        }

        Commands::Schedule => {
            println!("{}", display::render_schedule());
        }

        Commands::Progression { name } => {
            let points = generator.exercise_progression(&name);
            if points.is_empty() {
                println!("{} No exercise named '{}'", "!".yellow().bold(), name);
                println!("Run `liftrs exercises` to list the program's exercises.");
            } else {
                println!("{}", display::render_progression(&name, &points, unit));
            }
        }

        Commands::Exercises => {
            for name in generator.all_exercises() {
                println!("  {}", name);
            }
        }

        Commands::Volume { week } => {
            let week = week.unwrap_or(config.program.current_week);
            let volume = generator.week_volume(week).map_err(LiftRsError::from)?;
            println!("{}", display::render_volume(&volume, unit));
        }

        Commands::Validate => {
            let report = generator.validate();
            if report.is_valid {
                println!("{}", "✓ Program is valid".green().bold());
            } else {
                println!("{}", "✗ Program has errors".red().bold());
                for error in &report.errors {
                    println!("  - {}", error);
                }
            }
            println!("  Weeks: {}", report.total_weeks);
            println!("  Exercises: {}", report.total_exercises);
            if !report.is_valid {
                bail!("{} validation errors", report.errors.len());
            }
        }

        Commands::Export { output, week } => {
            let export = match week {
                Some(week) => ProgramExport::build(generator, [week])?,
                None => ProgramExport::build(generator, schedule::weeks())?,
            };
            export_json(&export, &output)?;
            println!(
                "{} Exported {} week(s) to {}",
                "✓".green(),
                export.weeks.len(),
                output.display()
            );
        }

        Commands::Log {
            exercise,
            set,
            reps,
            weight,
            week,
            day,
        } => {
            let (week, day) = resolve_day(config, week, day)?;
            if set == 0 {
                bail!("Set numbers start at 1");
            }

            let workout = generator.generate_day(week, day).map_err(LiftRsError::from)?;
            let exercise = workout
                .exercises
                .iter()
                .find(|e| e.template_id == exercise || e.id == exercise)
                .with_context(|| format!("No exercise '{}' on {} of week {}", exercise, day, week))?;
            if set > exercise.sets {
                bail!("{} has only {} sets", exercise.name, exercise.sets);
            }

            let session_path = session_path(config, week, day);
            let mut session = load_session(&session_path, week, day, config);
            // Sessions store kg; the command line speaks the configured unit
            let shown = weight.unwrap_or_else(|| unit.from_kg(exercise.weight));
            let weight = weight.map(|w| unit.to_kg(w)).unwrap_or(exercise.weight);
            let rest = session.log_set(exercise, set - 1, reps, weight);
            session.save_to_file(&session_path).map_err(LiftRsError::from)?;

            println!(
                "{} {} set {}/{}: {} x {} {}",
                "✓".green(),
                exercise.name.bold(),
                set,
                exercise.sets,
                reps,
                shown.normalize(),
                unit
            );

            match rest {
                Some(request) if config.timer.auto_start => {
                    run_rest(config, request.seconds, Some(request.label))?;
                }
                Some(request) => {
                    println!("Rest {} before the next set", display::format_clock(request.seconds));
                }
                None => println!("{}", "Last set done, move on to the next exercise".cyan()),
            }
        }

        Commands::ResetDay { week, day } => {
            let (week, day) = resolve_day(config, week, day)?;
            let session_path = session_path(config, week, day);
            let mut session = load_session(&session_path, week, day, config);
            let cleared = session.reset_day();
            session.save_to_file(&session_path).map_err(LiftRsError::from)?;
            println!("{} Cleared {} logged set(s) for {} week {}", "✓".green(), cleared, day, week);
        }

        Commands::Rest { seconds, label } => {
            let seconds = seconds.unwrap_or(config.timer.default_rest_seconds);
            run_rest(config, seconds, label.map(|text| RestLabel::new(text, 0, 0)))?;
        }

        Commands::Config { list, init, set } => {
            if init {
                config.save_to_file(config_path)?;
                println!("{} Wrote {}", "✓".green(), config_path.display());
            } else if let Some(key_value) = set {
                apply_setting(config, &key_value)?;
                config.save_to_file(config_path)?;
                println!("{} Set {}", "✓".green(), key_value);
            } else if list {
                println!("{}", toml::to_string_pretty(config)?);
            } else {
                println!("Config file: {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn resolve_day(config: &AppConfig, week: Option<u32>, day: Option<String>) -> Result<(u32, TrainingDay)> {
    let week = week.unwrap_or(config.program.current_week);
    schedule::ensure_week(week).map_err(LiftRsError::from)?;

    let day = match day {
        Some(key) => key.parse::<TrainingDay>().map_err(LiftRsError::from)?,
        None => config.program.default_day,
    };

    Ok((week, day))
}

fn session_path(config: &AppConfig, week: u32, day: TrainingDay) -> PathBuf {
    config
        .program
        .session_dir
        .join(format!("week{:02}_{}.json", week, day.key()))
}

fn load_session(path: &Path, week: u32, day: TrainingDay, config: &AppConfig) -> WorkoutSession {
    match WorkoutSession::load_from_file(path) {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!(error = %e, "Starting a new session");
            WorkoutSession::new(week, day).with_fallback_rest(config.timer.default_rest_seconds)
        }
    }
}

fn apply_setting(config: &mut AppConfig, key_value: &str) -> Result<()> {
    let (key, value) = key_value
        .split_once('=')
        .with_context(|| format!("Expected key=value, got '{}'", key_value))?;
    let value = value.trim();

    let parse_bool = |v: &str| -> Result<bool> {
        match v {
            "true" | "on" | "yes" => Ok(true),
            "false" | "off" | "no" => Ok(false),
            _ => bail!("Expected true or false, got '{}'", v),
        }
    };

    match key.trim() {
        "timer.sound" => config.timer.sound_enabled = parse_bool(value)?,
        "timer.vibration" => config.timer.vibration_enabled = parse_bool(value)?,
        "timer.auto_start" => config.timer.auto_start = parse_bool(value)?,
        "timer.rest" => config.timer.default_rest_seconds = value.parse()?,
        "program.week" => {
            let week: u32 = value.parse()?;
            schedule::ensure_week(week).map_err(LiftRsError::from)?;
            config.program.current_week = week;
        }
        "program.day" => {
            config.program.default_day = value.parse::<TrainingDay>().map_err(LiftRsError::from)?
        }
        "program.unit" => {
            config.program.weight_unit = match value {
                "kg" => WeightUnit::Kg,
                "lb" | "lbs" => WeightUnit::Lb,
                _ => bail!("Unknown unit '{}'", value),
            }
        }
        "log.level" => config.logging.level = value.parse().map_err(anyhow::Error::msg)?,
        other => bail!("Unknown setting '{}'", other),
    }

    config.validate()
}

/// Prints the clock on one line while the timer runs
struct ConsoleClock;

impl TimerListener for ConsoleClock {
    fn on_tick(&mut self, state: &TimerState) {
        print_clock(state);
    }

    fn on_update(&mut self, state: &TimerState) {
        print_clock(state);
    }

    fn on_complete(&mut self, _state: &TimerState) {
        println!();
    }
}

fn print_clock(state: &TimerState) {
    use std::io::Write;

    let label = state
        .label
        .as_ref()
        .map(|l| {
            let text = if l.total_sets == 0 {
                l.exercise.clone()
            } else {
                l.to_string()
            };
            format!("  {}", text.dimmed())
        })
        .unwrap_or_default();
    print!(
        "\r{} {}{}   ",
        "Rest".bold(),
        display::format_clock(state.remaining_seconds).cyan().bold(),
        label
    );
    let _ = std::io::stdout().flush();
}

fn run_rest(config: &AppConfig, seconds: u32, label: Option<RestLabel>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start timer runtime")?;

    let result = runtime.block_on(async {
        let alerts = CompletionAlerts::new(TerminalSink, &config.timer);
        let mut timer = RestTimer::with_grace((ConsoleClock, alerts), config.timer.grace_seconds);

        if !timer.start(seconds, label) {
            bail!("Rest must be at least one second");
        }
        println!(
            "{}",
            "Enter: pause/resume | r: reset | +N/-N: adjust | s: skip".dimmed()
        );

        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately
        interval.tick().await;

        let mut input = BufReader::new(tokio::io::stdin()).lines();
        let mut input_open = true;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    timer.tick();
                    if timer.phase() == TimerPhase::Idle {
                        break;
                    }
                }
                line = input.next_line(), if input_open => {
                    match line {
                        Ok(Some(line)) => match line.parse::<TimerCommand>() {
                            Ok(command) => {
                                let applied = timer.apply(command);
                                if !applied {
                                    tracing::debug!(?command, phase = %timer.phase(), "Timer command ignored");
                                } else if command == TimerCommand::Skip {
                                    println!("\n{}", "Rest skipped".yellow());
                                    break;
                                }
                            }
                            Err(e) => eprintln!("{}", e.dimmed()),
                        },
                        Ok(None) => input_open = false,
                        Err(e) => {
                            tracing::debug!(error = %e, "Timer input closed");
                            input_open = false;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    if timer.skip() {
                        println!("\n{}", "Rest skipped".yellow());
                    }
                    break;
                }
            }
        }

        Ok(())
    });

    // Stdin is read on a blocking thread that may still be waiting for a line
    runtime.shutdown_background();
    result
}
