//! Py2Win - A desktop front-end for PyInstaller
//!
//! Opens the build window, or with `--profile FILE --build` runs a single
//! build from a saved profile without one.

mod app;

use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context};
use eframe::egui;
use tracing::{debug, error, info};

use py2win::config::Config;
use py2win::error::Error;
use py2win::runner::{BuildEvent, BuildRunner};

use app::Py2WinApp;

/// Exit code for usage and profile errors
const EXIT_USAGE: i32 = 2;

/// Exit code when the packager could not be run at all
const EXIT_LAUNCH_FAILURE: i32 = 1;

/// Command line options
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
    /// Profile to load
    profile: Option<PathBuf>,
    /// Build the profile without opening a window
    build: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> std::result::Result<Self, String> {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from<I>(args: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut app_args = AppArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or("Missing config file path")?;
                    app_args.config_path = Some(PathBuf::from(path));
                }
                "--profile" | "-p" => {
                    let path = args.next().ok_or("Missing profile path")?;
                    app_args.profile = Some(PathBuf::from(path));
                }
                "--build" | "-b" => app_args.build = true,
                "--debug" | "-d" => app_args.debug = true,
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("Py2Win v{}", py2win::VERSION);
                    process::exit(0);
                }
                other => return Err(format!("Unknown option: {}", other)),
            }
        }

        if app_args.build && app_args.profile.is_none() {
            return Err("--build requires --profile FILE".to_string());
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("Py2Win - A desktop front-end for PyInstaller");
    println!();
    println!("USAGE:");
    println!("    py2win [OPTIONS]");
    println!("    py2win --profile <FILE> --build");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -p, --profile <FILE>   Build profile to load");
    println!("    -b, --build            Build the profile without opening a window");
    println!("    -d, --debug            Enable debug logging");
    println!("    -h, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    Py2Win looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $PY2WIN_CONFIG");
    println!("    3. <config dir>/py2win/config.toml");
    println!("    4. ~/.py2win/config.toml");
    println!("    5. ./.py2win/config.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    PY2WIN_CONFIG          Path to configuration file");
    println!("    PY2WIN_DEBUG           Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

/// Log records go to stderr; stdout carries only build output in headless mode
fn init_logging(debug: bool) {
    let debug = debug
        || env::var("PY2WIN_DEBUG").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let default_level = if debug { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn main() {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_help();
        process::exit(EXIT_USAGE);
    });

    init_logging(args.debug);
    info!("Starting Py2Win v{}", py2win::VERSION);
    debug!("Arguments: {:?}", args);

    let config = py2win::init(args.config_path.as_deref()).unwrap_or_else(|e| {
        eprintln!("{}", py2win::handle_startup_error(&e));
        process::exit(EXIT_USAGE);
    });

    if args.build {
        process::exit(run_headless(&args, &config));
    }

    if let Err(e) = run_gui(&args, config) {
        error!("Application failed: {:#}", e);
        process::exit(1);
    }

    info!("Py2Win shutdown complete");
}

/// Run one build from a profile, streaming its log to stdout
fn run_headless(args: &AppArgs, config: &Config) -> i32 {
    let Some(profile_path) = &args.profile else {
        return EXIT_USAGE;
    };

    let build_config = match py2win::load_profile(profile_path) {
        Ok(build_config) => build_config,
        Err(e) => {
            eprintln!("{}", py2win::handle_startup_error(&e));
            return EXIT_USAGE;
        }
    };

    let runner = BuildRunner::from_config(&config.packager);
    let mut stream = match runner.start_build(&build_config) {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return match e {
                Error::MissingScript { .. } => EXIT_USAGE,
                _ => EXIT_LAUNCH_FAILURE,
            };
        }
    };

    let mut exit_code = EXIT_LAUNCH_FAILURE;
    while let Some(event) = stream.blocking_next() {
        match event {
            BuildEvent::Started { command_line } => println!("Running command: {}", command_line),
            BuildEvent::Warning(warning) => eprintln!("Warning: {}", warning),
            BuildEvent::Line(line) => println!("{}", line.text),
            BuildEvent::Done(outcome) => {
                if outcome.is_success() {
                    println!("--- Build successful! ---");
                } else {
                    eprintln!("--- {} ---", outcome);
                }
                exit_code = outcome.exit_code().unwrap_or(EXIT_LAUNCH_FAILURE);
            }
        }
    }
    exit_code
}

fn run_gui(args: &AppArgs, config: Config) -> anyhow::Result<()> {
    let initial_profile = match &args.profile {
        Some(path) => Some(
            py2win::load_profile(path)
                .with_context(|| format!("Could not open profile {}", path.display()))?,
        ),
        None => None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(py2win::NAME)
            .with_app_id("py2win")
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        py2win::NAME,
        options,
        Box::new(move |cc| {
            let mut app = Py2WinApp::new(cc, config);
            if let Some(build_config) = &initial_profile {
                app.apply_profile(build_config);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("Failed to open window: {}", e))
}
