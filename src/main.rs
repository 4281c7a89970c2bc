//! main.rs
//! Entry point for fsc

use fsc::app::{ExitAction, SessionOptions, SessionState};
use fsc::config::Config;
use fsc::config::general::parse_log_level;
use fsc::core::editor::open_in_editor;
use fsc::core::terminal;
use fsc::core::worker::Workers;
use fsc::utils::cli::{self, Args};
use fsc::utils::validate_start_dir;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};

/// Environment variable that overrides `general.log_level`.
const LOG_ENV_VAR: &str = "FSC_LOG";

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        terminal::restore_terminal();

        eprintln!("\n[fsc] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let args = cli::parse_args();

    if args.keybinds {
        cli::print_keybinds();
        return Ok(());
    }

    if args.init {
        let path = Config::default_path();
        if let Err(e) = Config::generate_default(&path) {
            eprintln!("fsc: error: {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    let config = Config::load();
    init_logging(&config);

    let start_dir = match validate_start_dir(&args.directory) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("fsc: error: {e}");
            std::process::exit(1);
        }
    };

    let options = session_options(&config, &args);
    log::info!(
        "fsc starting in {} with {:?}",
        start_dir.display(),
        options.flags
    );

    let workers = Workers::spawn();
    let (session, initial) = SessionState::new(start_dir, options);
    let session = terminal::run_terminal(session, initial, &config, &workers)?;

    match session.exit_action() {
        // the only thing fsc writes to stdout
        ExitAction::SelectFile(path) => println!("{}", path.display()),
        ExitAction::OpenEditor(path) => {
            if let Err(e) = open_in_editor(path, config.editor().cmd()) {
                log::error!("{e}");
                eprintln!("fsc: error: {e}");
                std::process::exit(1);
            }
        }
        ExitAction::Quit | ExitAction::None => {}
    }
    Ok(())
}

/// Config values with the command line flags switched on top.
fn session_options(config: &Config, args: &Args) -> SessionOptions {
    let mut options = SessionOptions::from_config(config);
    let flags = &mut options.flags;

    flags.show_hidden |= args.hidden;
    flags.regex_mode |= args.regex;
    if args.dirs_only {
        flags.dirs_only = true;
        flags.files_only = false;
    }
    if args.files_only {
        flags.files_only = true;
        flags.dirs_only = false;
    }
    options.vim_mode |= args.vim;
    options
}

/// Starts the file logger in the user cache directory, unless the level is off.
fn init_logging(config: &Config) {
    let level = match std::env::var(LOG_ENV_VAR) {
        Ok(value) => parse_log_level(&value),
        Err(_) => config.general().log_level(),
    };
    if level == LevelFilter::Off {
        return;
    }

    let Some(dir) = dirs::cache_dir().map(|d| d.join("fsc")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(dir.join("fsc.log")) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}
