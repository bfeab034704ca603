//! argsplice - expands argfile references in its own arguments.

use argsplice::audit::AuditLogger;
use argsplice::config::Config;
use argsplice::output::{format_diagnostics, format_expanded};
use argsplice::Expander;

use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cwd = std::env::current_dir().ok();

    // Missing config falls back to defaults; a broken one is reported first.
    let config = match Config::load(cwd.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            Config::default()
        }
    };

    let expander = match config.compile() {
        Ok(expander) => expander,
        Err(e) => {
            eprintln!("Config error: {}", e);
            Expander::default()
        }
    };

    // Non-UTF-8 arguments pass through lossily but count as errors.
    let mut errors = Vec::new();
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| match arg.into_string() {
            Ok(arg) => arg,
            Err(raw) => {
                let lossy = raw.to_string_lossy().into_owned();
                errors.push(format!("Argument is not valid UTF-8: {}", lossy));
                lossy
            }
        })
        .collect();
    let expansion = expander.expand_recorded(args, &mut errors);

    // Audit logging (if enabled)
    if config.audit.enabled {
        if let Some(path) = &config.audit.path {
            if let Ok(mut logger) = AuditLogger::open(Path::new(path)) {
                let _ = logger.log_records(&expansion.argfiles);
            }
        }
    }

    println!("{}", format_expanded(&expansion.args));

    match format_diagnostics(&errors) {
        Some(msg) => {
            eprintln!("{}", msg);
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}
