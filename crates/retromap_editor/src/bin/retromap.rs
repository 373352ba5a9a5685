//! Command-line tools for retromap project files
//!
//! Run with: retromap <command>

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use retromap_core::{format::CURRENT_VERSION, Proj};
use retromap_editor::{load_project, save_project, EditorPreferences, Model, ProjectError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "retromap", version, about = "Inspect and convert retromap project files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a project file
    Info { file: PathBuf },
    /// Re-save a project in the latest format version
    Upgrade { input: PathBuf, output: PathBuf },
    /// Write a new, blank project
    New {
        output: PathBuf,
        /// Ignore saved preferences and use the built-in defaults
        #[arg(long)]
        no_prefs: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Info { file } => run_info(&file),
        Command::Upgrade { input, output } => run_upgrade(&input, &output),
        Command::New { output, no_prefs } => run_new(&output, no_prefs),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("retromap: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_info(file: &Path) -> Result<(), ProjectError> {
    let proj = load_project(file)?;
    print!("{}", summary(&proj));
    Ok(())
}

fn run_upgrade(input: &Path, output: &Path) -> Result<(), ProjectError> {
    let proj = load_project(input)?;
    save_project(&proj, output)?;
    println!(
        "{} -> {} (format r{})",
        input.display(),
        output.display(),
        char::from(CURRENT_VERSION)
    );
    Ok(())
}

fn run_new(output: &Path, no_prefs: bool) -> Result<(), ProjectError> {
    let model = if no_prefs {
        Model::default()
    } else {
        Model::with_preferences(&EditorPreferences::load())
    };
    save_project(model.proj(), output)?;
    println!("wrote {}", output.display());
    Ok(())
}

fn summary(proj: &Proj) -> String {
    let cs = &proj.charset;
    let mut out = format!(
        "charset: {} tiles of {}x{}\npalette: {} colours\nmaps: {}\n",
        cs.ntiles,
        cs.tw,
        cs.th,
        proj.palette.ncolours,
        proj.maps.len()
    );
    for (i, map) in proj.maps.iter().enumerate() {
        out.push_str(&format!("  {:3}: {}x{}, {} ents\n", i, map.w, map.h, map.ents.len()));
        for ent in &map.ents {
            out.push_str(&format!("       {}\n", ent));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use retromap_core::{Ent, Tilemap};
    use tempfile::tempdir;

    #[test]
    fn test_summary() {
        let mut proj = Proj::default_project();
        let mut room = Tilemap::new(4, 3);
        room.ents.push(Ent::new().with("kind", "door").with("x", "1"));
        proj.maps.push(room);

        let text = summary(&proj);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "charset: 2 tiles of 8x8",
                "palette: 16 colours",
                "maps: 2",
                "    0: 40x25, 0 ents",
                "    1: 4x3, 1 ents",
                "       kind=door x=1",
            ]
        );
    }

    #[test]
    fn test_new_then_upgrade() {
        let dir = tempdir().unwrap();
        let fresh = dir.path().join("fresh.map");
        let copy = dir.path().join("copy.map");

        run_new(&fresh, true).unwrap();
        assert_eq!(load_project(&fresh).unwrap(), Proj::default_project());

        run_upgrade(&fresh, &copy).unwrap();
        assert_eq!(std::fs::read(&copy).unwrap(), std::fs::read(&fresh).unwrap());
        run_info(&copy).unwrap();
    }

    #[test]
    fn test_info_missing_file() {
        let dir = tempdir().unwrap();
        let err = run_info(&dir.path().join("missing.map")).unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["retromap", "new", "out.map", "--no-prefs"]).unwrap();
        assert!(matches!(cli.command, Command::New { no_prefs: true, .. }));
        assert!(Cli::try_parse_from(["retromap", "upgrade", "in.map"]).is_err());
    }
}
