use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use rmf::prelude::*;
use thiserror::Error;

const DEFAULT_CONFIG: &str = "rmf.ini";

#[derive(Error, Debug)]
enum ReadoutError {
    #[error("bad config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: rmf::ConfigError,
    },
    #[error("could not decode map: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Parser, Debug)]
#[command(name = "rmf-readout", about = "Print a summary of a Hammer .rmf map")]
struct Args {
    /// Decoder options, read from `rmf.ini` when present and not given.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the nested decode trace before the summary.
    #[arg(long)]
    trace: bool,
    map: PathBuf,
}

/// An explicit `--config` must exist, the default one is optional.
fn load_options(config: Option<PathBuf>) -> Result<LoadOptions, ReadoutError> {
    let path = match config {
        Some(path) => path,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG);
            if !path.exists() {
                return Ok(LoadOptions::default());
            }
            path
        }
    };
    log::info!("reading options from {}", path.display());
    LoadOptions::load_ini(&path).map_err(|source| ReadoutError::Config { path, source })
}

fn print_summary(doc: &Document) {
    println!("version {}", doc.version());

    println!("{} visgroups", doc.n_visgroups());
    for visgroup in doc.visgroups() {
        println!(
            "  {:>4} {:<32} color {} {}",
            visgroup.id,
            visgroup.name,
            visgroup.color,
            if visgroup.visible() { "shown" } else { "hidden" }
        );
    }

    let world = doc.worldspawn();
    let data = world.entity_data();
    println!(
        "{} (spawnflags {:#x}, {} keyvalues)",
        data.classname(),
        data.spawnflags(),
        data.n_keyvalues()
    );
    for kv in data.keyvalues() {
        println!("  {} = {}", kv.key, kv.value);
    }

    let (mut solids, mut entities, mut groups, mut other, mut faces) = (0, 0, 0, 0, 0);
    doc.walk(&mut |node, _| match node {
        MapNode::Solid(solid) => {
            solids += 1;
            faces += solid.n_faces();
        }
        MapNode::Entity(_) => entities += 1,
        MapNode::Group(_) => groups += 1,
        MapNode::World(_) | MapNode::Unknown(_) => other += 1,
    });
    println!(
        "{} top level objects; {solids} solids ({faces} faces), {entities} entities, {groups} groups in total",
        world.n_children()
    );
    if other > 0 {
        println!("{other} other objects");
    }

    println!("{} paths", world.n_paths());
    for path in world.paths() {
        println!(
            "  {} ({}) {:?}, {} nodes",
            path.name,
            path.classname,
            path.kind(),
            path.n_nodes()
        );
    }

    let doc_info = doc.doc_info();
    println!(
        "{} cameras, active {}",
        doc_info.n_cameras(),
        doc_info.active_camera()
    );

    for diagnostic in doc.diagnostics() {
        println!("warning: {diagnostic:?}");
    }
}

fn run(args: Args) -> Result<(), ReadoutError> {
    let mut options = load_options(args.config)?;
    options.trace |= args.trace;

    let (doc, trace) = rmf::load_file(&args.map, options)?;
    if let Some(trace) = trace {
        print!("{trace}");
    }
    print_summary(&doc);
    Ok(())
}

pub fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let ReadoutError::Decode(decode) = &err {
                log::error!("failed at byte {:#x}", decode.offset());
            }
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod readout_tests {
    use clap::{error::ErrorKind, CommandFactory};

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_flags_and_map() {
        let args =
            Args::try_parse_from(["rmf-readout", "--config", "dev.ini", "--trace", "c1a0.rmf"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("dev.ini")));
        assert!(args.trace);
        assert_eq!(args.map, PathBuf::from("c1a0.rmf"));

        let args = Args::try_parse_from(["rmf-readout", "c1a0.rmf"]).unwrap();
        assert_eq!(args.config, None);
        assert!(!args.trace);
    }

    #[test]
    fn help_and_bad_usage() {
        let err = Args::try_parse_from(["rmf-readout", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["rmf-readout"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Args::try_parse_from(["rmf-readout", "--config"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
