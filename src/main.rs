//! `orbis` viewer: the bank orbs plus the agent orb in a window.
//!
//! ```text
//! orbis [--preset <file.toml>] [--snapshots <balances.json>]
//! ```

use std::path::Path;

use orbis::options::Options;
use orbis::scene::binding::parse_snapshots;
use orbis::{OrbisError, Viewer};

fn main() -> Result<(), OrbisError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut options = Options::default();
    let mut snapshots = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match (arg.as_str(), args.next()) {
            ("--preset", Some(path)) => options = Options::load(Path::new(&path))?,
            ("--snapshots", Some(path)) => {
                snapshots = parse_snapshots(&std::fs::read_to_string(path)?)?;
            }
            (flag, _) => log::warn!("ignoring argument '{flag}'"),
        }
    }

    Viewer::builder()
        .with_options(options)
        .with_snapshots(snapshots)
        .with_title("Orbis")
        .build()
        .run()
}
