use std::{env, sync::Arc, thread};

use yubi::detector::ScriptedDetector;
use yubi::snapshot::SnapshotCell;
use yubi::source::SyntheticSource;
use yubi::{pipeline, server};

const DEFAULT_PORT: u16 = 5000;

fn main() -> Result<(), yubi::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = match env::var("PORT") {
        Ok(port) => port
            .parse::<u16>()
            .map_err(|_| format!("invalid PORT value `{port}`"))?,
        Err(_) => DEFAULT_PORT,
    };

    let cell = Arc::new(SnapshotCell::new());

    // Demo wiring: a synthetic camera and a scripted detector. A real deployment substitutes its
    // capture backend and pose estimator here.
    let detector = ScriptedDetector::demo();
    let source = SyntheticSource::new(1280, 720, 30);

    let worker = pipeline::classifier_worker(detector, cell.clone())?;
    thread::Builder::new()
        .name("capture".into())
        .spawn(move || pipeline::capture_loop(source, worker))?;

    server::serve(&format!("0.0.0.0:{port}"), cell)
}
