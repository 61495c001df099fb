//! Prepares the static frontend for deployment by copying it into `dist/`.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};

const REDIRECTS: &str = "/*  /index.html  200\n";

const DIST_README: &str = "\
# Frontend distribution

Files in this folder are what gets deployed as the static frontend.

To update, edit the sources under `static/` and re-run `cargo run --bin deploy`.
";

fn main() -> Result<()> {
    env_logger::init();

    let dist = Path::new("dist");
    fs::create_dir_all(dist).context("creating dist/")?;

    let mut copied = 0;
    for entry in fs::read_dir("static").context("reading static/")? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "html") {
            fs::copy(&path, dist.join(entry.file_name()))
                .with_context(|| format!("copying {}", path.display()))?;
            log::info!("copied {}", entry.file_name().to_string_lossy());
            copied += 1;
        }
    }
    ensure!(copied > 0, "no HTML files found under static/");

    // Single-page-app routing rule for the static host.
    fs::write(dist.join("_redirects"), REDIRECTS).context("writing _redirects")?;
    fs::write(dist.join("README.md"), DIST_README).context("writing dist README")?;

    log::info!("deployment files ready in {}", dist.display());
    Ok(())
}
