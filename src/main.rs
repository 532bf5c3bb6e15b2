use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{Context, Result, bail};
use log::{error, info};

use textout::config::SceneConfig;
use textout::config::monitor::SceneMonitor;

fn print_help() {
    println!("textout {}", env!("CARGO_PKG_VERSION"));
    println!("Render a text scene to PNG\n");
    println!("USAGE:");
    println!("    textout [OPTIONS] <scene.toml> [out.png]\n");
    println!("OPTIONS:");
    println!("    --watch           Re-render whenever the scene file changes");
    println!("    --print-config    Print the default scene to stdout");
    println!("    --version, -V     Print version information");
    println!("    --help, -h        Print this help message");
}

fn render_to(scene_path: &Path, out: &Path) -> Result<()> {
    let scene = SceneConfig::load(scene_path)?;
    let rendered = textout::scene::render(&scene)
        .with_context(|| format!("rendering {}", scene_path.display()))?;
    rendered.surface.save_png(out)?;
    info!(
        "wrote {} ({} drawn, {} failed)",
        out.display(),
        rendered.drawn,
        rendered.failed
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--print-config") {
        print!("{}", toml::to_string_pretty(&SceneConfig::default())?);
        return Ok(());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("textout {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let watch = args.iter().any(|a| a == "--watch");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    let (scene_path, out) = match positional.as_slice() {
        [scene] => (PathBuf::from(scene), PathBuf::from(scene).with_extension("png")),
        [scene, out] => (PathBuf::from(scene), PathBuf::from(out)),
        _ => {
            print_help();
            bail!("expected a scene file and an optional output path");
        }
    };

    render_to(&scene_path, &out)?;
    if !watch {
        return Ok(());
    }

    let (reload_tx, reload_rx) = mpsc::channel();
    let _monitor = SceneMonitor::new(&scene_path, reload_tx)
        .with_context(|| format!("watching {}", scene_path.display()))?;
    // Ends when the watcher thread exits and drops its sender.
    for () in reload_rx {
        if let Err(e) = render_to(&scene_path, &out) {
            error!("{e:#}");
        }
    }
    Ok(())
}
