// Copyright 2025.
//
// Render canvas patterns and scripted brush gestures to PNG.
//
// Usage:
//   art-render render <pattern> [-c <params.toml>] [-s <seed>] [-W <width>] [-H <height>] [-o <out.png>]
//   art-render stroke <script.toml> [-o <out.png>]
//   art-render list

use std::path::Path;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};
use log::{error, info};

use art_render::{
    default_output, load_render_config, load_stroke_script, render_pattern, replay_strokes,
    RenderConfig,
};
use paint_canvas::PatternKind;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "render" => cmd_render(&args[2..]),
        "stroke" => cmd_stroke(&args[2..]),
        "list" => {
            cmd_list();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("art-render - render canvas patterns and brush gestures to PNG");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <pattern> [-c <params.toml>] [-s <seed>] [-W <width>] [-H <height>] [-o <out.png>]");
    eprintln!("      Generate one pattern onto a cleared surface.");
    eprintln!();
    eprintln!("  stroke <script.toml> [-o <out.png>]");
    eprintln!("      Replay the brush settings and gestures of a stroke script.");
    eprintln!();
    eprintln!("  list");
    eprintln!("      List pattern names.");
}

fn cmd_list() {
    println!("Available patterns:");
    for kind in PatternKind::ALL {
        println!("  {}", kind);
    }
}

/// Value following the flag at `args[i]`.
fn flag_value<'a>(args: &'a [String], i: usize) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} needs a value", args[i]))
}

fn cmd_render(args: &[String]) -> Result<()> {
    let Some(name) = args.first() else {
        bail!("usage: art-render render <pattern> [options]");
    };
    let kind: PatternKind = name.parse()?;

    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut width: Option<u32> = None;
    let mut height: Option<u32> = None;
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" => config_path = Some(flag_value(args, i)?.to_string()),
            "-s" => seed = Some(flag_value(args, i)?.parse().context("invalid seed")?),
            "-W" => width = Some(flag_value(args, i)?.parse().context("invalid width")?),
            "-H" => height = Some(flag_value(args, i)?.parse().context("invalid height")?),
            "-o" => output_path = Some(flag_value(args, i)?.to_string()),
            other => bail!("unknown option: {}", other),
        }
        i += 2;
    }

    let mut config = match &config_path {
        Some(p) => load_render_config(Path::new(p))?,
        None => RenderConfig::default(),
    };
    if let Some(w) = width {
        config.surface.width = w;
    }
    if let Some(h) = height {
        config.surface.height = h;
    }
    let seed = seed.or(config.seed).unwrap_or_else(clock_seed);

    let surface = render_pattern(kind, &config, seed)?;
    let output = output_path.unwrap_or_else(|| {
        default_output(kind, seed, config.surface.width, config.surface.height)
    });
    surface
        .save_png(&output)
        .with_context(|| format!("writing {}", output))?;
    info!("saved {}", output);
    Ok(())
}

fn cmd_stroke(args: &[String]) -> Result<()> {
    let Some(script_path) = args.first() else {
        bail!("usage: art-render stroke <script.toml> [-o <out.png>]");
    };

    let mut output_path: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" => output_path = Some(flag_value(args, i)?.to_string()),
            other => bail!("unknown option: {}", other),
        }
        i += 2;
    }

    let script = load_stroke_script(Path::new(script_path))?;
    info!(
        "replaying {} gestures with a {} brush",
        script.gestures.len(),
        script.brush.mode
    );
    let surface = replay_strokes(&script)?;

    let output = output_path.unwrap_or_else(|| "strokes.png".to_string());
    surface
        .save_png(&output)
        .with_context(|| format!("writing {}", output))?;
    info!("saved {}", output);
    Ok(())
}

/// Seed for renders that do not name one; logged so the image can be
/// reproduced.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
