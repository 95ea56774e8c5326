//! sanitygate CLI
//!
//! Usage:
//!   sanitygate --scene scene.json                 # Gate one scene file
//!   sanitygate --interactive                      # One scene JSON per stdin line
//!   sanitygate --directive 35                     # Directive for the next request
//!   sanitygate --serve                            # HTTP API server
//!   sanitygate --scene scene.json --json          # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use sanitygate::core::{entropy_rng, sanity_change_guidance, scene_rng, TurnGate};
use sanitygate::server::run_server;
use sanitygate::types::{
    Atmosphere, DebugOverride, DebugPreset, GateConfig, SanityTier, Scene, TurnEnvelope,
    TurnReport,
};
use sanitygate::{GateError, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "sanitygate",
    version = VERSION,
    about = "Sanity-driven content gate for LLM-narrated noir scenes",
    long_about = "sanitygate classifies the player's sanity into a tier and gates\n\
                  what the generated scene may show: hallucination runs, available\n\
                  options, visual effects and the game-over cross-check.\n\n\
                  Modes:\n  \
                  --scene FILE    Gate one scene file\n  \
                  --interactive   One scene JSON per stdin line\n  \
                  --directive N   Print the directive for sanity N\n  \
                  --serve         HTTP API server mode\n\n\
                  Tiers:\n  \
                  LUCID    - sanity >= 70\n  \
                  STRESSED - 40..69\n  \
                  BREAKING - 20..39\n  \
                  BROKEN   - below 20"
)]
struct Args {
    /// Scene JSON file to gate (single mode)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Interactive mode - read one scene JSON per line from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Print the directive for this sanity value and exit
    #[arg(short, long, allow_negative_numbers = true)]
    directive: Option<i64>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Gate configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hallucination marker token (overrides the config file)
    #[arg(long)]
    marker: Option<String>,

    /// Seed for reproducible option gating
    #[arg(long)]
    seed: Option<u64>,

    /// Debug preset applied before the individual overrides
    #[arg(long, value_enum)]
    preset: Option<DebugPreset>,

    /// Debug override for sanity
    #[arg(long)]
    override_sanity: Option<u8>,

    /// Debug override for tension
    #[arg(long)]
    override_tension: Option<u8>,

    /// Debug override for atmosphere
    #[arg(long, value_parser = parse_atmosphere)]
    override_atmosphere: Option<Atmosphere>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show narrative, options and style
    #[arg(long)]
    verbose: bool,
}

fn parse_atmosphere(tag: &str) -> Result<Atmosphere, String> {
    tag.parse::<Atmosphere>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    if args.serve {
        run_serve(&args, config).await;
    } else if let Some(sanity) = args.directive {
        run_directive(sanity, &args, &TurnGate::new(config));
    } else if let Some(ref path) = args.scene {
        if let Err(e) = run_single(path, &args, &TurnGate::new(config)) {
            eprintln!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args, &TurnGate::new(config));
    }
}

/// Config file (if any) with CLI flags layered on top
fn load_config(args: &Args) -> Result<GateConfig, GateError> {
    let mut config = match &args.config {
        Some(path) => GateConfig::load(path)?,
        None => GateConfig::default(),
    };
    if let Some(marker) = &args.marker {
        config.marker = marker.clone();
    }
    Ok(config.normalized())
}

/// Preset first, then individual flags
fn build_override(args: &Args) -> Option<DebugOverride> {
    let mut debug = args.preset.map(DebugPreset::to_override).unwrap_or_default();
    if args.override_sanity.is_some() {
        debug.sanity = args.override_sanity;
    }
    if args.override_tension.is_some() {
        debug.tension = args.override_tension;
    }
    if args.override_atmosphere.is_some() {
        debug.atmosphere = args.override_atmosphere;
    }
    if debug.is_empty() {
        None
    } else {
        Some(debug)
    }
}

/// Gate a scene with the seeded stream when a seed is given
fn gate_scene(scene: &Scene, args: &Args, gate: &TurnGate) -> TurnReport {
    let debug = build_override(args);
    match args.seed {
        Some(seed) => {
            let mut rng = scene_rng(seed, scene.scene_id.as_deref());
            gate.evaluate(scene, debug.as_ref(), &mut rng)
        }
        None => gate.evaluate(scene, debug.as_ref(), &mut entropy_rng()),
    }
}

/// Run single scene evaluation
fn run_single(path: &Path, args: &Args, gate: &TurnGate) -> Result<(), GateError> {
    let scene = Scene::load(path)?;
    let report = gate_scene(&scene, args, gate);
    print_report(report, args);
    Ok(())
}

/// Run interactive mode: one scene per line, bad lines are reported and skipped
fn run_interactive(args: &Args, gate: &TurnGate) {
    if !args.json {
        print_header("Interactive", args.no_color);
        println!("Paste one scene JSON per line. Type 'quit' to exit.");
        println!();
    }

    let stdin = io::stdin();
    let mut count = 0usize;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match Scene::from_json(line) {
            Ok(scene) => {
                count += 1;
                let report = gate_scene(&scene, args, gate);
                print_report(report, args);
            }
            Err(e) => {
                log::warn!("scene rejected: {}", e);
                eprintln!("{} {} [{}]", "✗".red(), e, e.code());
            }
        }
    }

    if !args.json {
        println!("\nSession ended. Scenes gated: {}", count);
    }
}

/// Sanity and tier the directive is built for, override applied
fn effective_directive_state(sanity: i64, args: &Args, gate: &TurnGate) -> (u8, SanityTier) {
    let clamped = sanitygate::clamp_stat(sanity);
    let debug = build_override(args);
    let effective = debug.map(|d| d.sanity_or(clamped)).unwrap_or(clamped);
    (effective, gate.tier_for(clamped, debug.as_ref()))
}

/// Print the directive for a sanity value
fn run_directive(sanity: i64, args: &Args, gate: &TurnGate) {
    let debug = build_override(args);
    let clamped = sanitygate::clamp_stat(sanity);
    let text = gate.directive(clamped, debug.as_ref());
    let (effective, tier) = effective_directive_state(sanity, args, gate);

    if args.json {
        let body = serde_json::json!({
            "sanity": effective,
            "tier": tier,
            "directive": text,
            "guidance": sanity_change_guidance(effective as i64),
        });
        println!("{}", body);
    } else {
        println!("{}", format!("{} sanity={} tier={}", tier.emoji(), effective, tier).color(tier.color()));
        println!();
        println!("{}", text);
        println!();
        println!("{}", sanity_change_guidance(effective as i64).dimmed());
    }
}

/// Print one report in the selected format
fn print_report(report: TurnReport, args: &Args) {
    if args.json {
        let envelope = TurnEnvelope::new(report);
        match serde_json::to_string(&envelope) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("serialize error: {}", e),
        }
        return;
    }

    if args.no_color {
        println!("{}", report.to_parseable_string());
    } else {
        println!("{}", report.to_terminal_string());
    }
    if args.verbose {
        print_verbose(&report);
    }
    for notice in &report.notices {
        println!("  {} {}", "⚠".yellow(), notice);
    }
    if report.game_over.is_over {
        let reason = report.game_over.reason.as_deref().unwrap_or("The case is closed.");
        println!("  {} {}", "GAME OVER".red().bold(), reason);
    }
}

/// Print verbose report body
fn print_verbose(report: &TurnReport) {
    let color = report.tier.color();
    println!("{}", "┌─────────────────────────────────────".color(color));
    for line in report.narrative.display_text().lines() {
        println!("{} {}", "│".color(color), line);
    }
    if report.show_hallucination_panel {
        println!("{}", "├── hallucinations ───────────────────".color(color));
        for fragment in &report.narrative.hallucination_fragments {
            println!("{} {}", "│".color(color), fragment.red().italic());
        }
    }
    println!("{}", "├── options ──────────────────────────".color(color));
    for option in &report.options {
        println!(
            "{}   [{}] {} ({})",
            "│".color(color),
            option.id,
            option.text,
            option.action_type
        );
    }
    println!("{}", "├── style ────────────────────────────".color(color));
    println!("{}   scene:      {}", "│".color(color), report.atmosphere.label());
    println!("{}   background: {}", "│".color(color), report.style.background);
    println!("{}   text:       {}", "│".color(color), report.style.text_color);
    println!("{}   effects:    {}", "│".color(color), report.style.effect_classes());
    if report.high_tension_overlay {
        println!("{}   overlay:    high tension", "│".color(color));
    }
    println!("{}", "└─────────────────────────────────────".color(color));
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    let title = format!("  sanitygate v{} - {}", VERSION, mode);
    if no_color {
        println!("========================================");
        println!("{}", title);
        println!("========================================");
    } else {
        println!("{}", "════════════════════════════════════════".bold());
        println!("{}", title.bold());
        println!("{}", "════════════════════════════════════════".bold());
    }
    println!();
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: GateConfig) {
    print_header("API Server", args.no_color);
    if let Err(e) = run_server(&args.addr, config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sanitygate").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_directive_header_follows_preset() {
        let gate = TurnGate::default();
        let insane = args(&["--preset", "insane", "--directive", "90"]);
        let (sanity, tier) = effective_directive_state(90, &insane, &gate);
        assert_eq!(sanity, 15);
        assert_eq!(tier, SanityTier::Broken);
        assert!(gate.directive(90, build_override(&insane).as_ref()).contains("BROKEN"));
    }

    #[test]
    fn test_directive_header_without_override() {
        let gate = TurnGate::default();
        let plain = args(&["--directive", "-20"]);
        assert_eq!(effective_directive_state(-20, &plain, &gate), (0, SanityTier::Broken));
        let pinned = args(&["--override-sanity", "75"]);
        assert_eq!(effective_directive_state(10, &pinned, &gate), (75, SanityTier::Lucid));
    }
}
