use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use mathcomposer::{
    Dialect, ManimGlPreview, Project, ReplayOpts, Scene, ScriptOpts, SessionOpts, export_script,
    generate_project_script, generate_replay, parse_code, reconcile_project,
};

#[derive(Parser, Debug)]
#[command(name = "mathcomposer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a script from a project file.
    Generate(GenerateArgs),
    /// Parse a script into a project file.
    Parse(ParseArgs),
    /// Merge an edited script into an existing project file.
    Sync(SyncArgs),
    /// Emit the replay fragment for one scene.
    Replay(ReplayArgs),
    /// Open a ManimGL preview window for one scene (requires `manimgl`).
    Preview(PreviewArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    /// ManimGL (`manimlib`).
    Gl,
    /// Manim Community Edition.
    Ce,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Gl => Dialect::ManimGl,
            DialectArg::Ce => Dialect::ManimCe,
        }
    }
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target dialect.
    #[arg(long, value_enum, default_value_t = DialectArg::Gl)]
    dialect: DialectArg,

    /// Output script path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Omit the import preamble.
    #[arg(long, default_value_t = false)]
    no_import: bool,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// Input script.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output project JSON (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Project JSON to merge into.
    #[arg(long)]
    project: PathBuf,

    /// Edited script.
    #[arg(long)]
    code: PathBuf,

    /// Output project JSON (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene name (first scene when omitted).
    #[arg(long)]
    scene: Option<String>,

    /// Output fragment path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Leave out the frame border rectangle.
    #[arg(long, default_value_t = false)]
    no_border: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene name (first scene when omitted).
    #[arg(long)]
    scene: Option<String>,

    /// Session config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Parse(args) => cmd_parse(args),
        Command::Sync(args) => cmd_sync(args),
        Command::Replay(args) => cmd_replay(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let opts = ScriptOpts {
        dialect: args.dialect.into(),
        include_import: !args.no_import,
    };
    emit(args.out.as_deref(), &generate_project_script(&project, &opts))
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let code = read_text(&args.in_path)?;
    let parsed = parse_code(&code)
        .with_context(|| format!("no scenes found in '{}'", args.in_path.display()))?;

    let mut project = Project::new();
    reconcile_project(&mut project, Some(parsed.as_slice()))?;
    emit(args.out.as_deref(), &project.to_json()?)
}

fn cmd_sync(args: SyncArgs) -> anyhow::Result<()> {
    let mut project = load_project(&args.project)?;
    let code = read_text(&args.code)?;
    let report = reconcile_project(&mut project, parse_code(&code).as_deref())?;

    for scene in &report.scenes {
        for change in &scene.changes {
            eprintln!("{}: {change:?}", scene.scene);
        }
    }
    for name in &report.added {
        eprintln!("{name}: added");
    }
    emit(args.out.as_deref(), &project.to_json()?)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let scene = pick_scene(&project, args.scene.as_deref())?;
    let opts = ReplayOpts {
        dialect: Dialect::ManimGl,
        scene_border: !args.no_border,
    };
    emit(args.out.as_deref(), &generate_replay(scene, &opts))
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let opts = match &args.config {
        Some(path) => SessionOpts::from_json_file(path)?,
        None => SessionOpts::default(),
    };
    let project = load_project(&args.in_path)?;
    let scene = pick_scene(&project, args.scene.as_deref())?;

    let preview = ManimGlPreview::spawn(scene, &opts.preview)?;
    eprintln!(
        "previewing {} (replay file: {})",
        scene.name(),
        preview.replay_path().display()
    );
    preview.wait()?;
    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn load_project(path: &Path) -> anyhow::Result<Project> {
    let text = read_text(path)?;
    Project::from_json(&text).with_context(|| format!("load project '{}'", path.display()))
}

fn pick_scene<'p>(project: &'p Project, name: Option<&str>) -> anyhow::Result<&'p Scene> {
    match name {
        Some(name) => project
            .scene_by_name(name)
            .with_context(|| format!("no scene named '{name}'")),
        None => project.scene(0).context("project has no scenes"),
    }
}

fn emit(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            export_script(path, text)?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
