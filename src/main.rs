use anyhow::Result;
use clap::Parser;

use changelog_preview::classifier::CommitClassifier;
use changelog_preview::config;
use changelog_preview::forge::GitHubForge;
use changelog_preview::preview::{self, PreviewArgs};
use changelog_preview::ui;

#[derive(clap::Parser)]
#[command(
    name = "changelog",
    version,
    about = "Preview changelog for next release"
)]
struct Args {
    #[arg(
        help = "Next version, can use semantic type to auto-generate: major (maj), minor (min, feature, feat) or patch (bug, bugfix)"
    )]
    next: Option<String>,

    #[arg(
        short,
        long,
        help = "GitHub repository to use (leave blank to detect from current directory)"
    )]
    repository: Option<String>,

    #[arg(long, help = "Release to start changelog from (leave blank for latest)")]
    from: Option<String>,

    #[arg(long, help = "Release to end changelog (leave blank for default branch)")]
    to: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing();

    if let Err(e) = run(args) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let forge = GitHubForge::new(&config.forge)?;
    let classifier = CommitClassifier::new(&config.classifier);
    let cwd = std::env::current_dir()?;

    let preview_args = PreviewArgs {
        repository: args.repository,
        from: args.from,
        to: args.to,
        next: args.next,
    };

    ui::display_title("Changelog Generator");

    let plan = preview::plan_preview(&forge, &preview_args, &cwd)?;

    ui::display_comment(&format!(
        "Generating {}:{} changelog",
        plan.repository, plan.comparison
    ));

    let result = preview::render_preview(&forge, &classifier, plan)?;
    tracing::info!(commits = result.commit_count, "rendered changelog");

    for warning in &result.warnings {
        ui::display_warning(warning);
    }

    ui::display_changelog(&result.text);
    ui::display_success("Done.");

    Ok(())
}
