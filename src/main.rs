use clap::{Parser, Subcommand};
use gazette::pipeline::{self, Mode};
use gazette::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "Static blog generator for dated markdown articles")]
#[command(long_about = "\
Static blog generator for dated markdown articles

Each article is a markdown file whose name carries its publication date.
Articles get their own pages; templates in the templates directory become
site pages that can list every article and tag.

Source structure:

  site/
  ├── config.toml                       # Site config (optional)
  ├── articles/
  │   ├── 2021-3-5-hello-world.md       # → articles/2021/3/5/hello-world.html
  │   └── notes.md                      # No date → articles/notes.html
  └── templates/
      ├── index.html                    # Site page → index.html
      ├── tags.html                     # Site page → tags.html
      └── partials/
          ├── layout.html               # Not rendered on its own
          └── article.html              # Article page template

Article front matter (optional YAML between --- fences):

  ---
  title: Hello, World
  tags: [intro, meta]
  ---
  Shown on the index.

  <!--more-->

  Only on the article page.

Run 'gazette gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render article pages, then site pages
    Build,
    /// Render article pages only
    Articles,
    /// Read and aggregate every article without writing anything
    Check {
        /// Print the aggregated collection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Build => {
            println!("==> Building {} \u{2192} {}", cli.source.display(), cli.output.display());
            let report = pipeline::run(&cli.source, &cli.output, Mode::Full)?;
            output::print_build_output(&report, &cli.output);
            report
        }
        Command::Articles => {
            println!(
                "==> Rendering articles {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = pipeline::run(&cli.source, &cli.output, Mode::Articles)?;
            output::print_build_output(&report, &cli.output);
            report
        }
        Command::Check { json } => {
            let report = pipeline::run(&cli.source, &cli.output, Mode::Check)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report.collection)?);
            } else {
                println!("==> Checking {}", cli.source.display());
                output::print_check_output(&report);
            }
            report
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
    };

    if !report.is_success() {
        return Err(format!("{} article(s) or page(s) failed", report.failures.len()).into());
    }
    Ok(())
}
