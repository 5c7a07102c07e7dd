use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use segviz::files::{FileKind, FileSet, load_rows_file};
use segviz::render::render_html_report;
use segviz::{Result, create_spec};

#[derive(Parser)]
#[command(name = "segviz")]
#[command(about = "Copy-ratio and allele-fraction viewer spec generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the GenomeSpy spec as JSON.
    Spec {
        #[command(flatten)]
        input: InputArgs,

        /// Indent the output.
        #[arg(long)]
        pretty: bool,

        #[arg(short = 'o', long)]
        out: String,
    },
    /// Write a self-contained HTML viewer page.
    Report {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value = "Segmentation viewer")]
        title: String,

        #[arg(short = 'o', long)]
        out: String,
    },
}

/// Pre-parsed row files (JSON) and the genome build.
#[derive(Args)]
struct InputArgs {
    /// Segments.
    #[arg(long)]
    seg: Option<String>,

    /// Copy-ratio points.
    #[arg(long)]
    cr: Option<String>,

    /// Heterozygous sites.
    #[arg(long)]
    hets: Option<String>,

    /// Sequence dictionary, used when no genome is given.
    #[arg(long)]
    dict: Option<String>,

    /// Built-in genome assembly, e.g. hg38.
    #[arg(long)]
    genome: Option<String>,
}

impl InputArgs {
    fn load(&self) -> Result<FileSet> {
        let mut files = FileSet::new();
        for (kind, path) in [
            (FileKind::Seg, &self.seg),
            (FileKind::Cr, &self.cr),
            (FileKind::Hets, &self.hets),
            (FileKind::Dict, &self.dict),
        ] {
            if let Some(path) = path {
                let file = load_rows_file(path).with_context(|| format!("load {} file", kind))?;
                log::info!("{}: {} rows from {}", kind, file.data.len(), path);
                files.insert(kind, file);
            }
        }
        Ok(files)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Spec { input, pretty, out } => {
            let files = input.load()?;
            let spec = create_spec(&files, input.genome.as_deref());

            let json = if pretty {
                serde_json::to_string_pretty(&spec)?
            } else {
                serde_json::to_string(&spec)?
            };
            std::fs::write(&out, json).with_context(|| format!("write {}", out))?;
            println!("Wrote {}", out);
        }
        Commands::Report { input, title, out } => {
            let files = input.load()?;
            let spec = create_spec(&files, input.genome.as_deref());

            let html = render_html_report(&spec, &title)?;
            std::fs::write(&out, html).with_context(|| format!("write {}", out))?;
            println!("Wrote {}", out);
        }
    }

    Ok(())
}
