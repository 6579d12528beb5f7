//! protoc-gen-encode: protoc plugin and developer CLI.
//!
//! Invoked by protoc with no arguments, it speaks the plugin protocol on
//! stdin/stdout. The subcommands run the same generator against a
//! `FileDescriptorSet` written by `protoc --descriptor_set_out`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use encode_compiler::schema::descriptor::files_from_descriptor_set;
use encode_compiler::schema::SchemaGraph;
use encode_compiler::{Classification, CompilerError, FileDef, Generator, GeneratorConfig, MappingDirective};

mod plugin;
mod ui;

#[derive(Parser)]
#[command(name = "protoc-gen-encode")]
#[command(version)]
#[command(about = "Synthesize checked Rust encoders between protobuf message versions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the encoder unit from a descriptor set
    Generate {
        /// FileDescriptorSet written by `protoc --include_imports --descriptor_set_out`
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Conversion to synthesize, as input:output (repeatable)
        #[arg(short, long = "mapping", required = true)]
        mappings: Vec<MappingDirective>,

        /// Name of the generated file, relative to the output directory
        #[arg(short, long, default_value = "encode.rs")]
        filename: String,

        /// Module path of the generated code; its last segment names the module
        #[arg(long, default_value = "encode")]
        module_path: String,

        /// Rust path the prost-generated packages hang off
        #[arg(long, default_value = "crate")]
        types_root: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Show how each output definition differs from its input
    Diff {
        /// FileDescriptorSet written by `protoc --include_imports --descriptor_set_out`
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Conversion to classify, as input:output (repeatable)
        #[arg(short, long = "mapping", required = true)]
        mappings: Vec<MappingDirective>,

        /// Print the classification as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> miette::Result<()> {
    // stdout carries the plugin protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => {
            if atty::is(atty::Stream::Stdin) {
                eprintln!("protoc-gen-encode is a protoc plugin: run it through protoc with --encode_out, or see 'protoc-gen-encode --help'.");
                std::process::exit(1);
            }
            plugin::run_stdio()?;
        }

        Some(Commands::Generate {
            descriptor_set,
            mappings,
            filename,
            module_path,
            types_root,
            out_dir,
        }) => {
            let config = GeneratorConfig {
                mappings,
                filename,
                module_path,
                types_root,
            };
            generate(&descriptor_set, config, &out_dir)?;
        }

        Some(Commands::Diff {
            descriptor_set,
            mappings,
            json,
        }) => {
            let config = GeneratorConfig {
                mappings,
                ..Default::default()
            };
            diff(&descriptor_set, config, json)?;
        }
    }

    Ok(())
}

fn load_descriptor_set(path: &Path) -> Result<Vec<FileDef>, CompilerError> {
    let bytes = std::fs::read(path).map_err(|e| CompilerError::io(path, e.to_string()))?;
    files_from_descriptor_set(&bytes)
}

fn generate(descriptor_set: &Path, config: GeneratorConfig, out_dir: &Path) -> miette::Result<()> {
    let start = Instant::now();

    let files = load_descriptor_set(descriptor_set)?;
    let directives = config.mappings.len();
    let generated = Generator::new(config).generate(&files)?;
    let path = generated.write_to(out_dir)?;

    ui::success(&format!("Wrote {}", path.display()));
    ui::dim(&format!("{} mapping(s) from {} file(s)", directives, files.len()));
    ui::timing("Generated", start.elapsed().as_millis());
    Ok(())
}

fn diff(descriptor_set: &Path, config: GeneratorConfig, json: bool) -> miette::Result<()> {
    let files = load_descriptor_set(descriptor_set)?;
    let generator = Generator::new(config);

    if json {
        let report = generator.classify(&files)?;
        let text = serde_json::to_string_pretty(&report).map_err(|e| miette::miette!("{}", e))?;
        println!("{}", text);
        return Ok(());
    }

    let graph = SchemaGraph::build(&files);
    let diffs = generator.diffs(&graph)?;

    if diffs.is_empty() {
        ui::nope_header();
        ui::info("No mapping resolved to a pair of definitions");
        return Ok(());
    }

    println!();
    ui::box_header(&format!("{} Encoder Plan", ui::symbols::TRIANGLE));
    ui::box_line("");
    for diff in &diffs {
        let summary = diff.summary();
        let marker = ui::wiring_marker(caller_supplied(&summary));
        ui::box_line(&ui::mapping_title(&summary.input, &summary.output, &marker));
        for line in diff.format_changes().lines() {
            ui::box_line(line);
        }
        ui::box_line("");
    }
    ui::box_footer();
    Ok(())
}

/// Number of constructor arguments the caller has to supply beyond the
/// enum override hook.
fn caller_supplied(summary: &Classification) -> usize {
    match summary.kind {
        "enum" => summary.missing.len(),
        _ => summary.changed.len() + summary.extra.len() + summary.missing.len(),
    }
}
