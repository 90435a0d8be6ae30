use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oat_core::config::{self, CONFIG_FILE_NAME, OatConfig, OutputFormat};
use oat_core::parse::{self, spec::OpenApiDocument};
use oat_core::tool::ToolSet;
use oat_core::{CompileOptions, compile_with_options};

#[derive(Parser)]
#[command(
    name = "oat",
    about = "Compile OpenAPI 3.x documents into LLM tool descriptors",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an OpenAPI document into a tool set
    Compile {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file. Writes to stdout when neither this nor the config sets one
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,

        /// Name reported in the server block
        #[arg(long)]
        server_name: Option<String>,
    },

    /// Validate an OpenAPI document
    Validate {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List the tools a document compiles to
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: FormatArg,
    },

    /// Initialize a new oat configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            output,
            format,
            server_name,
        } => cmd_compile(input, output, format, server_name),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oat", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OatConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Read and dereference a document, choosing the parser by file extension.
fn load_document(path: &Path) -> Result<OpenApiDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let doc = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(doc)
}

fn render(tools: &ToolSet, format: OutputFormat, pretty: bool) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(tools)? + "\n",
        OutputFormat::Json => serde_json::to_string(tools)? + "\n",
        OutputFormat::Yaml => serde_yaml_ng::to_string(tools)?,
    };
    Ok(rendered)
}

fn cmd_compile(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<FormatArg>,
    server_name: Option<String>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));
    let format = format.map(OutputFormat::from).unwrap_or(cfg.format);
    let options = CompileOptions {
        server_name: server_name.unwrap_or(cfg.server_name),
    };

    log::debug!(
        "compiling {} as server {:?} ({:?})",
        input.display(),
        options.server_name,
        format
    );

    let doc = load_document(&input)?;
    let tools = compile_with_options(&doc, &options);
    let rendered = render(&tools, format, cfg.pretty)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory {}", parent.display())
                })?;
            }
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Compiled {} tools to {}", tools.tools.len(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let doc = load_document(&input)?;

    eprintln!("Valid OpenAPI {} document: {}", doc.openapi, doc.title());
    if let Some(ref info) = doc.info {
        eprintln!("  Version: {}", info.version);
    }
    eprintln!("  Servers: {}", doc.servers.len());
    eprintln!("  Paths: {}", doc.paths.len());

    let operations: usize = doc.paths.values().map(|item| item.operations().count()).sum();
    eprintln!("  Operations: {operations}");

    if let Some(ref components) = doc.components {
        eprintln!("  Security schemes: {}", components.security_schemes.len());
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: FormatArg) -> Result<()> {
    let doc = load_document(&input)?;
    let tools = compile_with_options(&doc, &CompileOptions::default());

    let summary = build_inspect_summary(&doc, &tools);

    match format {
        FormatArg::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        FormatArg::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(doc: &OpenApiDocument, tools: &ToolSet) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = tools
        .tools
        .iter()
        .map(|tool| {
            serde_json::json!({
                "name": tool.name,
                "method": tool.request_template.method,
                "url": tool.request_template.url,
                "args": tool.args.iter().map(|a| &a.name).collect::<Vec<_>>(),
                "security": tool.request_template.security.as_ref().map(|s| &s.id),
                "describes_response": !tool.response_template.is_empty(),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": doc.title(),
            "openapi": doc.openapi,
        },
        "tools": entries,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
