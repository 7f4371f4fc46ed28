/*!
 * Modeler CLI - Command Line Interface
 *
 * Drives the Zeebe endpoint client manager and prints the editor tables the
 * desktop shell consumes. Gateway commands print JSON outcomes on stdout;
 * diagnostics go to stderr or the configured log file.
 */

use anyhow::Context;
use clap::{Parser, Subcommand};
use modeler::{
    commands::{self, CommandOutput, EndpointArgs},
    config::ModelerConfig,
    engines::{self, Engine, PROFILES},
    error::{ModelerError, EXIT_FAILURE, EXIT_FATAL, EXIT_SUCCESS},
    filters, logging,
    menu::{self, EditState, WindowMenuState},
    DISABLE_ADJUST_ORIGIN,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use zeebe_connect::{DiagramType, ZeebeApi, ZEEBE_SSL_CERTIFICATE};

#[derive(Parser)]
#[command(name = "modeler")]
#[command(version, about = "Deploy and run BPMN/DMN definitions against Zeebe gateways", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/modeler/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Custom root certificate for TLS connections
    #[arg(long, value_name = "PATH", global = true)]
    zeebe_ssl_certificate: Option<String>,

    /// Log file path (default: stderr)
    #[arg(long = "log", value_name = "FILE", global = true)]
    log: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a gateway answers
    Check {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Deploy a BPMN or DMN file
    Deploy {
        #[command(flatten)]
        endpoint: EndpointArgs,

        /// Definition file
        file: PathBuf,

        /// Deployment name (default: file name)
        #[arg(long, default_value = "")]
        name: String,

        /// Diagram type (bpmn, dmn)
        #[arg(long, default_value = "bpmn")]
        diagram_type: DiagramType,
    },

    /// Start an instance of the latest process version
    Run {
        #[command(flatten)]
        endpoint: EndpointArgs,

        /// BPMN process id
        process_id: String,

        /// Variables as a JSON object
        #[arg(long, default_value = "{}")]
        variables: String,
    },

    /// Print the gateway version
    Version {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Print file dialog filters
    Filters {
        /// File types (all, supported, images, bpmn, dmn, cmmn, png, jpeg, svg)
        #[arg(required = true)]
        types: Vec<String>,
    },

    /// Print execution platform profiles
    Engines {
        /// Only print the latest stable version of this platform
        #[arg(long)]
        platform: Option<String>,
    },

    /// Print menu entries
    Menu {
        #[command(subcommand)]
        menu: MenuCommand,
    },
}

#[derive(Subcommand)]
enum MenuCommand {
    /// Edit menu of a BPMN editor
    Edit {
        /// Editor state as a JSON object, e.g. '{"undo":true,"handTool":true}'
        #[arg(long, default_value = "{}")]
        state: String,
    },

    /// Window menu of a BPMN editor
    BpmnWindow {
        #[arg(long)]
        zoom: bool,

        #[arg(long)]
        properties_panel: bool,
    },
}

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<ModelerError>()
                .map(ModelerError::exit_code)
                .unwrap_or(EXIT_FATAL)
        }
    };
    std::process::exit(code);
}

async fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    let mut config = ModelerConfig::load(cli.config.as_deref())?;

    // CLI flags override file values
    if let Some(certificate) = cli.zeebe_ssl_certificate {
        config
            .flags
            .insert(ZEEBE_SSL_CERTIFICATE.to_string(), certificate);
    }
    if cli.log.is_some() {
        config.log_file = cli.log;
    }
    config.verbose |= cli.verbose;

    if let Err(e) = logging::init_logging(&config) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match cli.command {
        Commands::Check { endpoint } => {
            let (api, endpoint) = gateway(&config, endpoint)?;
            report(commands::check(&api, &endpoint).await?)
        }
        Commands::Deploy {
            endpoint,
            file,
            name,
            diagram_type,
        } => {
            let (api, endpoint) = gateway(&config, endpoint)?;
            report(commands::deploy(&api, &endpoint, &name, &file, diagram_type).await?)
        }
        Commands::Run {
            endpoint,
            process_id,
            variables,
        } => {
            let (api, endpoint) = gateway(&config, endpoint)?;
            let output = commands::run(&api, &endpoint, &process_id, &variables)
                .await
                .context("Invalid --variables")?;
            report(output)
        }
        Commands::Version { endpoint } => {
            let (api, endpoint) = gateway(&config, endpoint)?;
            report(commands::version(&api, &endpoint).await?)
        }
        Commands::Filters { types } => {
            print_json(&filters::get_filters(&types)?)?;
            Ok(EXIT_SUCCESS)
        }
        Commands::Engines { platform } => {
            match platform {
                Some(platform) => {
                    let engine: Engine = platform.parse()?;
                    print_json(&serde_json::json!({
                        "executionPlatform": engine.name(),
                        "label": engine.label(),
                        "latestStable": engines::get_latest_stable(engine.name())?,
                    }))?;
                }
                None => print_json(&PROFILES)?,
            }
            Ok(EXIT_SUCCESS)
        }
        Commands::Menu { menu } => {
            let entries = match menu {
                MenuCommand::Edit { state } => {
                    let state: EditState =
                        serde_json::from_str(&state).context("Invalid --state")?;
                    menu::bpmn_edit_menu(&state, config.flag_enabled(DISABLE_ADJUST_ORIGIN))
                }
                MenuCommand::BpmnWindow {
                    zoom,
                    properties_panel,
                } => menu::bpmn_window_menu(&WindowMenuState {
                    zoom,
                    properties_panel,
                }),
            };
            print_json(&entries)?;
            Ok(EXIT_SUCCESS)
        }
    }
}

/// Client manager and resolved endpoint for a gateway subcommand
fn gateway(
    config: &ModelerConfig,
    args: EndpointArgs,
) -> Result<(ZeebeApi, zeebe_connect::EndpointDescriptor), ModelerError> {
    let endpoint = args.resolve(config.endpoint.clone())?;
    debug!("Using endpoint {}", endpoint.redacted());

    let api = ZeebeApi::with_defaults(Arc::new(config.flags.clone()));
    Ok((api, endpoint))
}

fn report(output: CommandOutput) -> anyhow::Result<i32> {
    print_json(&output)?;
    Ok(if output.success {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(ModelerError::from)?;
    println!("{}", json);
    Ok(())
}
