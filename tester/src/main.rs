//! Cluster Test Runner
//!
//! - `connectivity`: iperf3 server on one target, client on another, pairing
//!   checks, then both stopped
//! - `frr-config`: render the external router configuration
//! - `bgp-sessions`: wait for the external router's BGP sessions

use anyhow::Context;
use clap::{Parser, Subcommand};
use netprobe::core::frr::render_frr_conf;
use shared::logging::{init_tracing_with_level, log_error};
use shared::RemoteTarget;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use tester::{bgp_sessions, connectivity, Cluster, ConnectivityConfig};

#[derive(Parser)]
#[command(name = "tester")]
#[command(about = "Remote process checks against a live cluster")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Kubeconfig used by kubectl and virtctl
    #[arg(long, env = "KUBECONFIG")]
    kubeconfig: Option<PathBuf>,

    /// SSH private key for VM targets
    #[arg(long, env = "VM_SSH_KEY")]
    identity_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that an iperf3 client reaches a server
    Connectivity {
        /// JSON scenario file
        #[arg(long)]
        scenario: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the external FRR router configuration
    FrrConfig {
        /// Subnet advertised by the router, e.g. 172.100.0.0/16
        #[arg(long)]
        subnet: String,

        /// Cluster node address to peer with (repeatable)
        #[arg(long = "node", required = true)]
        nodes: Vec<Ipv4Addr>,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Wait for the external router to establish its BGP sessions
    BgpSessions {
        #[arg(long)]
        namespace: String,

        /// FRR pod name
        #[arg(long)]
        pod: String,

        #[arg(long, default_value = "frr")]
        container: String,

        /// Number of cluster nodes expected to peer
        #[arg(long)]
        expected: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    init_tracing_with_level(Some(&args.log_level));

    let cluster = Cluster::new(args.kubeconfig).with_identity_file(args.identity_file);
    tracing::debug!("Using kubeconfig {:?}", cluster.kubeconfig());

    match args.command {
        Command::Connectivity { scenario, json } => run_connectivity(&cluster, &scenario, json).await,
        Command::FrrConfig { subnet, nodes, output } => {
            let conf = render_frr_conf(&subnet, &nodes)?;
            match output {
                Some(path) => std::fs::write(&path, format!("{conf}\n"))
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{conf}"),
            }
            Ok(())
        }
        Command::BgpSessions {
            namespace,
            pod,
            container,
            expected,
        } => {
            let frr = cluster.executor_for(&RemoteTarget::pod(namespace, pod, container))?;
            bgp_sessions(frr.as_ref(), expected).await?;
            Ok(())
        }
    }
}

async fn run_connectivity(cluster: &Cluster, scenario: &Path, json: bool) -> anyhow::Result<()> {
    let config = ConnectivityConfig::from_file(scenario)?;
    let server = cluster.executor_for(&config.server)?;
    let client = cluster.executor_for(&config.client)?;

    // Every step is bounded by its own poll budget or command timeout
    let report = match connectivity(server, client, &config).await {
        Ok(report) => report,
        Err(e) => {
            log_error("connectivity", &e);
            return Err(e);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for assertion in report.assertions() {
            let mark = if assertion.success { "✅" } else { "❌" };
            match &assertion.details {
                Some(details) => println!("{mark} {} ({details})", assertion.message),
                None => println!("{mark} {}", assertion.message),
            }
        }
    }

    if !report.passed() {
        anyhow::bail!("Connectivity checks failed");
    }
    Ok(())
}
