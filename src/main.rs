// ==========================================================
//  hostflow - concurrent host reconnaissance
// ==========================================================

use anyhow::Context;
use clap::Parser;
use hostflow::config::PingMethod;
use hostflow::{
    table, BatchSummary, Classifier, HostBatch, HostFlowError, Inventory, NetworkProber,
    ReconciliationEngine, ScanConfig, Scheduler,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hostflow")]
#[command(about = "Check reachability, DNS and remote access for a list of hosts.")]
struct CommandLine {
    /// File with one host per line; reads stdin when omitted
    hosts: Option<PathBuf>,

    /// Semicolon separated inventory file keyed by host code
    #[arg(short, long)]
    inventory: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of hosts probed at once
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Maximum number of hosts accepted in one batch
    #[arg(long)]
    max_hosts: Option<usize>,

    #[arg(long)]
    ping_timeout_ms: Option<u64>,

    #[arg(long)]
    port_timeout_ms: Option<u64>,

    /// Send echo requests from an ICMP socket instead of the ping utility
    #[arg(long)]
    icmp: bool,

    /// Order results by category instead of completion order
    #[arg(long)]
    sort: bool,

    /// Print one JSON object per host instead of a table
    #[arg(long)]
    json: bool,

    /// Log filter, e.g. `info` or `hostflow=debug`
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl CommandLine {
    fn scan_config(&self) -> anyhow::Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ScanConfig::default(),
        };
        if let Some(jobs) = self.jobs {
            config.set_concurrency(jobs);
        }
        if let Some(max) = self.max_hosts {
            config.max_batch_size = max;
        }
        if let Some(ms) = self.ping_timeout_ms {
            config.ping_timeout_ms = ms;
        }
        if let Some(ms) = self.port_timeout_ms {
            config.port_timeout_ms = ms;
        }
        if self.icmp {
            config.ping_method = PingMethod::Icmp;
        }
        config.validate()?;
        Ok(config)
    }

    fn read_hosts(&self) -> anyhow::Result<HostBatch> {
        let text = match &self.hosts {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading hosts from {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        Ok(HostBatch::from_lines(&text))
    }

    fn load_inventory(&self) -> Inventory {
        let Some(path) = &self.inventory else {
            return Inventory::new();
        };
        Inventory::from_csv_path(path).unwrap_or_else(|e| {
            warn!("Could not load inventory {}: {e}", path.display());
            Inventory::new()
        })
    }
}

fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} hosts ({eta})",
    ) {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse();
    init_logging(&cli.log_level);

    let config = cli.scan_config()?;
    let batch = cli.read_hosts()?;
    if !batch.rejected().is_empty() {
        eprintln!("Ignored {} invalid host entries", batch.rejected().len());
    }

    let prober = NetworkProber::from_config(&config);
    info!("Pinging with {}", prober.ping_strategy());
    let engine = ReconciliationEngine::new(
        Arc::new(prober),
        Arc::new(cli.load_inventory()),
        &config,
    );
    let scheduler = Scheduler::new(Arc::new(engine), &config);

    let run = match scheduler.submit(batch) {
        Ok(run) => run,
        Err(e @ HostFlowError::BatchSizeExceeded { .. }) | Err(e @ HostFlowError::EmptyBatch) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    let cancel = run.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted, stopping batch...");
            cancel.cancel();
        }
    });

    let bar = progress_bar(run.total());
    let mut records = run
        .collect_with_progress(|record, _, _| {
            bar.set_message(record.host.clone());
            bar.inc(1);
        })
        .await;
    bar.finish_and_clear();

    let classifier = Classifier::new(config.domain_suffixes.clone());
    if cli.sort {
        classifier.sort_by_category(&mut records);
    }

    if cli.json {
        for record in &records {
            let line = serde_json::json!({
                "record": record,
                "classification": classifier.classify(record),
            });
            println!("{line}");
        }
    } else {
        println!("{}", table::records_table(&records, &classifier));
        println!();
        for line in table::summary_lines(&BatchSummary::tally(&records, &classifier)) {
            println!("{line}");
        }
    }
    Ok(())
}
