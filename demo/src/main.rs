//! ecnflow approval client demo CLI
//!
//! Runs the offline approval scenarios against the in-memory reference
//! backend, or sends single actions to a live backend.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- approval-flow
//!   cargo run -p demo -- --base-url http://localhost:8000/api/v1 approve --instance 1001 --comment "ok"
//!   cargo run -p demo -- --config client.toml list ecns --status draft

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecnflow_config::ClientConfig;
use ecnflow_contracts::{
    approval::ActionKind,
    error::{EcnflowError, EcnflowResult},
    ids::{EcnId, InstanceId, UserId},
    page::{ListQuery, ResourceKind},
};
use ecnflow_core::{
    traits::ListSource, ActionDialogController, BatchSelection, BatchSubmitController,
    PageRefresher, SubmitOutcome,
};
use ecnflow_http::HttpGateway;
use ecnflow_notify::{FanoutNotifier, InMemoryNotifier, TracingNotifier};
use ecnflow_ref::{
    print_toasts,
    scenarios::{approval_flow, batch_submit, delegate_flow, failure_flow},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// ecnflow: approve, reject, delegate and batch-submit ECNs.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "ecnflow approval client demo",
    long_about = "Runs the offline approval scenarios against an in-memory backend,\n\
                  or sends approval actions to a live backend."
)]
struct Cli {
    /// TOML file with the backend connection settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API root URL. Overrides `base_url` from --config.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four offline scenarios in sequence.
    RunAll,
    /// Scenario 1: approve an ECN, then approve it again.
    ApprovalFlow,
    /// Scenario 2: delegate an approval to another user.
    DelegateFlow,
    /// Scenario 3: batch-submit three draft ECNs.
    BatchSubmit,
    /// Scenario 4: the backend fails a rejection.
    FailureFlow,

    /// Approve an approval instance on the live backend.
    Approve {
        #[arg(long)]
        instance: u64,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Reject an approval instance on the live backend.
    Reject {
        #[arg(long)]
        instance: u64,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Delegate an approval instance to another user.
    Delegate {
        #[arg(long)]
        instance: u64,
        /// User id of the delegate.
        #[arg(long)]
        to: Option<u64>,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Submit several ECNs for approval in one request.
    Batch {
        /// ECN id; repeat for each ECN.
        #[arg(long = "ecn")]
        ecns: Vec<u64>,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Fetch one page of a list screen.
    List {
        resource: Resource,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Defaults to `default_page_size` from the config.
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Resource {
    Ecns,
    Evaluations,
    Tasks,
    PurchaseOrders,
    DispatchOrders,
    IssueTemplates,
    SalesTemplates,
    Approvals,
}

impl From<Resource> for ResourceKind {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Ecns => ResourceKind::Ecns,
            Resource::Evaluations => ResourceKind::Evaluations,
            Resource::Tasks => ResourceKind::Tasks,
            Resource::PurchaseOrders => ResourceKind::PurchaseOrders,
            Resource::DispatchOrders => ResourceKind::DispatchOrders,
            Resource::IssueTemplates => ResourceKind::IssueTemplates,
            Resource::SalesTemplates => ResourceKind::SalesTemplates,
            Resource::Approvals => ResourceKind::Approvals,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for controller lifecycle events.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all().await,
        Command::ApprovalFlow => approval_flow::run_scenario().await,
        Command::DelegateFlow => delegate_flow::run_scenario().await,
        Command::BatchSubmit => batch_submit::run_scenario().await,
        Command::FailureFlow => failure_flow::run_scenario().await,
        live => match load_config(cli.config, cli.base_url) {
            Ok(config) => run_live(config, live).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => {
            println!("Done.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Offline scenarios ─────────────────────────────────────────────────────────

async fn run_all() -> EcnflowResult<()> {
    approval_flow::run_scenario().await?;
    delegate_flow::run_scenario().await?;
    batch_submit::run_scenario().await?;
    failure_flow::run_scenario().await?;
    Ok(())
}

// ── Live backend ──────────────────────────────────────────────────────────────

fn load_config(path: Option<PathBuf>, base_url: Option<String>) -> EcnflowResult<ClientConfig> {
    let config = match (path, base_url) {
        (Some(path), Some(url)) => ClientConfig::from_file(&path)?.override_base_url(url)?,
        (Some(path), None) => ClientConfig::from_file(&path)?,
        (None, Some(url)) => ClientConfig::with_base_url(url),
        (None, None) => {
            return Err(EcnflowError::ConfigError {
                reason: "no backend configured: pass --config or --base-url".to_string(),
            })
        }
    };
    config.validate()?;
    Ok(config)
}

async fn run_live(config: ClientConfig, command: Command) -> EcnflowResult<()> {
    info!(base_url = %config.api_root(), "connecting to backend");
    let page_size = config.default_page_size;
    let gateway = Arc::new(HttpGateway::new(config)?);

    let toasts = InMemoryNotifier::new();
    let notifier = FanoutNotifier::new()
        .with(Arc::new(toasts.clone()))
        .with(Arc::new(TracingNotifier));

    let outcome = match command {
        Command::Approve { instance, comment } => {
            let refresher = approvals_refresher(&gateway, page_size);
            let mut dialog = ActionDialogController::new(InstanceId(instance));
            dialog.open(ActionKind::Approve)?;
            dialog.set_comment(comment)?;
            dialog.submit(gateway.as_ref(), &refresher, &notifier).await?
        }
        Command::Reject { instance, comment } => {
            let refresher = approvals_refresher(&gateway, page_size);
            let mut dialog = ActionDialogController::new(InstanceId(instance));
            dialog.open(ActionKind::Reject)?;
            dialog.set_comment(comment)?;
            dialog.submit(gateway.as_ref(), &refresher, &notifier).await?
        }
        Command::Delegate {
            instance,
            to,
            comment,
        } => {
            let refresher = approvals_refresher(&gateway, page_size);
            let mut dialog = ActionDialogController::new(InstanceId(instance));
            dialog.open(ActionKind::Delegate)?;
            if let Some(user) = to {
                dialog.select_delegate(UserId(user))?;
            }
            dialog.set_comment(comment)?;
            dialog.submit(gateway.as_ref(), &refresher, &notifier).await?
        }
        Command::Batch { ecns, comment } => {
            let refresher = PageRefresher::new(
                gateway.clone(),
                ResourceKind::Ecns,
                ListQuery::with_page_size(page_size),
            );
            let mut selection: BatchSelection = ecns.into_iter().map(EcnId).collect();
            let mut dialog = BatchSubmitController::new();
            dialog.open()?;
            dialog.set_comment(comment)?;
            dialog
                .submit(&mut selection, gateway.as_ref(), &refresher, &notifier)
                .await?
        }
        Command::List {
            resource,
            page,
            page_size: size,
            status,
            keyword,
        } => {
            let kind = ResourceKind::from(resource);
            let mut query = ListQuery {
                page,
                ..ListQuery::with_page_size(size.unwrap_or(page_size))
            };
            query.status = status;
            query.keyword = keyword;
            let listed = gateway.list(kind, &query).await?;
            println!("{} (page {}, {} total)", kind, query.page, listed.total);
            for item in &listed.items {
                println!("  {}", item);
            }
            println!();
            return Ok(());
        }
        _ => return Ok(()),
    };

    print_toasts(&toasts);
    println!();
    match outcome {
        SubmitOutcome::Succeeded => Ok(()),
        SubmitOutcome::Invalid(err) | SubmitOutcome::Failed(err) => Err(err),
    }
}

fn approvals_refresher(gateway: &Arc<HttpGateway>, page_size: u32) -> PageRefresher {
    PageRefresher::new(
        gateway.clone(),
        ResourceKind::Approvals,
        ListQuery::with_page_size(page_size),
    )
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("ecnflow - ECN approval client");
    println!("=============================");
    println!();
    println!("Every confirm goes through the same steps:");
    println!("  [1] The dialog form is validated; a missing comment or delegate stops here");
    println!("  [2] One request is sent; a second confirm while it is in flight is refused");
    println!("  [3] The dialog closes and the form resets, whatever the outcome");
    println!("  [4] On success the list is re-fetched; on failure the server's message is shown");
    println!();
}
