//! Terminal client for the leads backend.
//!
//! Signs in, lists and filters leads, shows analytics and single leads
//! without a browser. The backend session is kept in a local file between
//! invocations.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (or use the demo account)
//! cargo run --bin leadctl -- login
//! cargo run --bin leadctl -- login --guest
//!
//! # List qualified leads matching "acme", oldest first
//! cargo run --bin leadctl -- leads --search acme --status Qualified --sort createdAt
//!
//! # One lead, the analytics snapshot, or an interactive pager
//! cargo run --bin leadctl -- show 65a1f0c2e4b0a1b2c3d4e5f6
//! cargo run --bin leadctl -- analytics
//! cargo run --bin leadctl -- browse
//! ```
//!
//! # Environment Variables
//!
//! - `API_URL`: backend base URL (same default as the web server)
//! - `LEADCTL_SESSION_FILE`: session file (default: `.leadctl-session`)

use leadmaster::application::services::{AuthError, AuthService, DashboardData, DashboardService, LeadService};
use leadmaster::config::Config;
use leadmaster::domain::entities::{AnalyticsSnapshot, Credentials, Lead, LeadStatus};
use leadmaster::domain::query::{ListQuery, SortKey};
use leadmaster::domain::session::{BackendSession, SessionStatus, SessionTracker};
use leadmaster::infrastructure::api::{ApiClient, HttpLeadsApi, LeadsApi};
use leadmaster::view::{
    AuthForm, AuthOutcome, DashboardState, FetchTicket, Outcome, TableRows, format_date,
    format_datetime,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password, Select};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_SESSION_FILE: &str = ".leadctl-session";

/// Terminal client for LeadMaster.
#[derive(Parser)]
#[command(name = "leadctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Use the demo account
        #[arg(long)]
        guest: bool,

        /// Email address (prompted if omitted)
        #[arg(short, long, conflicts_with = "guest")]
        email: Option<String>,
    },

    /// Create an account and store the session
    Register {
        /// Email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// End the session and forget it
    Logout,

    /// List one page of leads
    Leads {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Free-text search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Status filter (New, Contacted, Qualified, Converted, Lost)
        #[arg(long)]
        status: Option<String>,

        /// Sort key: -createdAt, createdAt, name, -name
        #[arg(long, default_value = "-createdAt", allow_hyphen_values = true)]
        sort: String,
    },

    /// Show one lead
    Show {
        /// Lead identifier
        id: String,
    },

    /// Show the analytics snapshot
    Analytics,

    /// Page through leads interactively
    Browse,
}

/// Everything a command needs: a session-carrying client and where the
/// session lives on disk.
struct Ctx {
    client: ApiClient,
    tracker: SessionTracker,
    session_file: PathBuf,
}

impl Ctx {
    fn api(&self) -> Arc<HttpLeadsApi> {
        Arc::new(HttpLeadsApi::new(self.client.clone()))
    }

    fn save_session(&self, session: &BackendSession) -> Result<()> {
        write_private(&self.session_file, session.encode().as_bytes())
            .with_context(|| format!("Failed to write {}", self.session_file.display()))
    }

    fn forget_session(&self) -> Result<()> {
        match std::fs::remove_file(&self.session_file) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.session_file.display())),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    let session_file = std::env::var("LEADCTL_SESSION_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));
    let session = load_session(&session_file)?;

    let tracker = SessionTracker::new();
    let client = ApiClient::new(&config.api_url)
        .context("Failed to build backend client")?
        .with_tracker(tracker.clone())
        .with_session(session);

    let ctx = Ctx {
        client,
        tracker,
        session_file,
    };

    let result = match cli.command {
        Commands::Login { guest, email } => login(&ctx, guest, email).await,
        Commands::Register { email } => register(&ctx, email).await,
        Commands::Logout => logout(&ctx).await,
        Commands::Leads {
            page,
            search,
            status,
            sort,
        } => {
            let query = ListQuery::new()
                .with_search(search)
                .with_status(status.filter(|s| !s.is_empty()).map(LeadStatus::from))
                .with_sort(SortKey::parse(&sort))
                .with_page(page);
            list_leads(&ctx, query).await
        }
        Commands::Show { id } => show_lead(&ctx, &id).await,
        Commands::Analytics => analytics(&ctx).await,
        Commands::Browse => browse(&ctx).await,
    };

    if result.is_err() && ctx.tracker.status() == SessionStatus::Expired {
        ctx.forget_session()?;
        println!(
            "{}",
            "⚠️  Session expired. Sign in again with `leadctl login`.".yellow()
        );
    }

    result
}

fn load_session(path: &Path) -> Result<Option<BackendSession>> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(BackendSession::decode(raw.trim())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Writes `contents` to `path`, readable and writable by the owner only.
///
/// An existing file is narrowed to `0600` before anything is written.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

/// Runs an authentication attempt through the form state machine and stores
/// the session on success.
async fn authenticate<F>(ctx: &Ctx, attempt: F) -> Result<()>
where
    F: std::future::Future<Output = Result<BackendSession, AuthError>>,
{
    let mut form = AuthForm::new();
    form.begin_submit()
        .map_err(|_| anyhow::anyhow!("A submission is already in progress"))?;

    let result = attempt.await;

    match (form.finish(&result), result) {
        (AuthOutcome::Redirect(_), Ok(session)) => {
            ctx.save_session(&session)?;
            println!("{}", "✅ Signed in".green().bold());
            Ok(())
        }
        (AuthOutcome::ShowError(message), _) => {
            println!("{} {}", "❌".red(), message.red());
            anyhow::bail!(message)
        }
        (AuthOutcome::Redirect(_), Err(e)) => Err(e.into()),
    }
}

async fn login(ctx: &Ctx, guest: bool, email: Option<String>) -> Result<()> {
    println!("{}", "🔑 Sign in".bright_blue().bold());
    println!();

    let service = AuthService::new(ctx.api());

    if guest {
        return authenticate(ctx, service.guest_login()).await;
    }

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let credentials = Credentials::new(email, password);
    authenticate(ctx, service.login(&credentials)).await
}

async fn register(ctx: &Ctx, email: Option<String>) -> Result<()> {
    println!("{}", "📝 Create account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;
    let confirm = Password::new().with_prompt("Confirm password").interact()?;

    let service = AuthService::new(ctx.api());
    let credentials = Credentials::new(email, password);
    authenticate(ctx, service.register(&credentials, &confirm)).await
}

async fn logout(ctx: &Ctx) -> Result<()> {
    AuthService::new(ctx.api()).logout().await;
    ctx.forget_session()?;

    println!("{}", "👋 Signed out".green());
    Ok(())
}

async fn list_leads(ctx: &Ctx, query: ListQuery) -> Result<()> {
    let mut view = DashboardState::new(query);
    let ticket = view.begin_fetch();
    fetch(ctx, &mut view, ticket).await?;

    if let Some(ticket) = view.past_last_page().and_then(|last| view.go_to_page(last)) {
        fetch(ctx, &mut view, ticket).await?;
    }

    print_dashboard(&view);
    Ok(())
}

/// Loads the data for `ticket` and applies it to `view`.
async fn fetch(ctx: &Ctx, view: &mut DashboardState, ticket: FetchTicket) -> Result<()> {
    let service = DashboardService::new(ctx.api());
    let result = service.load(ticket.query()).await;

    match view.apply(ticket, result) {
        Outcome::Applied | Outcome::Stale => Ok(()),
        Outcome::Unauthenticated(status) => {
            anyhow::bail!("Could not load leads (session: {status:?})")
        }
    }
}

fn print_dashboard(view: &DashboardState) {
    if let Some(DashboardData { analytics, .. }) = view.data() {
        print_analytics(analytics);
    }

    match view.rows() {
        TableRows::Skeleton(n) => {
            for _ in 0..n {
                println!("  {}", "░".repeat(60).bright_black());
            }
        }
        TableRows::Leads([]) => println!("{}", "  No leads found".yellow()),
        TableRows::Leads(leads) => print_lead_table(leads),
    }

    let pager = view.pager();
    let buttons: Vec<String> = pager
        .window()
        .into_iter()
        .map(|p| {
            if p == pager.page() {
                format!("[{p}]").bright_white().bold().to_string()
            } else {
                p.to_string().bright_black().to_string()
            }
        })
        .collect();

    println!();
    println!(
        "  Page {} of {}   {}",
        pager.page().to_string().bright_white().bold(),
        pager.total_pages().to_string().bright_white().bold(),
        buttons.join(" ")
    );
    println!();
}

/// Prints the leads table.
///
/// ```text
///   Name                 Status       Email                        Phone           Date
///   ───────────────────────────────────────────────────────────────────────────────────────
///   Ada Lovelace         Qualified    ada@example.com              555-0100        1/15/2024
/// ```
fn print_lead_table(leads: &[Lead]) {
    println!(
        "  {:<20} {:<12} {:<28} {:<15} {}",
        "Name".bright_white().bold(),
        "Status".bright_white().bold(),
        "Email".bright_white().bold(),
        "Phone".bright_white().bold(),
        "Date".bright_white().bold()
    );
    println!("  {}", "─".repeat(87).bright_black());

    for lead in leads {
        println!(
            "  {:<20} {:<12} {:<28} {:<15} {}",
            truncate(&lead.name, 20).cyan(),
            status_label(&lead.status),
            truncate(&lead.email, 28),
            truncate(&lead.phone, 15).bright_black(),
            format_date(&lead.created_at).bright_black()
        );
    }
}

fn status_label(status: &LeadStatus) -> ColoredString {
    let text = status.as_str();
    match status {
        LeadStatus::New => text.blue(),
        LeadStatus::Contacted => text.yellow(),
        LeadStatus::Qualified => text.magenta(),
        LeadStatus::Converted => text.green(),
        LeadStatus::Lost => text.bright_black(),
        LeadStatus::Other(_) => text.normal(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn print_analytics(analytics: &AnalyticsSnapshot) {
    println!("{}", "📊 Analytics".bright_blue().bold());
    println!();
    println!(
        "  Total leads:     {}",
        analytics.total_leads.to_string().bright_green().bold()
    );
    println!(
        "  Converted:       {}",
        analytics.converted_leads.to_string().bright_green().bold()
    );
    println!(
        "  Conversion rate: {}",
        format!("{}%", analytics.conversion_rate_label()).bright_magenta().bold()
    );

    if !analytics.leads_by_stage.is_empty() {
        println!();
        for stage in &analytics.leads_by_stage {
            println!("  {:<15} {}", stage.stage.bright_black(), stage.count);
        }
    }
    println!();
}

async fn analytics(ctx: &Ctx) -> Result<()> {
    let snapshot = ctx.api().analytics().await?;
    print_analytics(&snapshot);
    Ok(())
}

async fn show_lead(ctx: &Ctx, id: &str) -> Result<()> {
    let lead = LeadService::new(ctx.api()).get(id).await?;
    print_lead(&lead);
    Ok(())
}

fn print_lead(lead: &Lead) {
    println!("{}", lead.name.bright_white().bold());
    println!();
    println!("  Email:        {}", lead.email.cyan());
    println!("  Phone:        {}", lead.phone);
    println!("  Status:       {}", status_label(&lead.status));
    println!("  Created:      {}", format_datetime(&lead.created_at));
    println!(
        "  Last updated: {}",
        lead.updated_at
            .as_ref()
            .map(format_datetime)
            .unwrap_or_else(|| "Never".to_string())
    );
    println!();
}

const ACTIONS: [&str; 8] = [
    "Next page",
    "Previous page",
    "Go to page",
    "Search",
    "Filter by status",
    "Sort",
    "Open lead",
    "Quit",
];

/// Interactive pager over the lead list.
async fn browse(ctx: &Ctx) -> Result<()> {
    let mut view = DashboardState::new(ListQuery::new());
    let mut pending = Some(view.begin_fetch());

    loop {
        if let Some(ticket) = pending.take() {
            fetch(ctx, &mut view, ticket).await?;
            print_dashboard(&view);
        }

        let choice = Select::new()
            .with_prompt("What next?")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        pending = match choice {
            0 => view.next_page(),
            1 => view.prev_page(),
            2 => {
                let page: u32 = Input::new()
                    .with_prompt(format!("Page (1-{})", view.pager().total_pages()))
                    .interact_text()?;
                view.go_to_page(page)
            }
            3 => {
                let search: String = Input::new()
                    .with_prompt("Search")
                    .with_initial_text(view.query().search())
                    .allow_empty(true)
                    .interact_text()?;
                view.update_query(|q| q.with_search(search.trim()))
            }
            4 => {
                let mut labels = vec!["All Statuses".to_string()];
                labels.extend(LeadStatus::KNOWN.into_iter().map(String::from));
                let picked = Select::new()
                    .with_prompt("Status")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let status = picked
                    .checked_sub(1)
                    .and_then(|i| LeadStatus::KNOWN.get(i).cloned());
                view.update_query(|q| q.with_status(status))
            }
            5 => {
                let labels: Vec<&str> = SortKey::OPTIONS.iter().map(|(_, label)| *label).collect();
                let picked = Select::new()
                    .with_prompt("Sort")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let sort = SortKey::parse(SortKey::OPTIONS[picked].0);
                view.update_query(|q| q.with_sort(sort))
            }
            6 => {
                open_lead(ctx, &view).await?;
                None
            }
            _ => return Ok(()),
        };

        if pending.is_none() && choice < 6 {
            println!("{}", "  Nothing to change".bright_black());
        }
    }
}

async fn open_lead(ctx: &Ctx, view: &DashboardState) -> Result<()> {
    let TableRows::Leads(leads) = view.rows() else {
        return Ok(());
    };
    if leads.is_empty() {
        println!("{}", "  No leads on this page".yellow());
        return Ok(());
    }

    let names: Vec<&str> = leads.iter().map(|l| l.name.as_str()).collect();
    let picked = Select::new()
        .with_prompt("Lead")
        .items(&names)
        .default(0)
        .interact()?;

    show_lead(ctx, &leads[picked].id).await
}
