use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use iptv_admin::api::{
    CustomerUpdate, DnsServerUpdate, NewCustomer, NewDnsServer, NewPayment, PaymentMethod, PaymentStatus,
    SettingsUpdate, WhatsAppMessage, completed_revenue, filter_customers,
};
use iptv_admin::{AdminClient, ApiError, ClientConfig, ConfigError, SessionError};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `iptv-admin login` first")]
    NotLoggedIn,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "iptv-admin", about = "IPTV administration backend CLI")]
struct Cli {
    /// Overrides the backend origin from the environment.
    #[arg(long, env = "IPTV_BACKEND_URL")]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "IPTV_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, env = "IPTV_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    /// Public portal view for a customer; needs no login.
    Portal {
        username: String,
    },
    #[command(flatten)]
    Admin(AdminCommand),
}

/// Commands that run only after the stored credential verifies.
#[derive(Subcommand, Debug)]
enum AdminCommand {
    Users(UsersCommand),
    Dns(DnsCommand),
    Payments(PaymentsCommand),
    Settings(SettingsCommand),
    Templates(TemplatesCommand),
    Whatsapp(WhatsappCommand),
    Stats,
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List {
        /// Case-insensitive match on username or MAC address.
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        dns_id: String,
        #[arg(long, help = "YYYY-MM-DD or ISO 8601 timestamp")]
        expires_at: String,
        #[command(flatten)]
        details: CustomerDetails,
    },
    Update {
        user_id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        dns_id: Option<String>,
        #[arg(long)]
        expires_at: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[command(flatten)]
        details: CustomerDetails,
    },
    Delete {
        user_id: String,
    },
    /// Ask the backend whether the customer's playlist is reachable.
    Validate {
        user_id: String,
    },
}

#[derive(Args, Debug)]
struct CustomerDetails {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    mac_address: Option<String>,
    #[arg(long)]
    pin: Option<String>,
    #[arg(long)]
    plan_price: Option<f64>,
    #[arg(long)]
    pay_url: Option<String>,
}

// =============================================================================
// DNS
// =============================================================================

#[derive(Args, Debug)]
struct DnsCommand {
    #[command(subcommand)]
    command: DnsSubcommand,
}

#[derive(Subcommand, Debug)]
enum DnsSubcommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        active: Option<bool>,
    },
    Update {
        dns_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        dns_id: String,
    },
}

// =============================================================================
// PAYMENTS
// =============================================================================

#[derive(Args, Debug)]
struct PaymentsCommand {
    #[command(subcommand)]
    command: PaymentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PaymentsSubcommand {
    List {
        /// Print only count and completed revenue.
        #[arg(long, default_value_t = false)]
        summary: bool,
    },
    Create {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, value_enum, default_value_t = StatusArg::Completed)]
        status: StatusArg,
        #[arg(long, value_enum, default_value_t = MethodArg::Pix)]
        method: MethodArg,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        payment_id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Completed,
    Pending,
    Failed,
}

impl From<StatusArg> for PaymentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Completed => Self::Completed,
            StatusArg::Pending => Self::Pending,
            StatusArg::Failed => Self::Failed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MethodArg {
    Pix,
    Card,
    Cash,
}

impl From<MethodArg> for PaymentMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Pix => Self::Pix,
            MethodArg::Card => Self::Card,
            MethodArg::Cash => Self::Cash,
        }
    }
}

// =============================================================================
// SETTINGS / TEMPLATES / WHATSAPP
// =============================================================================

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Show,
    Update {
        #[arg(long)]
        whatsapp_support: Option<String>,
        #[arg(long)]
        welcome_message: Option<String>,
        #[arg(long)]
        whatsapp_enabled: Option<bool>,
        #[arg(long)]
        whatsapp_url: Option<String>,
        #[arg(long)]
        whatsapp_instance: Option<String>,
        #[arg(long, hide_env_values = true, env = "IPTV_WHATSAPP_TOKEN")]
        whatsapp_token: Option<String>,
    },
}

#[derive(Args, Debug)]
struct TemplatesCommand {
    #[command(subcommand)]
    command: TemplatesSubcommand,
}

#[derive(Subcommand, Debug)]
enum TemplatesSubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
    },
    Delete {
        template_id: String,
    },
}

#[derive(Args, Debug)]
struct WhatsappCommand {
    #[command(subcommand)]
    command: WhatsappSubcommand,
}

#[derive(Subcommand, Debug)]
enum WhatsappSubcommand {
    /// Message a customer; without --message the backend sends its expiry reminder.
    Send {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    Qrcode,
}

// =============================================================================
// ENTRY
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.backend_url.as_deref() {
        config = config.with_backend_url(url)?;
    }
    let client = AdminClient::new(&config)?;

    let result = dispatch(&client, cli.command).await;
    if let Err(CliError::Api(e)) = &result {
        if client.session().invalidate_on(e) {
            tracing::info!("stored credential rejected by backend; logged out");
        }
    }
    result
}

async fn dispatch(client: &AdminClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let token = client.session().login(&email, &password).await?;
            print_json(&json!({ "token_type": token.token_type, "user": client.session().current_user() }))
        }
        Command::Register { email, name, password } => {
            let token = client.session().register(&email, &name, &password).await?;
            print_json(&json!({ "token_type": token.token_type, "user": client.session().current_user() }))
        }
        Command::Logout => {
            client.session().logout();
            print_json(&json!({ "logged_out": true }))
        }
        Command::Whoami => {
            require_session(client).await?;
            print_json(&client.session().current_user())
        }
        Command::Portal { username } => print_json(&client.portal().view(&username).await?),
        Command::Admin(admin) => {
            require_session(client).await?;
            run_admin(client, admin).await
        }
    }
}

async fn run_admin(client: &AdminClient, command: AdminCommand) -> Result<(), CliError> {
    match command {
        AdminCommand::Users(users) => run_users(client, users).await,
        AdminCommand::Dns(dns) => run_dns(client, dns).await,
        AdminCommand::Payments(payments) => run_payments(client, payments).await,
        AdminCommand::Settings(settings) => run_settings(client, settings).await,
        AdminCommand::Templates(templates) => run_templates(client, templates).await,
        AdminCommand::Whatsapp(whatsapp) => run_whatsapp(client, whatsapp).await,
        AdminCommand::Stats => print_json(&client.stats().get().await?),
    }
}

/// Resolve the persisted credential against `/auth/me`.
async fn require_session(client: &AdminClient) -> Result<(), CliError> {
    client.session().initialize().await;
    if client.session().is_authenticated() { Ok(()) } else { Err(CliError::NotLoggedIn) }
}

async fn run_users(client: &AdminClient, users: UsersCommand) -> Result<(), CliError> {
    match users.command {
        UsersSubcommand::List { search } => {
            let customers = client.customers().list().await?;
            match search {
                Some(term) => print_json(&filter_customers(&customers, &term)),
                None => print_json(&customers),
            }
        }
        UsersSubcommand::Create { username, password, dns_id, expires_at, details } => {
            let new = NewCustomer {
                username,
                password,
                dns_id,
                expires_at,
                name: details.name,
                phone: details.phone,
                mac_address: details.mac_address,
                pin: details.pin,
                plan_price: details.plan_price,
                pay_url: details.pay_url,
            };
            print_json(&client.customers().create(&new).await?)
        }
        UsersSubcommand::Update { user_id, username, password, dns_id, expires_at, active, details } => {
            let update = CustomerUpdate {
                username,
                password,
                dns_id,
                name: details.name,
                phone: details.phone,
                mac_address: details.mac_address,
                expires_at,
                active,
                pin: details.pin,
                plan_price: details.plan_price,
                pay_url: details.pay_url,
            };
            print_json(&client.customers().update(&user_id, &update).await?)
        }
        UsersSubcommand::Delete { user_id } => print_json(&client.customers().delete(&user_id).await?),
        UsersSubcommand::Validate { user_id } => print_json(&client.customers().validate_m3u(&user_id).await?),
    }
}

async fn run_dns(client: &AdminClient, dns: DnsCommand) -> Result<(), CliError> {
    match dns.command {
        DnsSubcommand::List => print_json(&client.dns().list().await?),
        DnsSubcommand::Create { title, url, active } => {
            print_json(&client.dns().create(&NewDnsServer { title, url, active }).await?)
        }
        DnsSubcommand::Update { dns_id, title, url, active } => {
            print_json(&client.dns().update(&dns_id, &DnsServerUpdate { title, url, active }).await?)
        }
        DnsSubcommand::Delete { dns_id } => print_json(&client.dns().delete(&dns_id).await?),
    }
}

async fn run_payments(client: &AdminClient, payments: PaymentsCommand) -> Result<(), CliError> {
    match payments.command {
        PaymentsSubcommand::List { summary } => {
            let payments = client.payments().list().await?;
            if summary {
                print_json(&json!({
                    "count": payments.len(),
                    "completed_revenue": completed_revenue(&payments),
                }))
            } else {
                print_json(&payments)
            }
        }
        PaymentsSubcommand::Create { user_id, amount, status, method, notes } => {
            let new = NewPayment { user_id, amount, status: status.into(), method: method.into(), notes };
            print_json(&client.payments().create(&new).await?)
        }
        PaymentsSubcommand::Delete { payment_id } => print_json(&client.payments().delete(&payment_id).await?),
    }
}

async fn run_settings(client: &AdminClient, settings: SettingsCommand) -> Result<(), CliError> {
    match settings.command {
        SettingsSubcommand::Show => print_json(&client.settings().get().await?),
        SettingsSubcommand::Update {
            whatsapp_support,
            welcome_message,
            whatsapp_enabled,
            whatsapp_url,
            whatsapp_instance,
            whatsapp_token,
        } => {
            let update = SettingsUpdate {
                whatsapp_support,
                welcome_message,
                whatsapp_enabled,
                whatsapp_url,
                whatsapp_instance,
                whatsapp_token,
            };
            print_json(&client.settings().update(&update).await?)
        }
    }
}

async fn run_templates(client: &AdminClient, templates: TemplatesCommand) -> Result<(), CliError> {
    match templates.command {
        TemplatesSubcommand::List => print_json(&client.templates().list().await?),
        TemplatesSubcommand::Create { name, message } => {
            print_json(&client.templates().create(&name, &message).await?)
        }
        TemplatesSubcommand::Delete { template_id } => print_json(&client.templates().delete(&template_id).await?),
    }
}

async fn run_whatsapp(client: &AdminClient, whatsapp: WhatsappCommand) -> Result<(), CliError> {
    match whatsapp.command {
        WhatsappSubcommand::Send { user_id, phone, message } => {
            let delivery = client
                .notifications()
                .send_whatsapp(&WhatsAppMessage { user_id, phone, message })
                .await?;
            print_json(&delivery)
        }
        WhatsappSubcommand::Qrcode => {
            let qr: Value = client.notifications().qrcode().await?;
            print_json(&qr)
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
