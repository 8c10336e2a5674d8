//! Command-line surface.

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use registrar::{ContactHandle, CustomerHandle, DomainName, Tld};

#[derive(Debug, Parser)]
#[command(name = "rr", version)]
#[command(about = "Realtime Register domain management from the command line")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Print JSON to stdout instead of tab-separated lines
    #[arg(short, long, global = true, env = "RR_JSON", value_parser = FalseyValueParser::new())]
    pub json: bool,

    /// Talk to the OT&E sandbox instead of production
    #[arg(long, global = true, env = "RR_SANDBOX", value_parser = FalseyValueParser::new())]
    pub sandbox: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// API key
    #[arg(long, global = true, env = "RR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the REST base URL
    #[arg(long, global = true, env = "RR_BASE_URL")]
    pub base_url: Option<String>,

    /// Override the bulk-check host
    #[arg(long, global = true, env = "RR_ISPROXY_HOST")]
    pub isproxy_host: Option<String>,

    /// Customer handle owning contacts and prices
    #[arg(long, global = true, env = "RR_CUSTOMER", value_parser = customer_handle)]
    pub customer: Option<CustomerHandle>,

    /// Overall deadline per API call, in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Domain commands
    Domain {
        #[command(subcommand)]
        command: DomainCommand,
    },
    /// Process commands
    Process {
        #[command(subcommand)]
        command: ProcessCommand,
    },
    /// DNS zone commands
    Zone {
        #[command(subcommand)]
        command: ZoneCommand,
    },
    /// TLD commands
    Tld {
        #[command(subcommand)]
        command: TldCommand,
    },
    /// Contact commands
    Contact {
        #[command(subcommand)]
        command: ContactCommand,
    },
    /// Show the customer's registration prices
    Pricelist,
}

/// Paging flags shared by list commands.
#[derive(Debug, Clone, Args)]
pub struct Paging {
    /// Max results
    #[arg(long, default_value_t = 50)]
    pub limit: u32,

    /// Skip this many results
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Search query
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum DomainCommand {
    /// List domains
    List {
        #[command(flatten)]
        paging: Paging,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Only domains expiring within N days
        #[arg(long, default_value_t = 0)]
        expiring_within: u32,

        /// Sort field, e.g. expiryDate or -expiryDate
        #[arg(short = 's', long = "sort")]
        order: Option<String>,
    },
    /// Show one domain
    Get {
        #[arg(value_parser = domain_name)]
        domain: DomainName,
    },
    /// Check availability of one domain
    Check {
        #[arg(value_parser = domain_name)]
        domain: DomainName,
    },
    /// Check many domains over one bulk-check session
    CheckBulk {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Renew a domain
    Renew {
        #[arg(value_parser = domain_name)]
        domain: DomainName,

        /// Renewal period in years
        #[arg(long, default_value_t = 1)]
        period: u32,
    },
    /// Delete a domain
    Delete {
        #[arg(value_parser = domain_name)]
        domain: DomainName,
    },
    /// Register a domain
    Register {
        #[arg(value_parser = domain_name)]
        domain: DomainName,

        /// Registrant contact handle
        #[arg(long, value_parser = contact_handle)]
        registrant: ContactHandle,

        /// Registration period in years
        #[arg(long, default_value_t = 1)]
        period: u32,

        /// Nameservers, comma separated or repeated
        #[arg(long = "ns", value_delimiter = ',')]
        name_servers: Vec<String>,

        /// Enable auto-renew
        #[arg(long)]
        auto_renew: bool,

        /// Enable the privacy proxy
        #[arg(long)]
        privacy: bool,
    },
    /// Update registrant, nameservers or auto-renew
    Update {
        #[arg(value_parser = domain_name)]
        domain: DomainName,

        /// New registrant contact handle
        #[arg(long, value_parser = contact_handle)]
        registrant: Option<ContactHandle>,

        /// Replacement nameservers, comma separated or repeated
        #[arg(long = "ns", value_delimiter = ',')]
        name_servers: Vec<String>,

        /// Turn auto-renew on or off
        #[arg(long)]
        auto_renew: Option<bool>,
    },
    /// Start an inbound transfer
    TransferIn {
        #[arg(value_parser = domain_name)]
        domain: DomainName,

        /// Authorization code from the losing registrar
        #[arg(long)]
        auth_code: String,

        /// Registrant contact handle
        #[arg(long, value_parser = contact_handle)]
        registrant: Option<ContactHandle>,

        /// Enable auto-renew after the transfer
        #[arg(long)]
        auto_renew: bool,
    },
    /// Show the status of a transferred domain
    TransferStatus {
        #[arg(value_parser = domain_name)]
        domain: DomainName,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProcessCommand {
    /// List processes
    List {
        /// Max results
        #[arg(long, default_value_t = 50)]
        limit: u32,

        /// Skip this many results
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one process
    Get { id: u64 },
    /// Show one process with its details
    Info { id: u64 },
    /// Cancel a pending process
    Cancel { id: u64 },
    /// Resend the notifications of a process
    Resend { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum ZoneCommand {
    /// List zones
    List {
        #[command(flatten)]
        paging: Paging,
    },
    /// Show a zone and its records
    Get { id: u64 },
    /// Delete a zone
    Delete { id: u64 },
    /// Create an empty zone
    Create {
        name: String,

        /// Default TTL in seconds
        #[arg(long, default_value_t = 3600)]
        ttl: u32,
    },
    /// Change a zone's default TTL
    Update {
        id: u64,

        /// Default TTL in seconds
        #[arg(long)]
        ttl: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TldCommand {
    /// List TLDs
    List {
        #[command(flatten)]
        paging: Paging,
    },
    /// Show one TLD
    Get {
        #[arg(value_parser = tld)]
        tld: Tld,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// List contacts of the customer
    List {
        #[command(flatten)]
        paging: Paging,
    },
    /// Show one contact
    Get {
        #[arg(value_parser = contact_handle)]
        handle: ContactHandle,
    },
    /// Create a contact; name, email, phone, address, city, postal and
    /// country are required
    Create {
        #[arg(value_parser = contact_handle)]
        handle: ContactHandle,

        #[command(flatten)]
        fields: ContactFields,
    },
    /// Update the given fields of a contact
    Update {
        #[arg(value_parser = contact_handle)]
        handle: ContactHandle,

        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete a contact
    Delete {
        #[arg(value_parser = contact_handle)]
        handle: ContactHandle,
    },
}

/// Contact details shared by `contact create` and `contact update`.
#[derive(Debug, Clone, Default, Args)]
pub struct ContactFields {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Organization
    #[arg(long = "org")]
    pub organization: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number, e.g. +31.201234567
    #[arg(long)]
    pub phone: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// State or province
    #[arg(long)]
    pub state: Option<String>,

    /// Postal code
    #[arg(long = "postal")]
    pub postal_code: Option<String>,

    /// ISO 3166-1 alpha-2 country code
    #[arg(long)]
    pub country: Option<String>,
}

// ---------------------------------------------------------------------------
// Value parsers
// ---------------------------------------------------------------------------

fn domain_name(raw: &str) -> Result<DomainName, String> {
    DomainName::new(raw.trim()).ok_or_else(|| "domain name must not be empty".to_string())
}

fn tld(raw: &str) -> Result<Tld, String> {
    Tld::new(raw.trim().trim_start_matches('.')).ok_or_else(|| "TLD must not be empty".to_string())
}

fn customer_handle(raw: &str) -> Result<CustomerHandle, String> {
    CustomerHandle::new(raw.trim()).ok_or_else(|| "customer handle must not be empty".to_string())
}

fn contact_handle(raw: &str) -> Result<ContactHandle, String> {
    ContactHandle::new(raw.trim()).ok_or_else(|| "contact handle must not be empty".to_string())
}
