//! Command tree for the `ops360` binary.
//!
//! Each subcommand corresponds to one console screen; the dispatcher maps
//! it onto a route and runs that route's guard before anything executes.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Route;

/// Ops360 sales-operations console.
#[derive(Debug, Parser)]
#[command(name = "ops360", version, about = "Ops360 sales operations console")]
pub struct Cli {
    /// API origin override.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Session file override.
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Request timeout override, in seconds.
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Screen to open.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level screens.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and persist the session.
    Login {
        /// Login email.
        #[arg(long)]
        email: String,
        /// Login password.
        #[arg(long, env = "OPS360_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the session and return to the login screen.
    Logout,
    /// Show the current actor and role.
    Whoami,
    /// KPI dashboard for one rep.
    Kpi {
        /// Rep name; defaults to yourself when signed in as staff.
        rep: Option<String>,
        /// Restrict to one month, e.g. 2025-06.
        #[arg(long)]
        month: Option<String>,
        /// Restrict to one week within the month.
        #[arg(long)]
        week: Option<u8>,
        /// Restrict to one quarter.
        #[arg(long)]
        quarter: Option<u8>,
    },
    /// Weekly meeting reports.
    #[command(subcommand)]
    Meetings(MeetingsCommand),
    /// Pipeline funnel and summary.
    #[command(subcommand)]
    Pipeline(PipelineCommand),
    /// Deals / opportunities.
    #[command(subcommand)]
    Opportunities(OpportunitiesCommand),
    /// Customer directory.
    #[command(subcommand)]
    Customers(CustomersCommand),
    /// Staff user management.
    #[command(subcommand)]
    Users(UsersCommand),
    /// Admin management and invites.
    #[command(subcommand)]
    Admins(AdminsCommand),
    /// Audit trail.
    #[command(subcommand)]
    Audit(AuditCommand),
    /// Password reset flows.
    #[command(subcommand)]
    Password(PasswordCommand),
}

/// Meetings screen actions.
#[derive(Debug, Subcommand)]
pub enum MeetingsCommand {
    /// List meetings from uploaded weekly reports.
    List {
        /// Restrict to one rep; staff users always see their own.
        #[arg(long)]
        rep: Option<String>,
        /// Restrict to one month, e.g. 2025-06.
        #[arg(long)]
        month: Option<String>,
        /// Restrict to one week within the month.
        #[arg(long)]
        week: Option<u8>,
        /// Page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size.
        #[arg(long, default_value_t = 15)]
        limit: u32,
    },
    /// Upload a weekly report spreadsheet.
    Upload {
        /// Spreadsheet file.
        file: PathBuf,
        /// Rep the report belongs to.
        #[arg(long)]
        rep: String,
        /// Month the report covers, e.g. 2025-06.
        #[arg(long)]
        month: String,
        /// Week within the month.
        #[arg(long)]
        week: u8,
    },
    /// Calendar months available for targeting an upload.
    Months,
    /// Calendar weeks inside one month.
    Weeks {
        /// Month, e.g. 2025-06.
        #[arg(long)]
        month: String,
    },
}

/// Pipeline screen actions.
#[derive(Debug, Subcommand)]
pub enum PipelineCommand {
    /// Funnel stage totals and the year summary.
    Summary {
        /// Pipeline year.
        #[arg(long)]
        year: Option<i32>,
        /// Restrict to one quarter.
        #[arg(long)]
        quarter: Option<u8>,
        /// Restrict to one sales owner id.
        #[arg(long)]
        sales_owner: Option<i64>,
        /// Restrict to one stage id.
        #[arg(long)]
        stage: Option<i64>,
    },
    /// Deal stage reference data.
    Stages,
    /// Quarters that already carry pipeline data.
    Quarters,
    /// Upload a pipeline spreadsheet.
    Upload {
        /// Spreadsheet file.
        file: PathBuf,
        /// Pipeline year the sheet covers.
        #[arg(long)]
        year: i32,
        /// Attribute every deal to this sales owner id.
        #[arg(long)]
        sales_owner: Option<i64>,
    },
}

/// Opportunity screen actions.
#[derive(Debug, Subcommand)]
pub enum OpportunitiesCommand {
    /// List deals.
    List {
        /// Pipeline year.
        #[arg(long)]
        year: Option<i32>,
        /// Restrict to one quarter.
        #[arg(long)]
        quarter: Option<u8>,
        /// Restrict to one sales owner id.
        #[arg(long)]
        sales_owner: Option<i64>,
        /// Restrict to deals with any of these pre-sales owner ids.
        #[arg(long)]
        pre_sales: Vec<i64>,
        /// Restrict to one stage id.
        #[arg(long)]
        stage: Option<i64>,
        /// Page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size.
        #[arg(long, default_value_t = 15)]
        limit: u32,
    },
    /// Show one deal.
    Show {
        /// External deal id, e.g. OP-2025-004.
        deal_id: String,
    },
    /// Create a deal.
    Create {
        /// Deal name.
        #[arg(long)]
        name: String,
        /// Customer name.
        #[arg(long)]
        customer: String,
        /// Deal value.
        #[arg(long)]
        amount: f64,
        /// Stage id.
        #[arg(long)]
        stage: Option<i64>,
        /// Pipeline year.
        #[arg(long)]
        year: i32,
        /// Quarter within the year.
        #[arg(long)]
        quarter: Option<u8>,
        /// Sales owner id.
        #[arg(long)]
        sales_owner: Option<i64>,
        /// Pre-sales owner ids.
        #[arg(long)]
        pre_sales: Vec<i64>,
        /// Expected close date, e.g. 2025-09-30.
        #[arg(long)]
        close_date: Option<String>,
    },
    /// Update a deal.
    Update {
        /// External deal id.
        deal_id: String,
        /// New deal name.
        #[arg(long)]
        name: Option<String>,
        /// New deal value.
        #[arg(long)]
        amount: Option<f64>,
        /// New stage id.
        #[arg(long)]
        stage: Option<i64>,
        /// New quarter.
        #[arg(long)]
        quarter: Option<u8>,
        /// New sales owner id.
        #[arg(long)]
        sales_owner: Option<i64>,
        /// New expected close date.
        #[arg(long)]
        close_date: Option<String>,
    },
    /// Delete a deal.
    Delete {
        /// External deal id.
        deal_id: String,
    },
}

/// Customer screen actions.
#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers.
    List {
        /// Page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size.
        #[arg(long, default_value_t = 15)]
        limit: u32,
    },
    /// Show one customer with its contacts.
    Show {
        /// Customer id.
        id: i64,
    },
    /// Create a customer.
    Create {
        /// Customer name.
        #[arg(long)]
        name: String,
    },
    /// Rename a customer.
    Rename {
        /// Customer id.
        id: i64,
        /// New name.
        #[arg(long)]
        name: String,
    },
    /// Add a contact to a customer.
    AddContact {
        /// Customer id.
        id: i64,
        /// Contact name.
        #[arg(long)]
        name: Option<String>,
        /// Contact email.
        #[arg(long)]
        email: Option<String>,
        /// Contact mobile.
        #[arg(long)]
        mobile: Option<String>,
    },
    /// Edit one contact of a customer.
    EditContact {
        /// Customer id.
        id: i64,
        /// Contact id.
        contact_id: i64,
        /// New contact name.
        #[arg(long)]
        name: Option<String>,
        /// New contact email.
        #[arg(long)]
        email: Option<String>,
        /// New contact mobile.
        #[arg(long)]
        mobile: Option<String>,
    },
}

/// Staff user screen actions.
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List staff users.
    List {
        /// Restrict to one department.
        #[arg(long)]
        department: Option<String>,
        /// Restrict to active or inactive users.
        #[arg(long)]
        status: Option<String>,
        /// Page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size.
        #[arg(long, default_value_t = 15)]
        limit: u32,
    },
    /// Show one staff user.
    Show {
        /// User id.
        id: i64,
    },
    /// Create a staff user.
    Create {
        /// Given name.
        #[arg(long)]
        first_name: String,
        /// Family name.
        #[arg(long)]
        last_name: String,
        /// Login email.
        #[arg(long)]
        email: String,
        /// Department, e.g. SALES.
        #[arg(long)]
        department: String,
        /// Yearly sales target.
        #[arg(long)]
        yearly_target: f64,
    },
    /// Update a staff user.
    Update {
        /// User id.
        id: i64,
        /// New given name.
        #[arg(long)]
        first_name: Option<String>,
        /// New family name.
        #[arg(long)]
        last_name: Option<String>,
        /// New login email.
        #[arg(long)]
        email: Option<String>,
        /// New department.
        #[arg(long)]
        department: Option<String>,
        /// New yearly target.
        #[arg(long)]
        yearly_target: Option<f64>,
    },
    /// Deactivate a staff user.
    Deactivate {
        /// User id.
        id: i64,
    },
}

/// Admin screen actions.
#[derive(Debug, Subcommand)]
pub enum AdminsCommand {
    /// List admin accounts.
    List {
        /// Page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size.
        #[arg(long, default_value_t = 15)]
        limit: u32,
    },
    /// Invite a new admin by email.
    Invite {
        /// Invitee email.
        #[arg(long)]
        email: String,
    },
    /// Accept an admin invite with the emailed token.
    AcceptInvite {
        /// Invite token.
        #[arg(long)]
        token: String,
        /// Chosen password.
        #[arg(long, env = "OPS360_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Audit screen actions.
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List audit entries.
    List {
        /// Restrict to USER or ADMIN actors.
        #[arg(long)]
        actor_type: Option<String>,
        /// Restrict to one action verb.
        #[arg(long)]
        action: Option<String>,
        /// Restrict to one entity kind.
        #[arg(long)]
        entity: Option<String>,
        /// Page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size.
        #[arg(long, default_value_t = 15)]
        limit: u32,
    },
    /// Show one audit entry.
    Show {
        /// Entry id.
        id: i64,
    },
}

/// Password reset actions.
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Ask for a password-reset email.
    RequestReset {
        /// Account email.
        #[arg(long)]
        email: String,
    },
    /// Complete a password reset with the emailed token.
    Reset {
        /// Reset token.
        #[arg(long)]
        token: String,
        /// New password.
        #[arg(long, env = "OPS360_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

impl Command {
    /// The route a command navigates to; its guard runs before execution.
    pub fn route(&self) -> Route {
        match self {
            Self::Login { .. } => Route::Login,
            Self::Logout | Self::Whoami => Route::Login,
            Self::Kpi { .. } => Route::Dashboard,
            Self::Meetings(_) => Route::Meetings,
            Self::Pipeline(_) => Route::Pipeline,
            Self::Opportunities(_) => Route::Opportunities,
            Self::Customers(_) => Route::Customers,
            Self::Users(_) => Route::Users,
            Self::Admins(AdminsCommand::AcceptInvite { .. }) => Route::SetPassword,
            Self::Admins(_) => Route::Admins,
            Self::Audit(_) => Route::AuditLogs,
            Self::Password(_) => Route::ForgotPassword,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Access;
    use rstest::rstest;

    #[rstest]
    fn the_command_tree_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[rstest]
    fn invite_acceptance_is_reachable_without_a_session() {
        let command = Command::Admins(AdminsCommand::AcceptInvite {
            token: "tok".to_owned(),
            password: "pw".to_owned(),
        });
        assert_eq!(command.route().access(), Access::Public);
    }

    #[rstest]
    fn admin_listing_is_gated_behind_the_admins_route() {
        let command = Command::Admins(AdminsCommand::List { page: 1, limit: 15 });
        assert_eq!(command.route(), Route::Admins);
    }

    #[rstest]
    fn kpi_parses_with_filters() {
        let cli = Cli::parse_from([
            "ops360", "kpi", "Ben Okafor", "--month", "2025-06", "--week", "2",
        ]);
        match cli.command {
            Command::Kpi { rep, month, week, quarter } => {
                assert_eq!(rep.as_deref(), Some("Ben Okafor"));
                assert_eq!(month.as_deref(), Some("2025-06"));
                assert_eq!(week, Some(2));
                assert_eq!(quarter, None);
            }
            other => panic!("expected the kpi screen, parsed {other:?}"),
        }
    }
}
