//! Guard-driven command dispatch.
//!
//! Every command maps to a route; the route's guard runs against the live
//! session before the screen executes. Redirects are rendered as notices
//! (and recorded by the navigator), never as errors — a role failure is not
//! a failure of the command machinery.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use pagination::PageRequest;

use crate::api::admins::AdminsApi;
use crate::api::audit_logs::{ActorType, AuditFilter, AuditLogsApi};
use crate::api::auth::AuthApi;
use crate::api::calendar::CalendarApi;
use crate::api::client::ApiClient;
use crate::api::customers::{ContactPayload, CustomerPayload, CustomersApi};
use crate::api::kpi::{KpiApi, KpiFilter, normalize_status};
use crate::api::meetings::{MeetingFilter, MeetingsApi};
use crate::api::opportunities::{OpportunitiesApi, Opportunity, OpportunityPayload};
use crate::api::pipeline::{PipelineApi, PipelineFilter};
use crate::api::users::{NewUser, UserFilter, UserStatus, UserUpdate, UsersApi};
use crate::domain::ports::{ApiTransport, FileUpload, LoginService, Navigator, SessionStore, SessionStoreError};
use crate::domain::{
    Actor, ApiResult, AuthResolver, Error, GuardOutcome, SessionContext, evaluate_access,
    format_compact_money, format_money, normalize_stages,
};
use crate::inbound::cli::commands::{
    AdminsCommand, AuditCommand, Command, CustomersCommand, MeetingsCommand,
    OpportunitiesCommand, PasswordCommand, PipelineCommand, UsersCommand,
};
use crate::inbound::cli::render;

/// Fully wired console: session, resolver, and every resource client.
pub struct App {
    session: Arc<SessionContext>,
    navigator: Arc<dyn Navigator>,
    resolver: AuthResolver,
    auth: Arc<AuthApi>,
    meetings: MeetingsApi,
    kpi: KpiApi,
    calendar: CalendarApi,
    pipeline: PipelineApi,
    opportunities: OpportunitiesApi,
    customers: CustomersApi,
    users: UsersApi,
    admins: AdminsApi,
    audit: AuditLogsApi,
}

impl App {
    /// Assemble the console over the given adapters.
    pub fn assemble(
        transport: Arc<dyn ApiTransport>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, SessionStoreError> {
        let session = Arc::new(SessionContext::initialise(store)?);
        let client = Arc::new(ApiClient::new(
            transport,
            session.clone(),
            navigator.clone(),
        ));
        let auth = Arc::new(AuthApi::new(client.clone()));
        let resolver = AuthResolver::new(
            session.clone(),
            auth.clone() as Arc<dyn LoginService>,
            navigator.clone(),
        );
        Ok(Self {
            session,
            navigator,
            resolver,
            auth,
            meetings: MeetingsApi::new(client.clone()),
            kpi: KpiApi::new(client.clone()),
            calendar: CalendarApi::new(client.clone()),
            pipeline: PipelineApi::new(client.clone()),
            opportunities: OpportunitiesApi::new(client.clone()),
            customers: CustomersApi::new(client.clone()),
            users: UsersApi::new(client.clone()),
            admins: AdminsApi::new(client.clone()),
            audit: AuditLogsApi::new(client),
        })
    }

    /// Shared session context (exposed for wiring and tests).
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Guard the command's route, then run it. Returns `false` when the
    /// command failed (the failure has already been rendered).
    pub async fn run(&self, command: Command) -> bool {
        let route = command.route();
        match evaluate_access(route.access(), &self.session) {
            GuardOutcome::Redirect(target) => {
                self.navigator.redirect(target);
                render::redirect_notice(route, target);
                true
            }
            GuardOutcome::Render => match self.execute(command).await {
                Ok(()) => true,
                Err(err) => {
                    render::failure(&err);
                    false
                }
            },
        }
    }

    async fn execute(&self, command: Command) -> ApiResult<()> {
        match command {
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Logout => {
                self.resolver.logout();
                render::success("Signed out.");
                Ok(())
            }
            Command::Whoami => {
                self.whoami();
                Ok(())
            }
            Command::Kpi {
                rep,
                month,
                week,
                quarter,
            } => self.kpi_screen(rep, KpiFilter { month, week, quarter }).await,
            Command::Meetings(command) => self.meetings_screen(command).await,
            Command::Pipeline(command) => self.pipeline_screen(command).await,
            Command::Opportunities(command) => self.opportunities_screen(command).await,
            Command::Customers(command) => self.customers_screen(command).await,
            Command::Users(command) => self.users_screen(command).await,
            Command::Admins(command) => self.admins_screen(command).await,
            Command::Audit(command) => self.audit_screen(command).await,
            Command::Password(command) => self.password_screen(command).await,
        }
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        let actor = self.resolver.login(email, password).await?;
        render::success(&format!(
            "Welcome back, {} ({}).",
            actor.display_name(),
            actor.role_label(),
        ));
        self.navigator.redirect(crate::domain::LANDING);
        Ok(())
    }

    fn whoami(&self) {
        match self.session.actor() {
            Some(actor) => match &actor {
                Actor::Admin { email, role, .. } => {
                    println!("{email} · admin · {role}");
                }
                Actor::User {
                    email, department, ..
                } => {
                    println!(
                        "{} <{email}> · staff · {department}",
                        actor.display_name(),
                    );
                }
            },
            None => println!("Not signed in."),
        }
    }

    /// Staff users always act as themselves: their own rep name replaces
    /// whatever rep filter an admin would pick by hand.
    fn effective_rep(&self, requested: Option<String>) -> Option<String> {
        match self.session.actor().as_ref().and_then(Actor::rep_name) {
            Some(own) => Some(own),
            None => requested,
        }
    }

    async fn kpi_screen(&self, rep: Option<String>, filter: KpiFilter) -> ApiResult<()> {
        let rep = self
            .effective_rep(rep)
            .ok_or_else(|| Error::invalid_request("rep name is required"))?;
        let snapshot = self.kpi.weekly_snapshot(&rep, &filter).await?;

        render::title(&format!("KPI · {rep}"));
        println!(
            "{} meetings · score {:.1} · {}",
            snapshot.total_meetings,
            snapshot.score,
            normalize_status(&snapshot.status),
        );
        if let Some(counts) = &snapshot.counts {
            println!(
                "missing outcomes: {} · missing contacts: {} · role-only contacts: {}",
                counts.missing_outcome_count.unwrap_or(0),
                counts.missing_contact_count.unwrap_or(0),
                counts.role_only_count.unwrap_or(0),
            );
        }
        for finding in &snapshot.weekly_findings {
            println!("[{}] {}", normalize_status(&finding.status), finding.message);
        }
        for finding in &snapshot.meeting_findings {
            println!(
                "[{}] {} — {}: {}",
                normalize_status(&finding.status),
                finding.customer_name,
                finding.meeting_purpose,
                finding.message,
            );
        }
        Ok(())
    }

    async fn meetings_screen(&self, command: MeetingsCommand) -> ApiResult<()> {
        match command {
            MeetingsCommand::List {
                rep,
                month,
                week,
                page,
                limit,
            } => {
                let filter = MeetingFilter {
                    rep_name: self.effective_rep(rep),
                    month,
                    week,
                };
                let envelope = self.meetings.list(&filter, page_request(page, limit)?).await?;
                render::list_screen("Meetings", "meetings", envelope, |meeting| {
                    format!(
                        "#{} {} · {} ({}) · {} → {}",
                        meeting.id,
                        meeting.rep_name,
                        meeting.customer_name,
                        meeting.primary_contact,
                        meeting.meeting_purpose,
                        meeting.meeting_outcome,
                    )
                });
                Ok(())
            }
            MeetingsCommand::Upload {
                file,
                rep,
                month,
                week,
            } => {
                let upload = read_upload(&file)?;
                self.meetings.upload(&rep, &month, week, upload).await?;
                render::success("Weekly report uploaded.");

                // Write, then refresh the list the screen shows.
                let filter = MeetingFilter {
                    rep_name: Some(rep),
                    month: Some(month),
                    week: Some(week),
                };
                let envelope = self
                    .meetings
                    .list(&filter, page_request(1, pagination::DEFAULT_LIMIT)?)
                    .await?;
                render::list_screen("Meetings", "meetings", envelope, |meeting| {
                    format!(
                        "#{} {} · {} → {}",
                        meeting.id,
                        meeting.customer_name,
                        meeting.meeting_purpose,
                        meeting.meeting_outcome,
                    )
                });
                Ok(())
            }
            MeetingsCommand::Months => {
                let months = self.calendar.calendar_months().await?;
                render::title("Months");
                for month in months {
                    println!("{month}");
                }
                Ok(())
            }
            MeetingsCommand::Weeks { month } => {
                let weeks = self.calendar.calendar_weeks(&month).await?;
                render::title(&format!("Weeks · {month}"));
                for week in weeks {
                    println!(
                        "{} · {} ({} – {})",
                        week.week, week.label, week.start_date, week.end_date,
                    );
                }
                Ok(())
            }
        }
    }

    async fn pipeline_screen(&self, command: PipelineCommand) -> ApiResult<()> {
        match command {
            PipelineCommand::Summary {
                year,
                quarter,
                sales_owner,
                stage,
            } => {
                let filter = PipelineFilter {
                    year,
                    quarter,
                    sales_owner_id: sales_owner,
                    pre_sales_owner_ids: Vec::new(),
                    stage_id: stage,
                };
                let overview = self.pipeline.overview(&filter).await?;

                render::title(&format!("Pipeline · {}", overview.summary.year));
                for stage in normalize_stages(&overview.stage_totals) {
                    println!(
                        "{}. {:<40} {:>4} deals · {} ({}% → {})",
                        stage.order,
                        stage.stage_name,
                        stage.count,
                        format_money(Some(stage.amount)),
                        stage.probability,
                        format_compact_money(Some(stage.weighted_amount)),
                    );
                }
                let summary = &overview.summary;
                println!(
                    "deals {} · pipeline {} · closed won {} · avg {} · forecast {}",
                    summary.total_deals,
                    format_compact_money(Some(summary.total_pipeline)),
                    format_compact_money(Some(summary.closed_won_amount)),
                    format_compact_money(Some(summary.avg_deal_size)),
                    format_compact_money(Some(summary.weighted_forecast)),
                );
                match (summary.quarterly_target, summary.achievement_percent) {
                    (Some(target), Some(achieved)) => println!(
                        "target {} · achieved {achieved:.1}%",
                        format_compact_money(Some(target)),
                    ),
                    _ => println!("no quarterly target set"),
                }
                Ok(())
            }
            PipelineCommand::Stages => {
                let stages = self.pipeline.stages().await?;
                render::title("Deal stages");
                for stage in stages {
                    println!("#{} {} ({}%)", stage.id, stage.name, stage.probability);
                }
                Ok(())
            }
            PipelineCommand::Quarters => {
                let quarters = self.calendar.available_quarters().await?;
                render::title("Quarters");
                for quarter in quarters {
                    println!("Q{quarter}");
                }
                Ok(())
            }
            PipelineCommand::Upload {
                file,
                year,
                sales_owner,
            } => {
                let upload = read_upload(&file)?;
                self.pipeline.upload(year, sales_owner, upload).await?;
                render::success("Pipeline uploaded.");

                // Write, then refresh: land on the first page of deals.
                let filter = PipelineFilter {
                    year: Some(year),
                    ..Default::default()
                };
                let envelope = self
                    .opportunities
                    .list(&filter, page_request(1, pagination::DEFAULT_LIMIT)?)
                    .await?;
                render::list_screen("Opportunities", "deals", envelope, opportunity_row);
                Ok(())
            }
        }
    }

    async fn opportunities_screen(&self, command: OpportunitiesCommand) -> ApiResult<()> {
        match command {
            OpportunitiesCommand::List {
                year,
                quarter,
                sales_owner,
                pre_sales,
                stage,
                page,
                limit,
            } => {
                let filter = PipelineFilter {
                    year,
                    quarter,
                    sales_owner_id: sales_owner,
                    pre_sales_owner_ids: pre_sales,
                    stage_id: stage,
                };
                let envelope = self
                    .opportunities
                    .list(&filter, page_request(page, limit)?)
                    .await?;
                render::list_screen("Opportunities", "deals", envelope, opportunity_row);
                Ok(())
            }
            OpportunitiesCommand::Show { deal_id } => {
                let deal = self.opportunities.get(&deal_id).await?;
                render_deal(&deal);
                Ok(())
            }
            OpportunitiesCommand::Create {
                name,
                customer,
                amount,
                stage,
                year,
                quarter,
                sales_owner,
                pre_sales,
                close_date,
            } => {
                let payload = OpportunityPayload {
                    deal_name: Some(name),
                    customer_name: Some(customer),
                    amount: Some(amount),
                    stage_id: stage,
                    year: Some(year),
                    quarter,
                    sales_owner_id: sales_owner,
                    pre_sales_owner_ids: pre_sales,
                    close_date: parse_close_date(close_date)?,
                };
                let deal = self.opportunities.create(&payload).await?;
                render::success(&format!("Deal {} created.", deal.external_deal_id));
                render_deal(&deal);
                Ok(())
            }
            OpportunitiesCommand::Update {
                deal_id,
                name,
                amount,
                stage,
                quarter,
                sales_owner,
                close_date,
            } => {
                let payload = OpportunityPayload {
                    deal_name: name,
                    amount,
                    stage_id: stage,
                    quarter,
                    sales_owner_id: sales_owner,
                    close_date: parse_close_date(close_date)?,
                    ..Default::default()
                };
                let deal = self.opportunities.update(&deal_id, &payload).await?;
                render::success(&format!("Deal {} updated.", deal.external_deal_id));
                render_deal(&deal);
                Ok(())
            }
            OpportunitiesCommand::Delete { deal_id } => {
                self.opportunities.delete(&deal_id).await?;
                render::success(&format!("Deal {deal_id} removed."));

                // Write, then refresh the first page.
                let envelope = self
                    .opportunities
                    .list(
                        &PipelineFilter::default(),
                        page_request(1, pagination::DEFAULT_LIMIT)?,
                    )
                    .await?;
                render::list_screen("Opportunities", "deals", envelope, opportunity_row);
                Ok(())
            }
        }
    }

    async fn customers_screen(&self, command: CustomersCommand) -> ApiResult<()> {
        match command {
            CustomersCommand::List { page, limit } => {
                let envelope = self.customers.list(page_request(page, limit)?).await?;
                render::list_screen("Customers", "customers", envelope, |customer| {
                    format!(
                        "#{} {:<32} {:>3} deals · {}",
                        customer.id,
                        customer.name,
                        customer.deal_count,
                        format_money(Some(customer.total_deal_size)),
                    )
                });
                Ok(())
            }
            CustomersCommand::Show { id } => {
                let customer = self.customers.get(id).await?;
                render::title(&customer.name);
                println!(
                    "#{} · {} deals · {}",
                    customer.id,
                    customer.deal_count,
                    format_money(Some(customer.total_deal_size)),
                );
                if customer.contacts.is_empty() {
                    println!("No contacts recorded.");
                }
                for contact in &customer.contacts {
                    println!(
                        "contact #{}: {} <{}> {}",
                        contact.id,
                        contact.name.as_deref().unwrap_or("—"),
                        contact.email.as_deref().unwrap_or("—"),
                        contact.mobile.as_deref().unwrap_or(""),
                    );
                }
                Ok(())
            }
            CustomersCommand::Create { name } => {
                let customer = self.customers.create(&CustomerPayload { name }).await?;
                render::success(&format!("Customer #{} created.", customer.id));
                Ok(())
            }
            CustomersCommand::Rename { id, name } => {
                let customer = self.customers.update(id, &CustomerPayload { name }).await?;
                render::success(&format!("Customer #{} renamed to {}.", customer.id, customer.name));
                Ok(())
            }
            CustomersCommand::AddContact {
                id,
                name,
                email,
                mobile,
            } => {
                let contact = self
                    .customers
                    .add_contact(id, &ContactPayload { name, email, mobile })
                    .await?;
                render::success(&format!("Contact #{} added.", contact.id));
                Ok(())
            }
            CustomersCommand::EditContact {
                id,
                contact_id,
                name,
                email,
                mobile,
            } => {
                let contact = self
                    .customers
                    .update_contact(id, contact_id, &ContactPayload { name, email, mobile })
                    .await?;
                render::success(&format!("Contact #{} updated.", contact.id));
                Ok(())
            }
        }
    }

    async fn users_screen(&self, command: UsersCommand) -> ApiResult<()> {
        match command {
            UsersCommand::List {
                department,
                status,
                page,
                limit,
            } => {
                let filter = UserFilter {
                    department,
                    status: parse_user_status(status)?,
                };
                let envelope = self.users.list(&filter, page_request(page, limit)?).await?;
                render::list_screen("Users", "users", envelope, |user| {
                    format!(
                        "#{} {:<28} {:<28} {:<10} target {}",
                        user.id,
                        user.full_name(),
                        user.email,
                        user.department,
                        format_compact_money(Some(user.yearly_target)),
                    )
                });
                Ok(())
            }
            UsersCommand::Show { id } => {
                let user = self.users.get(id).await?;
                render::title(&user.full_name());
                println!(
                    "#{} · {} · {} · target {}",
                    user.id,
                    user.email,
                    user.department,
                    format_money(Some(user.yearly_target)),
                );
                Ok(())
            }
            UsersCommand::Create {
                first_name,
                last_name,
                email,
                department,
                yearly_target,
            } => {
                let user = self
                    .users
                    .create(&NewUser {
                        first_name,
                        last_name,
                        email,
                        department,
                        yearly_target,
                    })
                    .await?;
                render::success(&format!("User #{} ({}) created.", user.id, user.full_name()));
                Ok(())
            }
            UsersCommand::Update {
                id,
                first_name,
                last_name,
                email,
                department,
                yearly_target,
            } => {
                let user = self
                    .users
                    .update(
                        id,
                        &UserUpdate {
                            first_name,
                            last_name,
                            email,
                            department,
                            yearly_target,
                            status: None,
                        },
                    )
                    .await?;
                render::success(&format!("User #{} updated.", user.id));
                Ok(())
            }
            UsersCommand::Deactivate { id } => {
                self.users.deactivate(id).await?;
                render::success(&format!("User #{id} deactivated."));

                // Write, then refresh the first page.
                let envelope = self
                    .users
                    .list(
                        &UserFilter::default(),
                        page_request(1, pagination::DEFAULT_LIMIT)?,
                    )
                    .await?;
                render::list_screen("Users", "users", envelope, |user| {
                    format!("#{} {} · {:?}", user.id, user.full_name(), user.status)
                });
                Ok(())
            }
        }
    }

    async fn admins_screen(&self, command: AdminsCommand) -> ApiResult<()> {
        match command {
            AdminsCommand::List { page, limit } => {
                let envelope = self.admins.list(page_request(page, limit)?).await?;
                render::list_screen("Admins", "admins", envelope, |admin| {
                    format!("#{} {:<32} {} · {:?}", admin.id, admin.email, admin.role, admin.status)
                });
                Ok(())
            }
            AdminsCommand::Invite { email } => {
                self.admins.invite(&email).await?;
                render::success(&format!("Invite sent to {email}."));
                Ok(())
            }
            AdminsCommand::AcceptInvite { token, password } => {
                self.auth.accept_invite(&token, &password).await?;
                render::success("Invite accepted. You can now log in.");
                Ok(())
            }
        }
    }

    async fn audit_screen(&self, command: AuditCommand) -> ApiResult<()> {
        match command {
            AuditCommand::List {
                actor_type,
                action,
                entity,
                page,
                limit,
            } => {
                let filter = AuditFilter {
                    actor_type: parse_actor_type(actor_type)?,
                    action,
                    entity,
                };
                let envelope = self.audit.list(&filter, page_request(page, limit)?).await?;
                render::list_screen("Audit logs", "entries", envelope, |entry| {
                    format!(
                        "#{} {} {} {} — {}",
                        entry.id,
                        entry.created_at.format("%Y-%m-%d %H:%M"),
                        entry.actor_type.as_str(),
                        entry.action,
                        entry.description,
                    )
                });
                Ok(())
            }
            AuditCommand::Show { id } => {
                let entry = self.audit.get(id).await?;
                render::title(&format!("Audit #{}", entry.id));
                println!("{} · {}", entry.created_at, entry.action);
                println!("{}", entry.description);
                if let Some(entity) = &entry.entity {
                    println!("entity: {entity} #{}", entry.entity_id.unwrap_or(0));
                }
                if let Some(ip) = &entry.ip_address {
                    println!("from: {ip}");
                }
                Ok(())
            }
        }
    }

    async fn password_screen(&self, command: PasswordCommand) -> ApiResult<()> {
        match command {
            PasswordCommand::RequestReset { email } => {
                self.auth.request_password_reset(&email).await?;
                render::success("If the account exists, a reset email is on its way.");
                Ok(())
            }
            PasswordCommand::Reset { token, password } => {
                self.auth.reset_password(&token, &password).await?;
                render::success("Password updated. You can now log in.");
                Ok(())
            }
        }
    }
}

fn opportunity_row(deal: &Opportunity) -> String {
    format!(
        "{} {:<32} {:<24} {} · {} · {}",
        deal.external_deal_id,
        deal.deal_name,
        deal.customer_name,
        format_money(Some(deal.amount)),
        deal.display_stage
            .as_ref()
            .map_or("no stage", |stage| stage.name.as_str()),
        deal.sales_owner
            .as_ref()
            .map_or("unassigned", |owner| owner.name.as_str()),
    )
}

fn render_deal(deal: &Opportunity) {
    render::title(&format!("{} · {}", deal.external_deal_id, deal.deal_name));
    println!("customer: {}", deal.customer_name);
    println!("amount:   {}", format_money(Some(deal.amount)));
    if let Some(stage) = &deal.display_stage {
        println!("stage:    {} ({}%)", stage.name, stage.probability);
    }
    println!(
        "year:     {}{}",
        deal.year,
        deal.quarter.map(|q| format!(" Q{q}")).unwrap_or_default(),
    );
    if let Some(owner) = &deal.sales_owner {
        println!("owner:    {}", owner.name);
    }
    for owner in &deal.pre_sales_owners {
        println!("pre-sales: {}", owner.name);
    }
    if let Some(close) = deal.close_date {
        println!("close:    {close}");
    }
}

fn page_request(page: u32, limit: u32) -> ApiResult<PageRequest> {
    PageRequest::new(page, limit).map_err(|err| Error::invalid_request(err.to_string()))
}

fn read_upload(path: &Path) -> ApiResult<FileUpload> {
    let bytes = std::fs::read(path)
        .map_err(|err| Error::invalid_request(format!("cannot read {}: {err}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.xlsx".to_owned());
    Ok(FileUpload { file_name, bytes })
}

fn parse_close_date(raw: Option<String>) -> ApiResult<Option<NaiveDate>> {
    raw.map(|raw| {
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| Error::invalid_request(format!("invalid close date: {raw}")))
    })
    .transpose()
}

fn parse_user_status(raw: Option<String>) -> ApiResult<Option<UserStatus>> {
    raw.map(|raw| match raw.to_uppercase().as_str() {
        "ACTIVE" => Ok(UserStatus::Active),
        "INACTIVE" => Ok(UserStatus::Inactive),
        _ => Err(Error::invalid_request(format!("invalid status: {raw}"))),
    })
    .transpose()
}

fn parse_actor_type(raw: Option<String>) -> ApiResult<Option<ActorType>> {
    raw.map(|raw| match raw.to_uppercase().as_str() {
        "USER" => Ok(ActorType::User),
        "ADMIN" => Ok(ActorType::Admin),
        _ => Err(Error::invalid_request(format!("invalid actor type: {raw}"))),
    })
    .transpose()
}
