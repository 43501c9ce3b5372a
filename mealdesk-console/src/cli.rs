//! `mealdesk` command line
//!
//! `mealdesk <page> <action>` runs one page action against the backend and
//! prints the page view afterwards, as text or (`--json`) as JSON.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mealdesk_client::ClientConfig;
use serde::Serialize;
use shared::models::{MealPlanType, SiteType, UserRole};
use std::path::PathBuf;
use std::sync::Arc;

use crate::console::Console;
use crate::notice::Notice;
use crate::pages::{MappingFilter, MappingForm, PricingField, PricingForm, SupplierForm, UserForm};
use crate::render;

#[derive(Debug, Parser)]
#[command(name = "mealdesk")]
#[command(about = "Admin console for the meal service backend")]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "MEALDESK_API_URL")]
    pub api_url: Option<String>,
    /// Bearer token
    #[arg(long, env = "MEALDESK_TOKEN")]
    pub token: Option<String>,
    /// Rows per list page
    #[arg(long, env = "MEALDESK_PAGE_SIZE")]
    pub page_size: Option<u32>,
    #[arg(long, env = "MEALDESK_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
    /// Write logs to a daily file in this directory instead of stderr
    #[arg(long, env = "MEALDESK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    /// Print the page view as JSON
    #[arg(long)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 사용자 관리
    #[command(subcommand)]
    Users(UsersCommand),
    /// 사업장 관리
    #[command(subcommand)]
    Sites(SitesCommand),
    /// 협력업체 관리
    #[command(subcommand)]
    Suppliers(SuppliersCommand),
    /// 협력업체 매핑
    #[command(subcommand)]
    Mappings(MappingsCommand),
    /// 식단가 관리
    #[command(subcommand)]
    Pricing(PricingCommand),
    /// 식자재 업로드
    #[command(subcommand)]
    Ingredients(IngredientsCommand),
    /// End the backend session
    Logout,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "nutritionist")]
        role: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        managed_site: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        managed_site: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: i64,
    },
    ResetPassword {
        id: i64,
        password: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    Tree {
        /// Ids of nodes shown collapsed
        #[arg(long)]
        collapse: Vec<i64>,
    },
    Stats,
    /// Move a site under a new parent
    Move {
        site_id: i64,
        parent_id: i64,
    },
    Create {
        name: String,
        #[arg(long)]
        parent: Option<i64>,
        /// Defaults to the type the parent's children take
        #[arg(long = "type")]
        site_type: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum SuppliersCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        name: String,
        #[arg(long)]
        parent_code: Option<String>,
        #[arg(long)]
        business_number: Option<String>,
        #[arg(long)]
        representative: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum MappingsCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        supplier: Option<i64>,
        #[arg(long)]
        customer: Option<i64>,
        #[arg(long)]
        active: Option<bool>,
    },
    Create {
        supplier_id: i64,
        customer_id: i64,
        supplier_code: String,
        #[arg(long)]
        delivery_code: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        supplier_code: Option<String>,
        /// Empty string clears the code
        #[arg(long)]
        delivery_code: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum PricingCommand {
    List {
        #[arg(long)]
        location: Option<String>,
    },
    /// Edit one field of a saved row
    Set {
        id: i64,
        field: PricingField,
        value: String,
    },
    Create {
        location: String,
        plan_name: String,
        #[arg(long, default_value = "중식")]
        plan_type: String,
        #[arg(long, default_value = "0")]
        price: String,
        #[arg(long, default_value = "0")]
        cost: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum IngredientsCommand {
    /// Upload an .xlsx / .xls / .csv sheet
    Upload { file: PathBuf },
}

/// Build the client from the environment plus flags and run the command
pub async fn run(cli: Cli) -> Result<String> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }
    if let Some(page_size) = cli.page_size {
        config = config.with_page_size(page_size);
    }
    tracing::debug!(base_url = %config.base_url, "connecting");
    let client = config
        .build_admin_client()
        .context("Failed to build admin client")?;

    let mut console = Console::new(Arc::new(client), config.page_size);
    execute(&mut console, cli.command, cli.json).await
}

#[derive(Serialize)]
struct JsonOutput<'a, T: Serialize> {
    notice: Option<&'a Notice>,
    view: &'a T,
}

fn present<T: Serialize>(
    json: bool,
    notice: Option<&Notice>,
    view: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    if json {
        let output = JsonOutput { notice, view };
        return Ok(serde_json::to_string_pretty(&output)? + "\n");
    }
    let mut out = notice.map(render::render_notice).unwrap_or_default();
    out.push_str(&text(view));
    Ok(out)
}

/// Run one command on `console` and render the resulting page
pub async fn execute(console: &mut Console, command: Command, json: bool) -> Result<String> {
    match command {
        Command::Users(cmd) => users(console, cmd, json).await,
        Command::Sites(cmd) => sites(console, cmd, json).await,
        Command::Suppliers(cmd) => suppliers(console, cmd, json).await,
        Command::Mappings(cmd) => mappings(console, cmd, json).await,
        Command::Pricing(cmd) => pricing(console, cmd, json).await,
        Command::Ingredients(IngredientsCommand::Upload { file }) => {
            console.show_page("ingredients").await?;
            let result = console.ingredients.upload(&file).await?.clone();
            present(json, console.ingredients.notice.as_ref(), &result, render::render_upload)
        }
        Command::Logout => {
            console.logout().await?;
            let notice = Notice::info("로그아웃되었습니다");
            present(json, Some(&notice), &(), |_| String::new())
        }
    }
}

async fn users(console: &mut Console, cmd: UsersCommand, json: bool) -> Result<String> {
    console.show_page("users").await?;
    let page = &mut console.users;
    match cmd {
        UsersCommand::List { page: number, search } => {
            if let Some(term) = search {
                page.search(&term).await?;
            }
            if number > 1 {
                page.go_to(number).await?;
            }
        }
        UsersCommand::Create {
            username,
            password,
            role,
            department,
            phone,
            managed_site,
        } => {
            let form = UserForm {
                username,
                password,
                role: UserRole::from(role),
                department: department.unwrap_or_default(),
                phone_number: phone.unwrap_or_default(),
                managed_site: managed_site.unwrap_or_default(),
                ..UserForm::default()
            };
            page.submit_form(form).await?;
        }
        UsersCommand::Update {
            id,
            role,
            department,
            phone,
            managed_site,
            active,
        } => {
            while !page.listing.rows.iter().any(|u| u.id == id) {
                let pagination = page.listing.pagination;
                if !pagination.has_next() {
                    bail!("User {} not found", id);
                }
                page.go_to(pagination.page + 1).await?;
            }
            let mut form = page.edit(id)?.clone();
            if let Some(role) = role {
                form.role = UserRole::from(role);
            }
            form.department = department.unwrap_or(form.department);
            form.phone_number = phone.unwrap_or(form.phone_number);
            form.managed_site = managed_site.unwrap_or(form.managed_site);
            form.is_active = active.unwrap_or(form.is_active);
            page.submit_form(form).await?;
        }
        UsersCommand::Delete { id } => page.delete(id).await?,
        UsersCommand::ResetPassword { id, password } => page.reset_password(id, &password).await?,
    }
    present(json, page.notice.as_ref(), &page.table(), render::render_table)
}

async fn sites(console: &mut Console, cmd: SitesCommand, json: bool) -> Result<String> {
    console.show_page("sites").await?;
    let page = &mut console.sites;
    match cmd {
        SitesCommand::Tree { collapse } => {
            for id in collapse {
                if page.tree.is_expanded(id) {
                    page.toggle(id);
                }
            }
        }
        SitesCommand::Stats => {
            return present(json, None, &page.stats(), render::render_stats);
        }
        SitesCommand::Move { site_id, parent_id } => page.move_site(site_id, parent_id).await?,
        SitesCommand::Create {
            name,
            parent,
            site_type,
            code,
        } => {
            let form = match parent {
                Some(parent_id) => page.add_child_form(parent_id)?,
                None => page.new_root_form(),
            };
            form.name = name;
            form.code = code.unwrap_or_default();
            if let Some(site_type) = site_type {
                form.site_type = Some(SiteType::from(site_type));
            }
            let form = form.clone();
            page.submit_form(form).await?;
        }
        SitesCommand::Delete { id } => page.delete(id).await?,
    }
    present(json, page.notice.as_ref(), &page.view(), |nodes| {
        render::render_tree(nodes)
    })
}

async fn suppliers(console: &mut Console, cmd: SuppliersCommand, json: bool) -> Result<String> {
    console.show_page("suppliers").await?;
    let page = &mut console.suppliers;
    match cmd {
        SuppliersCommand::List { page: number, search } => {
            if let Some(term) = search {
                page.search(&term).await?;
            }
            if number > 1 {
                page.go_to(number).await?;
            }
        }
        SuppliersCommand::Create {
            name,
            parent_code,
            business_number,
            representative,
            phone,
            email,
        } => {
            let form = SupplierForm {
                name,
                parent_code: parent_code.unwrap_or_default(),
                business_number: business_number.unwrap_or_default(),
                representative: representative.unwrap_or_default(),
                headquarters_phone: phone.unwrap_or_default(),
                email: email.unwrap_or_default(),
                ..SupplierForm::default()
            };
            page.submit_form(form).await?;
        }
        SuppliersCommand::Delete { id } => page.delete(id).await?,
    }
    present(json, page.notice.as_ref(), &page.table(), render::render_table)
}

async fn mappings(console: &mut Console, cmd: MappingsCommand, json: bool) -> Result<String> {
    console.show_page("mappings").await?;
    let page = &mut console.mappings;
    match cmd {
        MappingsCommand::List {
            page: number,
            supplier,
            customer,
            active,
        } => {
            let filter = MappingFilter {
                supplier_id: supplier,
                customer_id: customer,
                is_active: active,
            };
            if filter != MappingFilter::default() {
                page.set_filter(filter).await?;
            }
            if number > 1 {
                page.go_to(number).await?;
            }
        }
        MappingsCommand::Create {
            supplier_id,
            customer_id,
            supplier_code,
            delivery_code,
        } => {
            *page.new_form() = MappingForm {
                supplier_id: Some(supplier_id),
                customer_id: Some(customer_id),
                supplier_code,
                delivery_code: delivery_code.unwrap_or_default(),
                ..MappingForm::default()
            };
            page.save().await?;
        }
        MappingsCommand::Update {
            id,
            supplier_code,
            delivery_code,
            active,
        } => {
            while !page.listing.rows.iter().any(|m| m.id == id) {
                let pagination = page.listing.pagination;
                if !pagination.has_next() {
                    bail!("Mapping {} not found", id);
                }
                page.go_to(pagination.page + 1).await?;
            }
            let form = page.edit(id)?;
            if let Some(code) = supplier_code {
                form.supplier_code = code;
            }
            if let Some(code) = delivery_code {
                form.delivery_code = code;
            }
            if let Some(active) = active {
                form.is_active = active;
            }
            page.save().await?;
        }
        MappingsCommand::Delete { id } => page.delete(id).await?,
    }
    present(json, page.notice.as_ref(), &page.table(), render::render_table)
}

async fn pricing(console: &mut Console, cmd: PricingCommand, json: bool) -> Result<String> {
    console.show_page("meal-pricing").await?;
    let page = &mut console.meal_pricing;
    match cmd {
        PricingCommand::List { location } => {
            if location.is_some() {
                page.set_location_filter(location).await?;
            }
        }
        PricingCommand::Set { id, field, value } => {
            let row = page
                .rows
                .iter()
                .position(|r| r.id() == Some(id))
                .with_context(|| format!("Meal pricing {} not found", id))?;
            page.begin_edit(row, field)?;
            page.input(value);
            page.commit_edit().await?;
        }
        PricingCommand::Create {
            location,
            plan_name,
            plan_type,
            price,
            cost,
            start,
            end,
        } => {
            *page.new_form() = PricingForm {
                location_name: location,
                plan_name,
                meal_plan_type: MealPlanType::from(plan_type),
                selling_price: price,
                material_cost_guideline: cost,
                apply_date_start: start.unwrap_or_default(),
                apply_date_end: end.unwrap_or_default(),
                ..PricingForm::default()
            };
            page.submit_form().await?;
        }
        PricingCommand::Delete { id } => {
            let row = page
                .rows
                .iter()
                .position(|r| r.id() == Some(id))
                .with_context(|| format!("Meal pricing {} not found", id))?;
            page.delete(row).await?;
        }
    }
    present(json, page.notice.as_ref(), &page.table(), render::render_table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_commands() {
        let cli = Cli::try_parse_from([
            "mealdesk",
            "--api-url",
            "http://admin.local",
            "pricing",
            "set",
            "3",
            "selling_price",
            "5,500",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://admin.local"));
        match cli.command {
            Command::Pricing(PricingCommand::Set { id, field, value }) => {
                assert_eq!(id, 3);
                assert_eq!(field, PricingField::SellingPrice);
                assert_eq!(value, "5,500");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_is_refused() {
        let parsed = Cli::try_parse_from(["mealdesk", "pricing", "set", "3", "price", "1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_site_type_flag() {
        let cli = Cli::try_parse_from([
            "mealdesk", "sites", "create", "행복요양원", "--parent", "2", "--type", "요양원",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Sites(SitesCommand::Create { parent: Some(2), ref site_type, .. })
                if site_type.as_deref() == Some("요양원")
        ));
    }
}
