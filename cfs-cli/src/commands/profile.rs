//! Profile commands - show account and user data.

use console::style;

use cfs_api::{Account, User};
use cfs_core::config::AppConfig;
use cfs_core::error::CfsResult;

use super::{format_bytes, print_json};
use crate::OutputFormat;

/// Show the full profile.
pub async fn run_profile(config: &AppConfig, format: OutputFormat) -> CfsResult<()> {
    let api = super::create_api_client(config)?;
    let profile = api.get_profile().await?;

    match format {
        OutputFormat::Json => print_json(&profile),
        OutputFormat::Text => {
            print_account(profile.account_data());
            println!();
            print_user(profile.user_data());
        }
    }
    Ok(())
}

/// Show the account half of the profile.
pub async fn run_account(config: &AppConfig, format: OutputFormat) -> CfsResult<()> {
    let api = super::create_api_client(config)?;
    let account = api.request_account_info().await?;

    match format {
        OutputFormat::Json => print_json(&account),
        OutputFormat::Text => print_account(&account),
    }
    Ok(())
}

/// Show the user half of the profile.
pub async fn run_user(config: &AppConfig, format: OutputFormat) -> CfsResult<()> {
    let api = super::create_api_client(config)?;
    let user = api.request_user_info().await?;

    match format {
        OutputFormat::Json => print_json(&user),
        OutputFormat::Text => print_user(&user),
    }
    Ok(())
}

fn print_account(account: &Account) {
    println!("{}", style("Account").bold().underlined());
    println!("  ID:           {}", account.id);
    println!(
        "  Plan:         {}",
        account.plan_display_name.as_deref().unwrap_or("unknown")
    );
    println!(
        "  State:        {}",
        account.state_display_name.as_deref().unwrap_or("unknown")
    );

    let usage = format_bytes(account.storage_usage);
    match account.storage_limit {
        Some(limit) => {
            let line = format!("{usage} of {}", format_bytes(limit));
            if account.over_storage_limit {
                println!("  Storage:      {} {}", line, style("(over limit)").red().bold());
            } else {
                println!("  Storage:      {line}");
            }
        }
        None => println!("  Storage:      {usage} (unlimited)"),
    }
    if let Some(remaining) = account.storage_remaining() {
        println!("  Remaining:    {}", format_bytes(remaining));
    }
    if let Some(ref locale) = account.locale {
        println!("  Locale:       {locale}");
    }
}

fn print_user(user: &User) {
    println!("{}", style("User").bold().underlined());
    println!("  ID:           {}", user.id);
    println!("  Username:     {}", user.username);
    println!("  Name:         {}", user.display_name());
    if let Some(ref email) = user.email {
        println!("  Email:        {email}");
    }
    if let Some(created) = user.created_at_utc() {
        println!("  Created:      {}", created.format("%Y-%m-%d %H:%M UTC"));
    }
    match user.last_login_utc() {
        Some(login) => println!("  Last login:   {}", login.format("%Y-%m-%d %H:%M UTC")),
        None => println!("  Last login:   {}", style("never").dim()),
    }
}
