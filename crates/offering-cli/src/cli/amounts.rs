use std::fs;

use chrono::{TimeZone, Utc};
use offering_kit::{
    parse_human, supply_as_human, to_human, to_scaled, AmountFormatter, AmountInput, Decimals,
    MintInfo, OfferingWindow, RawAmount,
};

use super::{Context, FormatValue, Readable, Status, Supply, ToHuman, ToScaled};

pub fn handle_human_command(cmd: &ToHuman, ctx: &Context) -> Result<(), String> {
    let raw: RawAmount = cmd.raw.parse()?;
    if raw.exceeds_safe_integer() {
        ctx.try_log(|logger| info!(logger, "{} is past f64 precision, output is approximate", raw));
    }
    println!("{}", to_human(&raw, cmd.decimals));
    Ok(())
}

pub fn handle_scaled_command(cmd: &ToScaled, _ctx: &Context) -> Result<(), String> {
    println!("{}", render_scaled(cmd)?);
    Ok(())
}

pub fn handle_format_command(
    cmd: &FormatValue,
    formatter: &AmountFormatter,
    _ctx: &Context,
) -> Result<(), String> {
    println!("{}", formatter.format(cmd.value)?);
    Ok(())
}

pub fn handle_readable_command(
    cmd: &Readable,
    formatter: &AmountFormatter,
    ctx: &Context,
) -> Result<(), String> {
    let raw: RawAmount = cmd.raw.parse()?;
    let decimals = match (cmd.decimals, cmd.mint_path.as_deref()) {
        (Some(decimals), _) => Decimals::new(decimals),
        (None, Some(path)) => {
            let mint = load_mint(path)?;
            ctx.try_log(|logger| info!(logger, "Using {} decimals from {}", mint.decimals, path));
            mint.decimals
        }
        (None, None) => return Err("either --decimals or --mint is required".to_string()),
    };
    println!("{}", formatter.human_readable(&raw, decimals)?);
    Ok(())
}

pub fn handle_supply_command(
    cmd: &Supply,
    formatter: &AmountFormatter,
    _ctx: &Context,
) -> Result<(), String> {
    let mint = load_mint(&cmd.mint_path)?;
    println!("{}", formatter.format(supply_as_human(&mint))?);
    Ok(())
}

pub fn handle_status_command(cmd: &Status, _ctx: &Context) -> Result<(), String> {
    println!("{}", render_status(cmd)?);
    Ok(())
}

fn render_scaled(cmd: &ToScaled) -> Result<String, String> {
    let scaled = if cmd.raw {
        to_scaled(AmountInput::Raw(cmd.amount.parse()?), cmd.decimals)?
    } else if cmd.exact {
        parse_human(&cmd.amount, cmd.decimals)?
    } else {
        let human = cmd
            .amount
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid amount '{}': {}", cmd.amount, e))?;
        to_scaled(human, cmd.decimals)?
    };
    Ok(scaled.to_string())
}

fn render_status(cmd: &Status) -> Result<String, String> {
    let window = OfferingWindow::from_unix(cmd.go_live, cmd.end)
        .ok_or_else(|| "go-live or end timestamp out of range".to_string())?;
    let now = match cmd.now {
        Some(now) => Utc
            .timestamp_opt(now, 0)
            .single()
            .ok_or_else(|| format!("timestamp {} out of range", now))?,
        None => Utc::now(),
    };
    Ok(window.status_at(now, cmd.remaining).to_string())
}

fn load_mint(path: &str) -> Result<MintInfo, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read mint file {}: {}", path, e))?;
    MintInfo::from_json(&content)
}
