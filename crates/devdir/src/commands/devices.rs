//! Device command handlers.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use tabled::Tabled;
use tracing::debug;

use devdir_core::{Device, DeviceDirectory};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output::{self, LoanState};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Loaned To")]
    loaned_to: String,
    #[tabled(rename = "Due")]
    due: String,
}

impl DeviceRow {
    fn new(d: &Device, today: NaiveDate, color: bool) -> Self {
        let status = d.status.clone().unwrap_or_default();
        Self {
            id: d.id.clone(),
            label: d.label.clone().unwrap_or_default(),
            dtype: d.device_type.clone().unwrap_or_default(),
            serial: d.serial_number.clone().unwrap_or_default(),
            status: output::paint_status(&status, loan_state(d, today), color),
            loaned_to: d.loaned_to.clone().unwrap_or_default(),
            due: d.due_date.clone().unwrap_or_default(),
        }
    }
}

fn loan_state(d: &Device, today: NaiveDate) -> LoanState {
    if d.is_overdue(today) {
        LoanState::Overdue
    } else if d.is_on_loan() {
        LoanState::OnLoan
    } else {
        LoanState::Available
    }
}

fn detail(d: &Device) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
    let mut lines = vec![
        format!("ID:          {}", d.id),
        format!("Label:       {}", field(&d.label)),
        format!("Type:        {}", field(&d.device_type)),
        format!("Serial:      {}", field(&d.serial_number)),
        format!("Status:      {}", field(&d.status)),
        format!("Loaned To:   {}", field(&d.loaned_to)),
        format!("Loan Start:  {}", field(&d.loan_start_date)),
        format!("Due:         {}", field(&d.due_date)),
    ];
    for (key, value) in &d.extra {
        lines.push(format!("{key}: {value}"));
    }
    lines.join("\n")
}

/// Apply `--on-loan` / `--overdue` filters, keeping server order.
fn filter_devices(devices: &[Device], args: &ListArgs, today: NaiveDate) -> Vec<Device> {
    devices
        .iter()
        .filter(|d| !args.on_loan || d.is_on_loan())
        .filter(|d| !args.overdue || d.is_overdue(today))
        .cloned()
        .collect()
}

/// Fetch once and surface the recorded error, if any, as a CLI failure.
async fn load(directory: &DeviceDirectory) -> Result<(), CliError> {
    directory.fetch_devices(false).await;
    match directory.error() {
        Some(message) => Err(CliError::FetchFailed {
            url: directory.devices_url().to_string(),
            message,
        }),
        None => Ok(()),
    }
}

fn render_devices(devices: &[Device], list: &ListArgs, global: &GlobalOpts) -> String {
    let today = Local::now().date_naive();
    let color = output::should_color(&global.color);
    let shown = filter_devices(devices, list, today);
    output::render_list(
        &global.output,
        &shown,
        |d| DeviceRow::new(d, today, color),
        |d| d.id.clone(),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    directory: &DeviceDirectory,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List(list) => {
            load(directory).await?;
            let out = render_devices(&directory.devices(), &list, global);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            load(directory).await?;
            let found = directory
                .device_by_id(&device)
                .ok_or(CliError::NotFound { identifier: device })?;
            let out = output::render_single(&global.output, &found, detail, |d| d.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Watch { interval } => watch(directory, interval, global).await,
    }
}

/// Re-render on every devices change; force a refetch each `interval` seconds.
async fn watch(
    directory: &DeviceDirectory,
    interval: u64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if interval == 0 {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let list = ListArgs {
        on_loan: false,
        overdue: false,
    };
    let mut ticker = tokio::time::interval(Duration::from_secs(interval));

    // Initial fetch must succeed; later failures keep the last list on screen.
    ticker.tick().await;
    load(directory).await?;
    let mut devices = directory.subscribe_devices();
    output::print_output(&render_devices(devices.current(), &list, global), global.quiet);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                debug!("forcing refresh");
                directory.fetch_devices(true).await;
                if let Some(message) = directory.error() {
                    eprintln!("refresh failed: {message}");
                }
            }
            changed = devices.changed() => {
                let Some(current) = changed else { break };
                output::print_output(&render_devices(&current, &list, global), global.quiet);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
