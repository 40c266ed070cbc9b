use cloudwaste_client::command::{Command, HELP};
use cloudwaste_client::render::render;
use cloudwaste_client::settings::Settings;
use cloudwaste_client::{ApiClient, Dashboard, Notice, ReportDraft, Result};
use time::OffsetDateTime;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level}").into()
        }))
        .init();

    let client = ApiClient::new(&settings.api.url)?;
    let dashboard = Dashboard::new(client, settings.dashboard.driver_id);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tracing::info!("polling {} every {:?}", settings.api.url, settings.dashboard.poll_interval());

    let poller = {
        let dashboard = dashboard.clone();
        let period = settings.dashboard.poll_interval();
        tokio::spawn(async move { dashboard.run_poll_loop(period, shutdown_rx).await })
    };

    let renderer = {
        let dashboard = dashboard.clone();
        let mut revisions = dashboard.subscribe();
        tokio::spawn(async move {
            while revisions.changed().await.is_ok() {
                let state = dashboard.snapshot().await;
                println!("{}", render(&state, OffsetDateTime::now_utc()));
            }
        })
    };

    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let notice = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                None
            }
            Command::Role(role) => {
                dashboard.set_role(role).await;
                None
            }
            Command::Refresh => {
                let _ = dashboard.refresh().await;
                None
            }
            Command::Select(bin_id) => {
                dashboard.select_bin(bin_id).await;
                None
            }
            Command::Report {
                bin_id,
                issue,
                description,
            } => {
                dashboard.show_report_form(true).await;
                dashboard
                    .update_report_draft(ReportDraft {
                        bin_id: Some(bin_id),
                        issue,
                        description,
                    })
                    .await;
                Some(dashboard.submit_report().await)
            }
            Command::Collect(bin_id) => Some(dashboard.collect_bin(&bin_id).await),
            Command::Optimize => Some(dashboard.optimize_route().await),
        };

        match notice {
            Some(Notice::Alert(message)) => println!("!! {message}"),
            Some(Notice::Info(message)) => println!("{message}"),
            None => {}
        }
    }

    let _ = shutdown_tx.send(true);
    if let Err(e) = poller.await {
        tracing::error!("poll loop failed: {}", e);
    }
    renderer.abort();

    Ok(())
}
