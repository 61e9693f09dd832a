use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use smart_ambulance_core::renderer::HospitalPanel;
use smart_ambulance_core::status::Tone;
use smart_ambulance_core::{Coordinate, LifecycleState};
use std::io::Stdout;
use std::time::Duration;
use tracing::info;

use crate::app::{handle_key, handle_mouse, App};
use crate::ui;

/// Probe the service and print its answer.
pub async fn run_health_check(app: &App) -> Result<()> {
    let health = app.client.check_health().await?;
    println!("{} ({}): {}", app.client.base_url(), health.status, health.message);
    Ok(())
}

/// Run one dispatch without a terminal: acquire a location, submit once,
/// print what the console ended up showing.
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.acquire_location();

    if let Some((ticket, request)) = app.console.submit() {
        let outcome = app.client.find_nearest_hospital(&request).await;
        app.console.complete(ticket, outcome);
    }

    let report = build_headless_report(app);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_report(&report);
    }

    if report.state == LifecycleState::Succeeded {
        Ok(())
    } else {
        Err(eyre!("Dispatch did not complete: {}", report.status))
    }
}

fn render_headless_report(report: &HeadlessReport) {
    println!("\nSmart Ambulance Dispatch");
    println!("========================");
    println!("Generated: {}", report.generated_at);
    println!("State: {}", report.state);

    if let Some(location) = &report.location {
        println!("Location: {location} ({})", report.provenance.unwrap_or("unknown"));
    }

    if !report.status.is_empty() {
        println!("Status: {}", report.status);
    }

    if let Some(hospital) = &report.hospital {
        println!("\nNearest Hospital:");
        println!("- {}", hospital.name);
        println!("- {}", hospital.address);
        println!("- {}", hospital.distance_text());
        println!("- Route points: {}", report.route_points);
    }
}

fn build_headless_report(app: &App) -> HeadlessReport {
    let console = &app.console;
    let route_points: usize = console
        .map()
        .surface()
        .overlays()
        .polylines()
        .map(|polyline| polyline.points.len())
        .sum();

    HeadlessReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        state: console.state(),
        location: console.location_text(),
        coordinate: console.location(),
        provenance: console.provenance().map(|provenance| provenance.as_str()),
        status: console.status().text.clone(),
        tone: console.status().tone,
        hospital: console.panel().cloned(),
        route_points,
    }
}

#[derive(Serialize)]
struct HeadlessReport {
    generated_at: String,
    state: LifecycleState,
    location: Option<String>,
    coordinate: Option<Coordinate>,
    provenance: Option<&'static str>,
    status: String,
    tone: Tone,
    hospital: Option<HospitalPanel>,
    route_points: usize,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.acquire_location();
    info!(service = app.client.base_url(), "dispatch console started");

    loop {
        app.drain_completions();
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_key(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
                Ok(_) | Err(_) => {
                    // Resize is picked up by the next draw
                }
            }
        }
    }

    Ok(())
}
