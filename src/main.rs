/*
 *  main.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host binary: console commands in, frames out over serial
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};

use ledticker::clock::LocalClock;
use ledticker::config::{self, Cli};
use ledticker::display::{ControllerConfig, DisplayController};
use ledticker::glyphs::FontTable;
use ledticker::host::{Flow, Session};
use ledticker::pacer::Pacer;
use ledticker::serial::{available_ports, SerialTransmitter};
use ledticker::weather::WeatherClient;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

fn print_ports() {
    match available_ports() {
        Ok(ports) if ports.is_empty() => println!("no serial ports found"),
        Ok(ports) => {
            for (i, name) in ports.iter().enumerate() {
                println!("{:>3}  {}", i, name);
            }
        }
        Err(e) => eprintln!("could not enumerate serial ports: {}", e),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli)?;

    if cli.dump_config {
        print!("{}", config::dump(&cfg)?);
        return Ok(());
    }
    if cli.list_ports {
        print_ports();
        return Ok(());
    }

    let settings = cfg.settings();
    let level = if cli.debug { "debug" } else { settings.log_level.as_str() };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("ledticker v{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);
    info!(
        "Board {}x{} ({} font), {} fps, tick every {} frames",
        settings.board_width, settings.board_height, settings.font, settings.fps, settings.tick_every
    );

    let glyphs = FontTable::by_name(&settings.font)
        .ok_or_else(|| anyhow::anyhow!("unknown font {}", settings.font))?;
    let controller = DisplayController::new(
        ControllerConfig { board_width: settings.board_width, ..ControllerConfig::default() },
        Box::new(glyphs),
        Box::new(LocalClock),
    );
    let mut session = Session::new(controller, settings.tick_every, settings.mirror_excess);
    let weather = WeatherClient::new(&settings.weather_key, &settings.weather_zip)?;

    match settings.port.as_deref() {
        Some(selector) => session.select_port(SerialTransmitter::select(Some(selector), settings.ready_when)),
        None => {
            println!("select a serial port (path or index, blank for none):");
            print_ports();
        }
    }

    let mut pacer = Pacer::new(settings.fps);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = signal_handler();
    tokio::pin!(shutdown);
    let mut console_open = true;

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(pacer.next_deadline().into()) => {
                if pacer.should_run() && session.frame() && cli.mirror {
                    println!("{}", session.mirror_frame().render_ascii());
                }
            }
            line = lines.next_line(), if console_open => {
                match line {
                    Ok(Some(line)) => {
                        if session.handle_line(&line, &weather, settings.ready_when).await == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => {
                        info!("Console closed, running until signalled");
                        console_open = false;
                        if !session.is_initialized() {
                            session.select_port(SerialTransmitter::disconnected(settings.ready_when));
                        }
                    }
                    Err(e) => {
                        error!("Console read failed: {}", e);
                        console_open = false;
                    }
                }
            }
            res = &mut shutdown => {
                if let Err(e) = res {
                    error!("Signal handler failed: {}", e);
                }
                break;
            }
        }
    }

    info!("{}", session.status_report());
    Ok(())
}
