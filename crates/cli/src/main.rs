// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! glassdome-cli: the operator CLI surface over the Overseer entity (C6).
//! One process, one [`glassdome_overseer::OverseerEntity`] loaded from the
//! persisted System State file, one gated action, then exit — there is no
//! daemon process in scope for this CLI to talk to (spec.md §1 scopes the
//! FastAPI service wrapper out).

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod exit_error;
mod output;

use clap::{Parser, Subcommand};
use exit_error::ExitError;
use glassdome_overseer::{GlassdomeConfig, OverseerEntity};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "glassdome", about = "Glassdome orchestration and vulnerability-injection lab operator CLI")]
struct Cli {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Identity recorded against submitted requests (spec.md §3 `PendingRequest.user`).
    #[arg(long, default_value = "cli", global = true)]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show aggregate Overseer status
    Status,
    /// List known VMs
    Vms,
    /// Show one VM
    Vm { vm_id: String },
    /// List known hosts
    Hosts,
    /// List requests recorded by the gate
    Requests,
    /// Submit a deploy_vm request
    Deploy {
        platform: String,
        os: String,
        #[arg(long)]
        cores: Option<u64>,
        #[arg(long)]
        memory_mib: Option<u64>,
        #[arg(long)]
        disk_gib: Option<u64>,
        #[arg(long)]
        count: Option<u64>,
    },
    /// Submit a destroy_vm request
    Destroy {
        vm_id: String,
        /// Override the production-VM protection (spec.md §8)
        #[arg(long)]
        force: bool,
    },
    /// Submit a start_vm request
    Start { vm_id: String },
    /// Submit a stop_vm request
    Stop {
        vm_id: String,
        /// Override the production-VM protection (spec.md §8)
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        match err.downcast::<ExitError>() {
            Ok(exit_error) => {
                eprintln!("error: {exit_error}");
                std::process::exit(exit_error.code);
            }
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let entity = OverseerEntity::with_defaults(GlassdomeConfig::from_env())?;

    match cli.command {
        Command::Status => commands::status::handle(&entity, cli.format),
        Command::Vms => commands::vms::handle(&entity, cli.format),
        Command::Vm { vm_id } => commands::vm::handle(&entity, &vm_id, cli.format),
        Command::Hosts => commands::hosts::handle(&entity, cli.format),
        Command::Requests => commands::requests::handle(&entity, cli.format),
        Command::Deploy { platform, os, cores, memory_mib, disk_gib, count } => {
            let spec = commands::mutate::DeploySpec { cores, memory_mib, disk_gib, count };
            commands::mutate::deploy(&entity, &platform, &os, spec, &cli.user, cli.format).await
        }
        Command::Destroy { vm_id, force } => commands::mutate::destroy(&entity, &vm_id, force, &cli.user, cli.format).await,
        Command::Start { vm_id } => commands::mutate::start(&entity, &vm_id, &cli.user, cli.format).await,
        Command::Stop { vm_id, force } => commands::mutate::stop(&entity, &vm_id, force, &cli.user, cli.format).await,
    }
}
