//! Launch command implementation
//!
//! Kept apart from main.rs so argument handling and plan building can be
//! unit tested without spawning anything.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use trx_gen_launcher::{
    ActionDescriptor, GeneratorCommand, InvocationSpec, Launcher, PartitionConfig,
    DEFAULT_TRX_GENERATOR,
};

#[derive(Args, Debug, Clone)]
pub struct LaunchArgs {
    /// Chain ID
    pub chain_id: String,

    /// Last irreversible block ID
    pub last_irreversible_block_id: String,

    /// Cluster contract owner account name
    pub contract_owner_account: String,

    /// Comma separated list of account names
    pub accounts: String,

    /// Comma separated list of private keys
    pub priv_keys: String,

    /// How long to run transaction generators (seconds)
    pub trx_gen_duration: String,

    /// Goal transactions per second
    #[arg(allow_negative_numbers = true)]
    pub target_tps: i64,

    /// Maximum amount of transactions per second a single generator can have
    #[arg(allow_negative_numbers = true)]
    pub tps_limit_per_generator: i64,

    /// Path to directory where trx logs should be written
    pub log_dir: PathBuf,

    /// The action name applied to the provided action data input
    pub action_name: Option<String>,

    /// The path to the json action data file or json action data description string to use
    pub action_data: Option<String>,

    /// The path to the contract abi file to use for the supplied transaction action data
    pub abi_file: Option<PathBuf>,

    /// Transaction generator executable
    #[arg(long, default_value = DEFAULT_TRX_GENERATOR)]
    pub trx_generator: PathBuf,

    /// Print the generator partition and command lines as JSON without launching
    #[arg(long)]
    pub dry_run: bool,
}

/// What a run would launch, as printed by `--dry-run`.
#[derive(Debug, Serialize)]
struct LaunchPlan<'a> {
    #[serde(flatten)]
    partition: &'a PartitionConfig,
    generators: Vec<GeneratorCommand>,
}

/// Validate arguments into a partition and the shared invocation.
pub fn resolve(args: &LaunchArgs) -> Result<(PartitionConfig, InvocationSpec)> {
    let partition = PartitionConfig::from_signed(args.target_tps, args.tps_limit_per_generator)?;
    let action = ActionDescriptor::from_parts(
        args.action_name.clone(),
        args.action_data.clone(),
        args.abi_file.clone(),
    )?;

    let invocation = InvocationSpec {
        chain_id: args.chain_id.clone(),
        last_irreversible_block_id: args.last_irreversible_block_id.clone(),
        contract_owner_account: args.contract_owner_account.clone(),
        accounts: args.accounts.clone(),
        priv_keys: args.priv_keys.clone(),
        trx_gen_duration: args.trx_gen_duration.clone(),
        log_dir: args.log_dir.clone(),
        action,
    };

    Ok((partition, invocation))
}

/// Run the launcher and return the process exit code for the whole run.
pub async fn cmd_launch(args: LaunchArgs, verbose: bool) -> Result<i32> {
    let (partition, invocation) = resolve(&args)?;

    info!(
        "Target {} TPS across {} generators (limit {} TPS each): {:?}",
        partition.target_tps(),
        partition.num_generators(),
        partition.tps_limit_per_generator(),
        partition.targets()
    );

    let launcher = Launcher::new(&args.trx_generator, invocation).echo_commands(verbose);

    if args.dry_run {
        let plan = LaunchPlan {
            partition: &partition,
            generators: launcher.commands(partition.targets()),
        };
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(0);
    }

    let result = launcher
        .launch(partition.targets())
        .await
        .with_context(|| {
            format!(
                "failed to launch transaction generators from {}",
                launcher.program().display()
            )
        })?;

    let failed = result.failed_indices();
    if failed.is_empty() {
        info!("All {} transaction generators succeeded", result.len());
    } else {
        warn!(
            "{} of {} transaction generators failed (indices {:?})",
            failed.len(),
            result.len(),
            failed
        );
    }
    println!("{}", serde_json::to_string(result.statuses())?);

    Ok(result.exit_code())
}
