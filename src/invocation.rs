//! Generator invocation parameters and command construction

use crate::error::{LaunchError, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Path the performance harness uses for the generator binary.
pub const DEFAULT_TRX_GENERATOR: &str = "./tests/trx_generator/trx_generator";

/// Contract action a generator should build instead of its default transfer.
///
/// All three fields are required; an action is either fully described or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub action_name: String,
    /// Inline JSON or a path to a JSON file, passed through untouched.
    pub action_data: String,
    pub abi_file: PathBuf,
}

impl ActionDescriptor {
    /// Assemble a descriptor from independently optional parts.
    ///
    /// `Ok(None)` when all parts are missing, an error when only some are.
    pub fn from_parts(
        action_name: Option<String>,
        action_data: Option<String>,
        abi_file: Option<PathBuf>,
    ) -> Result<Option<Self>> {
        match (action_name, action_data, abi_file) {
            (Some(action_name), Some(action_data), Some(abi_file)) => Ok(Some(Self {
                action_name,
                action_data,
                abi_file,
            })),
            (None, None, None) => Ok(None),
            (name, data, abi) => {
                let missing: Vec<&str> = [
                    name.is_none().then_some("action name"),
                    data.is_none().then_some("action data"),
                    abi.is_none().then_some("abi file"),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(LaunchError::InvalidConfiguration(format!(
                    "action requires name, data and abi file; missing {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Everything shared by all generators of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    pub chain_id: String,
    pub last_irreversible_block_id: String,
    pub contract_owner_account: String,
    /// Comma separated account names
    pub accounts: String,
    /// Comma separated private keys
    pub priv_keys: String,
    /// Seconds, forwarded verbatim
    pub trx_gen_duration: String,
    pub log_dir: PathBuf,
    pub action: Option<ActionDescriptor>,
}

impl InvocationSpec {
    /// Build the command line for one generator running at `target_tps`.
    pub fn command_for(&self, program: &Path, target_tps: u64) -> GeneratorCommand {
        let mut args = vec![
            "--chain-id".to_string(),
            self.chain_id.clone(),
            "--last-irreversible-block-id".to_string(),
            self.last_irreversible_block_id.clone(),
            "--contract-owner-account".to_string(),
            self.contract_owner_account.clone(),
            "--accounts".to_string(),
            self.accounts.clone(),
            "--priv-keys".to_string(),
            self.priv_keys.clone(),
            "--trx-gen-duration".to_string(),
            self.trx_gen_duration.clone(),
            "--target-tps".to_string(),
            target_tps.to_string(),
            "--log-dir".to_string(),
            self.log_dir.display().to_string(),
        ];

        if let Some(action) = &self.action {
            args.extend([
                "--action-name".to_string(),
                action.action_name.clone(),
                "--action-data".to_string(),
                action.action_data.clone(),
                "--abi-file".to_string(),
                action.abi_file.display().to_string(),
            ]);
        }

        GeneratorCommand {
            program: program.to_path_buf(),
            target_tps,
            args,
        }
    }
}

/// A fully built generator command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorCommand {
    pub program: PathBuf,
    pub target_tps: u64,
    pub args: Vec<String>,
}

impl fmt::Display for GeneratorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(action: Option<ActionDescriptor>) -> InvocationSpec {
        InvocationSpec {
            chain_id: "cf057bbfb72640471fd910bcb67639c22df9f92470936cddc1ade0e2f2e7dc4f".to_string(),
            last_irreversible_block_id: "0000000a".to_string(),
            contract_owner_account: "eosio".to_string(),
            accounts: "alice,bob".to_string(),
            priv_keys: "KEY1,KEY2".to_string(),
            trx_gen_duration: "60".to_string(),
            log_dir: PathBuf::from("/tmp/trx_logs"),
            action,
        }
    }

    #[test]
    fn test_command_without_action() {
        let cmd = invocation(None).command_for(Path::new("./trx_generator"), 3334);

        assert_eq!(cmd.target_tps, 3334);
        assert_eq!(cmd.args.len(), 16);
        assert_eq!(&cmd.args[12..14], &["--target-tps", "3334"]);
        assert_eq!(&cmd.args[14..16], &["--log-dir", "/tmp/trx_logs"]);
        assert!(!cmd.args.iter().any(|a| a.starts_with("--action")));
        assert!(!cmd.args.iter().any(|a| a == "--abi-file"));
    }

    #[test]
    fn test_command_with_action() {
        let action = ActionDescriptor {
            action_name: "transfer".to_string(),
            action_data: r#"{"from":"alice"}"#.to_string(),
            abi_file: PathBuf::from("eosio.token.abi"),
        };
        let cmd = invocation(Some(action)).command_for(Path::new("./trx_generator"), 4000);

        assert_eq!(cmd.args.len(), 22);
        assert_eq!(
            &cmd.args[16..],
            &[
                "--action-name",
                "transfer",
                "--action-data",
                r#"{"from":"alice"}"#,
                "--abi-file",
                "eosio.token.abi"
            ]
        );
    }

    #[test]
    fn test_action_all_or_nothing() {
        assert_eq!(ActionDescriptor::from_parts(None, None, None).unwrap(), None);

        let full = ActionDescriptor::from_parts(
            Some("transfer".to_string()),
            Some("data.json".to_string()),
            Some(PathBuf::from("token.abi")),
        )
        .unwrap();
        assert!(full.is_some());

        let err = ActionDescriptor::from_parts(Some("transfer".to_string()), None, None)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("action data"));
        assert!(msg.contains("abi file"));
        assert!(!msg.contains("action name"));
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = invocation(None).command_for(Path::new("./trx_generator"), 1);
        let line = cmd.to_string();
        assert!(line.starts_with("./trx_generator --chain-id "));
        assert!(line.ends_with("--target-tps 1 --log-dir /tmp/trx_logs"));
    }
}
