//! CLI command definitions

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// CLI arguments for niagate
#[derive(Parser, Debug)]
#[command(name = "niagate")]
#[command(author, version, about = "Rate-limited tool gateway for the Nia search API")]
#[command(long_about = r#"
niagate exposes a fixed catalogue of search tools (semantic search, browse,
list, read, grep, web search, source lookup) backed by the Nia API, behind a
per-client fixed-window rate limiter.

Configuration files are loaded from (lowest to highest priority):
1. ~/.config/niagate/config.toml   Global config
2. ./niagate.toml                  Project-level config
3. --config <path>                 Explicit config file
4. NIA_* environment variables

Example:
  niagate serve --bind 0.0.0.0:8080
  niagate call grep --args '{"pattern": "TODO", "path": "src/"}'
  niagate tools
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP surface
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },

    /// Print the tool catalogue as JSON Schema
    Tools,

    /// Run a single tool call and print the result
    Call {
        /// Tool name or alias
        tool: String,

        /// Arguments as a JSON object
        #[arg(long, value_name = "JSON", default_value = "{}")]
        args: String,
    },

    /// Show configuration sources and the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call() {
        let cli = Cli::parse_from([
            "niagate",
            "-vv",
            "call",
            "grep",
            "--args",
            r#"{"pattern":"foo"}"#,
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Call { tool, args } => {
                assert_eq!(tool, "grep");
                assert_eq!(args, r#"{"pattern":"foo"}"#);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_bind() {
        let cli = Cli::parse_from(["niagate", "serve", "--bind", "0.0.0.0:8080", "--config", "x.toml"]);
        assert!(matches!(cli.command, Command::Serve { bind: Some(addr) } if addr.port() == 8080));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_call_args_default_to_empty_object() {
        let cli = Cli::parse_from(["niagate", "call", "browse"]);
        assert!(matches!(cli.command, Command::Call { ref args, .. } if args == "{}"));
    }
}
