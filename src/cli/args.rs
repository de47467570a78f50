//! CLI argument definitions using clap
//!
//! Commands:
//! - petdb init
//! - petdb query <uri> [--where <clause>] [--arg <value>]... [--sort <order>]
//! - petdb insert <uri>            (payload on stdin)
//! - petdb update <uri> [--where ...] [--arg ...]   (payload on stdin)
//! - petdb delete <uri> [--where ...] [--arg ...]
//! - petdb type <uri>
//! - petdb serve [--port <port>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::store::Selection;

/// petdb - pet records behind a URI router
#[derive(Parser, Debug)]
#[command(name = "petdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./petdb.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Row filter shared by query, update and delete
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionArgs {
    /// SQL WHERE fragment with `?` placeholders
    #[arg(long = "where", value_name = "CLAUSE")]
    pub clause: Option<String>,

    /// Value bound to the next `?` placeholder
    #[arg(long = "arg", value_name = "VALUE")]
    pub args: Vec<String>,
}

impl SelectionArgs {
    /// The selection to hand to the provider, if a clause was given
    pub fn to_selection(&self) -> Option<Selection> {
        self.clause
            .as_ref()
            .map(|clause| Selection::with_text_args(clause.clone(), self.args.iter().cloned()))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the database and create the pets table
    Init,

    /// Print the records addressed by a URI
    Query {
        uri: String,

        #[command(flatten)]
        selection: SelectionArgs,

        /// SQL ORDER BY fragment
        #[arg(long)]
        sort: Option<String>,
    },

    /// Create a record from the JSON object on stdin
    Insert { uri: String },

    /// Apply the JSON object on stdin to the records addressed by a URI
    Update {
        uri: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Delete the records addressed by a URI
    Delete {
        uri: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Print the type identifier of a URI
    Type { uri: String },

    /// Serve the pets resource over HTTP
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_with_selection() {
        let cli = Cli::try_parse_from([
            "petdb", "query", "/pets", "--where", "gender = ?", "--arg", "1", "--sort", "name",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("./petdb.json"));
        match cli.command {
            Command::Query { uri, selection, sort } => {
                assert_eq!(uri, "/pets");
                assert_eq!(selection.clause.as_deref(), Some("gender = ?"));
                assert_eq!(selection.args, vec!["1".to_string()]);
                assert_eq!(sort.as_deref(), Some("name"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_is_global() {
        let cli = Cli::try_parse_from(["petdb", "type", "/pets", "--config", "/etc/petdb.json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/petdb.json"));
        assert_eq!(cli.command, Command::Type { uri: "/pets".into() });
    }

    #[test]
    fn test_selection_without_clause_is_none() {
        let args = SelectionArgs {
            clause: None,
            args: vec!["ignored".into()],
        };
        assert!(args.to_selection().is_none());

        let args = SelectionArgs {
            clause: Some("name = ?".into()),
            args: vec!["Rex".into()],
        };
        let selection = args.to_selection().unwrap();
        assert_eq!(selection.clause(), "name = ?");
        assert_eq!(selection.args().len(), 1);
    }

    #[test]
    fn test_missing_uri_is_rejected() {
        assert!(Cli::try_parse_from(["petdb", "insert"]).is_err());
    }
}
