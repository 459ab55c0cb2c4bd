use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "todo",
    about = "A to-do list that keeps its state in a defaults file",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Defaults file holding the list and its settings
    #[arg(long, global = true, default_value = ".todo-defaults")]
    pub store: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add an item
    Add(AddArgs),
    /// List visible items
    List,
    /// Mark a visible item done or not done
    Toggle(ToggleArgs),
    /// Show or hide completed items
    ShowCompleted,
    /// Remove the list and its settings
    Clear,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true)]
    pub name: Vec<String>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Row number as shown by `list` (starting at 1)
    pub row: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_joins_words() {
        let cli = Cli::try_parse_from(["todo", "add", "buy", "milk"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.name.join(" "), "buy milk");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_add_requires_name() {
        assert!(Cli::try_parse_from(["todo", "add"]).is_err());
    }

    #[test]
    fn parse_list_defaults() {
        let cli = Cli::try_parse_from(["todo", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
        assert_eq!(cli.store, PathBuf::from(".todo-defaults"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_toggle_row() {
        let cli = Cli::try_parse_from(["todo", "toggle", "3"]).unwrap();
        if let Command::Toggle(args) = cli.command {
            assert_eq!(args.row, 3);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_toggle_rejects_non_number() {
        assert!(Cli::try_parse_from(["todo", "toggle", "first"]).is_err());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "todo", "list", "--store", "/tmp/todo.bin", "--format", "json", "-v",
        ])
        .unwrap();
        assert_eq!(cli.store, PathBuf::from("/tmp/todo.bin"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_show_completed_and_clear() {
        let cli = Cli::try_parse_from(["todo", "show-completed"]).unwrap();
        assert!(matches!(cli.command, Command::ShowCompleted));
        let cli = Cli::try_parse_from(["todo", "clear"]).unwrap();
        assert!(matches!(cli.command, Command::Clear));
    }
}
