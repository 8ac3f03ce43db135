use clap::{Parser, Subcommand};

/// Command-line interface definition for filmloc
/// CLI application to set up the film locations SQLite database
#[derive(Parser)]
#[command(
    name = "filmloc",
    version = env!("CARGO_PKG_VERSION"),
    about = "Initialize and reset the film locations database (SQLite)",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create missing tables and clear movies, locations, actors and their links.
    ///
    /// The coordinates and movie_info caches are created if missing but never cleared.
    Init {
        #[arg(long = "backup", help = "Zip the current database before clearing it")]
        backup: bool,

        #[arg(
            long = "dry-run",
            conflicts_with = "backup",
            help = "Run the initialization in a transaction that is rolled back"
        )]
        dry_run: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Inspect and maintain the database
    Db {
        #[arg(long = "info", help = "Show database file, foreign key status and table row counts")]
        info: bool,

        #[arg(long = "check", help = "Check database and foreign key integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup (zip on Windows, tar.gz elsewhere)
        #[arg(long)]
        compress: bool,

        /// Overwrite the destination without asking
        #[arg(long, short = 'f')]
        force: bool,
    },
}
