//! Clap derive structures for the `taskdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use taskdeck_core::{DueBucket, TaskStatus};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// taskdeck -- team task management from the command line
#[derive(Debug, Parser)]
#[command(
    name = "taskdeck",
    version,
    about = "Manage projects, tasks, and your team from the command line",
    long_about = "A command-line client for the taskdeck backend.\n\n\
        Caches entities locally per invocation, renders them as tables or\n\
        structured output, and keeps the kanban board responsive with\n\
        optimistic reordering.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "TASKDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "TASKDECK_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TASKDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Shared value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Todo,
    InProgress,
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Todo => Self::ToDo,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Done => Self::Done,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DueArg {
    Overdue,
    Today,
    Week,
    Later,
    None,
}

impl From<DueArg> for DueBucket {
    fn from(arg: DueArg) -> Self {
        match arg {
            DueArg::Overdue => Self::Overdue,
            DueArg::Today => Self::Today,
            DueArg::Week => Self::ThisWeek,
            DueArg::Later => Self::Later,
            DueArg::None => Self::NoDate,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with email and password
    Login(LoginArgs),

    /// Create an account and log in
    Signup(SignupArgs),

    /// Log out and clear the cached session
    Logout,

    /// Show the logged-in user
    Whoami(WhoamiArgs),

    /// Manage projects
    #[command(alias = "proj", alias = "p")]
    Projects(ProjectsArgs),

    /// Manage tasks
    #[command(alias = "t")]
    Tasks(TasksArgs),

    /// Kanban board views and moves
    #[command(alias = "b")]
    Board(BoardArgs),

    /// Manage the team directory
    Team(TeamArgs),

    /// Task counts by status and project
    Analytics(AnalyticsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address (prompted if omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long, short = 'e')]
    pub email: String,
}

#[derive(Debug, Args)]
pub struct WhoamiArgs {
    /// Refresh the profile from the server first
    #[arg(long)]
    pub refresh: bool,
}

// ── Projects ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List projects, one page at a time
    #[command(alias = "ls")]
    List {
        /// Page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Create a project
    Create {
        /// Project name
        #[arg(long)]
        name: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Member emails (repeatable)
        #[arg(long = "member")]
        members: Vec<String>,
    },

    /// Update a project
    Update {
        /// Project id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a project
    #[command(alias = "rm")]
    Delete {
        /// Project id
        id: String,
    },

    /// List a project's members
    Members {
        /// Project id
        id: String,
    },

    /// Add a member to a project by email
    AddMember {
        /// Project id
        id: String,

        /// Member email
        email: String,
    },
}

// ── Tasks ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: TasksCommand,
}

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// List tasks, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Limit to one project
        #[arg(long)]
        project: Option<String>,

        /// Substring search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<StatusArg>,

        /// Filter by assignee name ("none" for unassigned)
        #[arg(long)]
        assignee: Option<String>,

        /// Filter by due-date bucket
        #[arg(long)]
        due: Option<DueArg>,
    },

    /// Create a task
    Create {
        /// Project id
        #[arg(long)]
        project: String,

        /// Task title
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Assignee member id
        #[arg(long)]
        assignee: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Initial status
        #[arg(long)]
        status: Option<StatusArg>,
    },

    /// Update a task
    Update {
        /// Task id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// New status
        #[arg(long)]
        status: Option<StatusArg>,

        /// Assignee member id ("none" to unassign)
        #[arg(long)]
        assignee: Option<String>,

        /// Due date (YYYY-MM-DD, "none" to clear)
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task id
        id: String,
    },

    /// List a task's comments
    Comments {
        /// Task id
        id: String,
    },

    /// Add a comment to a task
    Comment {
        /// Task id
        id: String,

        /// Comment text
        text: String,
    },
}

// ── Board ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BoardArgs {
    #[command(subcommand)]
    pub command: BoardCommand,
}

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Show the kanban board for a project
    Show {
        /// Project id
        project: String,
    },

    /// Move a task to a column position (optimistic, rolls back on failure)
    Move {
        /// Task id
        task: String,

        /// Destination column
        #[arg(long)]
        to: StatusArg,

        /// Position within the column (default: end)
        #[arg(long)]
        index: Option<usize>,
    },
}

// ── Team ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// List the member directory
    #[command(alias = "ls")]
    List,

    /// Remove a member (owner only)
    #[command(alias = "rm")]
    Remove {
        /// Member id
        id: String,
    },
}

// ── Analytics ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    /// Limit to one project
    #[arg(long)]
    pub project: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the resolved configuration
    Show,

    /// Set the backend URL for a profile
    SetServer {
        /// Backend URL
        url: String,
    },
}
