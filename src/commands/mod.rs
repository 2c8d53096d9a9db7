pub mod describe;
pub mod duration;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod share;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Set your email, the recipient email and the download directory")]
    Init(init::InitArgs),
    #[command(about = "Log a new job, then download or share its summary")]
    Log(log::LogArgs),
    #[command(about = "Edit one job from a job sheet, then download or share it", arg_required_else_help = true)]
    Edit(edit::EditArgs),
    #[command(about = "List the jobs in a job sheet, newest first")]
    List(list::ListArgs),
    #[command(about = "Export or share one job from a job sheet", arg_required_else_help = true)]
    Share(share::ShareArgs),
    #[command(about = "Show the time between two HH:MM times")]
    Duration(duration::DurationArgs),
    #[command(about = "Write a job description from keywords with AI", arg_required_else_help = true)]
    Describe(describe::DescribeArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Log(args) => log::cmd(args).await,
            Commands::Edit(args) => edit::cmd(args).await,
            Commands::List(args) => list::cmd(args),
            Commands::Share(args) => share::cmd(args).await,
            Commands::Duration(args) => duration::cmd(args),
            Commands::Describe(args) => describe::cmd(args).await,
        }
    }
}
