use crate::{
    api::gemini::DescriptionGenerator,
    libs::messages::Message,
    msg_error_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Keywords describing the work, e.g. "replaced tap fixed leak"
    #[arg(required = true)]
    keywords: Vec<String>,
}

pub async fn cmd(args: DescribeArgs) -> Result<()> {
    let generator = DescriptionGenerator::from_env()?;

    msg_info!(Message::GeneratingDescription);
    let description = generator
        .generate(&args.keywords.join(" "))
        .await
        .map_err(|_| msg_error_anyhow!(Message::GenerationFailed))?;

    msg_print!(description);
    Ok(())
}
