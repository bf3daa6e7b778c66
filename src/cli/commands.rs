use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "solcopilot", version, about = "Solidity Copilot chat front-end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web chat front-end and HTTP API
    Serve,

    /// Enter interactive terminal chat mode
    Chat,

    /// Run a single prompt through the pipeline and print the reply
    Ask {
        /// The request to send
        prompt: String,

        /// Also print the intermediate step outputs
        #[arg(short, long)]
        steps: bool,
    },

    /// List the quick-start prompts
    Presets,
}
