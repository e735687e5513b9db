use std::path::PathBuf;

use clap::Parser;

/// Command line arguments. Values given here override the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "tokviz")]
#[command(about = "See how LLM tokenizers split your text into tokens")]
#[command(version)]
pub struct Args {
    /// RON configuration file (defaults to ./tokviz.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend to start with: llama, mistral or cl100k_base
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Path to the Llama tokenizer.json
    #[arg(long)]
    pub llama_tokenizer: Option<PathBuf>,

    /// Path to the Mistral tokenizer.json
    #[arg(long)]
    pub mistral_tokenizer: Option<PathBuf>,

    /// Initial text; in print mode the text to tokenize (stdin when omitted)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Tokenize once and print to stdout instead of starting the UI
    #[arg(long)]
    pub print: bool,

    /// With --print, show token ids instead of colored text
    #[arg(long, requires = "print")]
    pub ids: bool,

    /// Log file used while the UI owns the terminal
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
