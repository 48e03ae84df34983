use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docwarn",
    version,
    about = "Insert service-scope warning blocks into markdown documentation"
)]
pub struct Cli {
    #[arg(default_value = ".", help = "Base directory the discovery patterns are rooted at")]
    pub root: PathBuf,

    #[arg(long, help = "Configuration file (default: ROOT/docwarn.yaml when present)")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'j', help = "Maximum documents patched concurrently")]
    pub jobs: Option<usize>,

    #[arg(long, help = "Report what would change without writing")]
    pub dry_run: bool,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,

    #[arg(long, help = "Also write daily rotated logs to this directory")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, help = "Print the built-in configuration as YAML and exit")]
    pub print_default_config: bool,
}
