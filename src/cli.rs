//! src/cli.rs
//!
//! Command line options of the demo.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

const HELP_TEMPLATE: &str = "{before-help}\
{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Interactive line plot customization demo", long_about = None, help_template = HELP_TEMPLATE)]
pub struct DemoArgs {
    /// number of random samples to plot
    #[arg(long, value_name = "N", default_value_t = 31)]
    pub samples: usize,

    /// a new segment starts every N samples
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub stride: usize,

    /// seed for reproducible samples
    #[arg(long)]
    pub seed: Option<u64>,

    /// draw the line in the laser light style
    #[arg(long, default_value_t = false)]
    pub laser: bool,

    /// delay before a reloaded indicator is mounted again (ms)
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub refresh_delay_ms: u64,

    /// target frame time (ms)
    #[arg(long, value_name = "MS", default_value_t = 50)]
    pub frame_ms: u64,

    /// where log output goes; the terminal belongs to the UI
    #[arg(long, value_name = "PATH", default_value = "lineplot-demo.log")]
    pub log_file: PathBuf,

    /// log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl DemoArgs {
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = DemoArgs::parse_from(["lineplot_customizer"]);
        assert_eq!(args.samples, 31);
        assert_eq!(args.stride, 4);
        assert_eq!(args.seed, None);
        assert!(!args.laser);
        assert_eq!(args.refresh_delay(), Duration::from_millis(100));
        assert_eq!(args.frame_time(), Duration::from_millis(50));
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn overrides() {
        let args = DemoArgs::parse_from([
            "lineplot_customizer",
            "--samples",
            "12",
            "--seed",
            "7",
            "--laser",
            "--frame-ms",
            "0",
        ]);
        assert_eq!(args.samples, 12);
        assert_eq!(args.seed, Some(7));
        assert!(args.laser);
        assert_eq!(args.frame_time(), Duration::from_millis(1));
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        DemoArgs::command().debug_assert();
    }
}
