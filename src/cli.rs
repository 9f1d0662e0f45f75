use crate::{
    config::{Config, Credentials},
    devices,
    error::CaptureError,
    metrics::{install_prometheus_recorder, Metrics},
    schema,
    screenshots::{AnimationFormat, Screenshot, ScreenshotService},
    server::{self, AppState},
    signer::RenderClient,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::broadcast;
use tracing::info;

#[derive(Parser)]
#[command(name = "screenshot-signer")]
#[command(about = "Signed screenshot URL service")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        #[arg(short, long, help = "Server port (overrides config)")]
        port: Option<u16>,

        #[arg(long, help = "Bind address (overrides config)")]
        bind: Option<String>,
    },

    /// Sign capture URLs without starting the server
    Sign {
        #[arg(short, long, help = "Target URL to capture")]
        url: String,

        #[arg(short, long, help = "Device preset name")]
        device: Option<String>,

        #[arg(long, help = "Capture the whole page")]
        full_page: bool,

        #[arg(long, help = "One capture per catalog device")]
        all: bool,

        #[arg(long, help = "Animated scrolling capture format (mp4, gif, webm)")]
        format: Option<String>,
    },

    /// List the device preset catalog
    Devices,

    /// Validate a configuration file
    Validate {
        #[arg(short, long, help = "Configuration file to validate")]
        config: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct SignOptions {
    pub url: String,
    pub device: Option<String>,
    pub full_page: bool,
    pub all: bool,
    pub format: Option<String>,
}

pub struct CliRunner {
    pub config: Config,
}

impl CliRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(
        &self,
        command: Commands,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match command {
            Commands::Serve { port, bind } => self.run_serve(port, bind, shutdown).await,
            Commands::Sign {
                url,
                device,
                full_page,
                all,
                format,
            } => {
                self.run_sign(SignOptions {
                    url,
                    device,
                    full_page,
                    all,
                    format,
                })
                .await
            }
            Commands::Devices => self.run_devices(),
            Commands::Validate { config } => self.run_validate(config).await,
        }
    }

    pub async fn run_serve(
        &self,
        port: Option<u16>,
        bind: Option<String>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut config = self.config.clone();
        if let Some(port) = port {
            config.port = port;
        }
        if let Some(bind) = bind {
            config.bind_address = bind;
        }
        config.validate()?;

        let metrics_handle = install_prometheus_recorder()?;
        let state = Arc::new(AppState::new(
            self.build_service()?,
            Metrics::new(),
            metrics_handle,
        ));

        server::serve(&config, state, shutdown).await
    }

    pub async fn run_sign(&self, options: SignOptions) -> Result<(), Box<dyn std::error::Error>> {
        schema::validate_website(&options.url)?;
        let service = self.build_service()?;

        let screenshots = if let Some(format) = &options.format {
            let format: AnimationFormat = format.parse()?;
            match options.device.as_deref() {
                Some(name) => {
                    let preset = Self::require_device(name)?;
                    vec![service.capture_scrolling(&options.url, &preset, format)]
                }
                None => service.capture_scrolling_all(&options.url, format),
            }
        } else if options.all {
            service.capture_all(&options.url)
        } else {
            match options.device.as_deref() {
                Some(name) if !options.full_page => {
                    let preset = Self::require_device(name)?;
                    vec![service.capture(&options.url, &preset)]
                }
                name => {
                    let preset = devices::find_or_full_page(name);
                    vec![service.capture_full_page(&options.url, preset)]
                }
            }
        };

        for screenshot in &screenshots {
            print_screenshot(screenshot);
        }

        Ok(())
    }

    pub fn run_devices(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("{:<12} {:>8} {:>8} {:>6}", "Device", "Width", "Height", "Scale");
        for device in devices::CATALOG {
            println!(
                "{:<12} {:>8} {:>8} {:>6}",
                device.name,
                device.viewport_width,
                device.viewport_height,
                device.device_scale_factor.unwrap_or(1.0),
            );
        }
        println!(
            "{:<12} {:>8} {:>8} {:>6}",
            devices::FULL_PAGE.name,
            "-",
            "-",
            "-"
        );

        Ok(())
    }

    pub async fn run_validate(
        &self,
        config_path: PathBuf,
    ) -> Result<(), Box<dyn std::error::Error>> {
        println!("Validating configuration: {}", config_path.display());

        let config_content = fs::read_to_string(&config_path).await?;
        let config: Config = serde_json::from_str(&config_content)?;
        config.validate()?;

        println!("Configuration is valid:");
        println!("  Bind address: {}", config.bind_address);
        println!("  Port: {}", config.port);
        println!("  API base URL: {}", config.api_base_url);
        println!("  Example URL: {}", config.example_url);

        Ok(())
    }

    fn build_service(&self) -> Result<ScreenshotService, CaptureError> {
        let credentials = Credentials::from_env()?;
        let client = RenderClient::new(
            &credentials.access_key,
            &credentials.secret_key,
            &self.config.api_base_url,
        );

        info!("Render client initialized for {}", self.config.api_base_url);
        Ok(ScreenshotService::new(client, &self.config.example_url))
    }

    fn require_device(name: &str) -> Result<devices::DevicePreset, CaptureError> {
        devices::find(name).ok_or_else(|| CaptureError::UnknownDevice(name.to_string()))
    }
}

fn print_screenshot(screenshot: &Screenshot) {
    let label = match screenshot.format {
        Some(format) => format!("{} [{}]", screenshot.device, format),
        None => screenshot.device.clone(),
    };

    if screenshot.viewport_width > 0 && screenshot.viewport_height > 0 {
        println!(
            "{} ({}x{}): {}",
            label, screenshot.viewport_width, screenshot.viewport_height, screenshot.url
        );
    } else {
        println!("{}: {}", label, screenshot.url);
    }
}

pub fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    Ok(())
}
