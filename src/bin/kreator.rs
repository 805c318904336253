//! Headless CLI exposing every Kreator operation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use kreator::ai::AssistantClient;
use kreator::core::config::AppConfig;
use kreator::core::credits::Feature;
use kreator::core::keys::InMemoryCredentialStore;
use kreator::core::models::{ChatMessage, UploadedFile};
use kreator::core::options::{
    DEFAULT_VIDEO_DURATION, VideoDuration, find_image_size, find_style, is_video_aspect_ratio,
};
use kreator::wavespeed::WaveSpeedClient;

#[derive(Parser, Debug)]
#[command(name = "kreator", version, about = "Kreator AI content toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Expand a short idea into a detailed image-generation prompt
    Optimize {
        prompt: String,
    },

    /// Describe an image as Indonesian and English generation prompts
    Analyze {
        image: PathBuf,
    },

    /// Send one chat turn to Kreator Asisten
    Chat {
        message: String,
        /// Attach an image to this turn
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Generate images from a prompt
    Image {
        prompt: String,
        #[arg(long, default_value = "default")]
        style: String,
        #[arg(long, default_value = "1024*1024")]
        size: String,
    },

    /// Apply an edit instruction to an existing image
    Edit {
        image: PathBuf,
        instruction: String,
    },

    /// Combine several images according to a prompt
    Merge {
        #[arg(required = true, num_args = 2..)]
        images: Vec<PathBuf>,
        #[arg(long)]
        prompt: String,
    },

    /// Convert a still image into a 3D model
    To3d {
        image: PathBuf,
    },

    /// Generate a video clip from a prompt
    Video {
        prompt: String,
        #[arg(long, default_value = "16:9")]
        aspect_ratio: String,
        /// Clip length in seconds (5 or 10)
        #[arg(long, default_value_t = DEFAULT_VIDEO_DURATION.seconds())]
        duration: u32,
    },

    /// Animate a still image into a video clip
    Animate {
        image: PathBuf,
        #[arg(long)]
        prompt: String,
        /// Clip length in seconds (5 or 10)
        #[arg(long, default_value_t = DEFAULT_VIDEO_DURATION.seconds())]
        duration: u32,
    },

    /// List display-credit costs per feature
    Costs,
}

fn parse_duration(seconds: u32) -> Result<VideoDuration> {
    VideoDuration::from_seconds(seconds)
        .with_context(|| format!("unsupported duration {seconds}s, use 5 or 10"))
}

fn assistant(config: &AppConfig) -> Result<AssistantClient> {
    let keys = Arc::new(InMemoryCredentialStore::from_env("OPENROUTER_API_KEYS", "Server"));
    Ok(AssistantClient::new(config, keys)?)
}

fn wavespeed(config: &AppConfig) -> Result<WaveSpeedClient> {
    let keys = Arc::new(InMemoryCredentialStore::from_env("WAVESPEED_API_KEYS", "WaveSpeed"));
    Ok(WaveSpeedClient::new(config, keys)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    kreator::setup_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::Optimize { prompt } => {
            let optimized = assistant(&config)?.optimize_prompt(&prompt).await?;
            println!("{optimized}");
        }
        Commands::Analyze { image } => {
            let image = UploadedFile::from_path(&image)?;
            let prompts = assistant(&config)?.analyze_image(&image).await?;
            println!("Versi Indonesia:\n{}\n", prompts.indonesian);
            println!("English Version:\n{}", prompts.english);
        }
        Commands::Chat { message, image } => {
            let image = image.as_deref().map(UploadedFile::from_path).transpose()?;
            let history: Vec<ChatMessage> = Vec::new();
            let reply = assistant(&config)?
                .send_chat_message(&history, &message, image.as_ref())
                .await?;
            println!("{reply}");
        }
        Commands::Image { prompt, style, size } => {
            if find_style(&style).is_none() {
                bail!("unknown style '{style}'");
            }
            if find_image_size(&size).is_none() {
                bail!("unknown size '{size}', use width*height like 1024*1024");
            }
            let urls = wavespeed(&config)?.create_image(&prompt, &style, &size).await?;
            for url in urls {
                println!("{url}");
            }
        }
        Commands::Edit { image, instruction } => {
            let image = UploadedFile::from_path(&image)?;
            let urls = wavespeed(&config)?.edit_image(&image, &instruction).await?;
            for url in urls {
                println!("{url}");
            }
        }
        Commands::Merge { images, prompt } => {
            let images = images
                .iter()
                .map(|p| UploadedFile::from_path(p))
                .collect::<Result<Vec<_>, _>>()?;
            let urls = wavespeed(&config)?.merge_images(&images, &prompt).await?;
            for url in urls {
                println!("{url}");
            }
        }
        Commands::To3d { image } => {
            let image = UploadedFile::from_path(&image)?;
            let urls = wavespeed(&config)?.image_to_3d(&image).await?;
            for url in urls {
                println!("{url}");
            }
        }
        Commands::Video {
            prompt,
            aspect_ratio,
            duration,
        } => {
            if !is_video_aspect_ratio(&aspect_ratio) {
                bail!("unknown aspect ratio '{aspect_ratio}'");
            }
            let duration = parse_duration(duration)?;
            let url = wavespeed(&config)?
                .text_to_video(&prompt, &aspect_ratio, duration)
                .await?;
            println!("{url}");
        }
        Commands::Animate {
            image,
            prompt,
            duration,
        } => {
            let image = UploadedFile::from_path(&image)?;
            let duration = parse_duration(duration)?;
            let url = wavespeed(&config)?
                .image_to_video(&image, &prompt, duration)
                .await?;
            println!("{url}");
        }
        Commands::Costs => {
            for feature in Feature::CATALOG {
                println!("{:<28} {:>4} kredit", feature.label(), feature.display_cost());
            }
        }
    }

    Ok(())
}
