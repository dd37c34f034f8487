use camera_uploader::config::{DEFAULT_BODY_LIMIT, DEFAULT_PORT, DEFAULT_UPLOADS_DIR};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "camera-uploader",
    version,
    about = "Capture or pick an image and upload it to a small image service",
    long_about = "Runs a disk-backed image upload service with a browser capture UI, \
                  and uploads images to it from the command line"
)]
pub struct Cli {
    /// Write JSON logs into a daily rolling file in this directory
    #[arg(long, global = true, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the upload service and web UI
    Serve {
        /// Port to bind the web server to
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Host to bind the web server to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Directory that stores uploaded images
        #[arg(long, env = "UPLOADS_DIR", default_value = DEFAULT_UPLOADS_DIR)]
        uploads_dir: PathBuf,
        /// Maximum request body size in bytes
        #[arg(long, default_value_t = DEFAULT_BODY_LIMIT)]
        body_limit: usize,
    },
    /// Acquire one image and upload it
    Upload {
        /// Base URL of the upload service
        #[arg(short, long, env = "UPLOAD_SERVER", default_value = "http://localhost:3000")]
        server: String,
        #[command(flatten)]
        source: SourceArgs,
        /// Camera device used with --camera
        #[arg(long, default_value = "/dev/video0")]
        camera_device: PathBuf,
        /// Program that grabs the frame
        #[arg(long, env = "CAMERA_PROGRAM", default_value = "ffmpeg")]
        camera_program: String,
    },
    /// Print the URLs of every uploaded image
    List {
        /// Base URL of the upload service
        #[arg(short, long, env = "UPLOAD_SERVER", default_value = "http://localhost:3000")]
        server: String,
    },
}

/// Where the image comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Upload an existing image file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Capture a frame from the camera
    #[arg(long)]
    pub camera: bool,
    /// Choose a file with the desktop's native picker
    #[arg(long)]
    pub picker: bool,
}
