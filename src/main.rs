mod cli;

use crate::cli::{Cli, Commands, SourceArgs};
use clap::Parser;
use tracing::{error, info};

use camera_uploader::ServerConfig;
use camera_uploader::application::use_cases::{CaptureController, RunServerUseCase};
use camera_uploader::debug::{DebugConfig, init_logging};
use camera_uploader::domain::capture::{AcquisitionMode, ImageService, ImageSource, NoticeKind};
use camera_uploader::infrastructure::capture::{
    CameraSource, CaptureCapabilities, CommandCamera, FilePickerSource, NativePickerSource,
};
use camera_uploader::infrastructure::http::HttpImageService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let debug_config = match (&cli.log_dir, cli.verbose) {
        (Some(dir), _) => DebugConfig::production(dir),
        (None, true) => DebugConfig::development(),
        (None, false) => DebugConfig::default(),
    };
    if let Err(e) = init_logging(&debug_config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match cli.command {
        Commands::Serve {
            port,
            host,
            uploads_dir,
            body_limit,
        } => {
            info!("Executing serve command...");
            let config = ServerConfig::new(host, port, uploads_dir).with_body_limit(body_limit);
            let use_case = RunServerUseCase::new(config);

            if let Err(e) = use_case.execute().await {
                error!("Server failed: {:#}", e);
                eprintln!("❌ Server failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Commands::Upload {
            server,
            source,
            camera_device,
            camera_program,
        } => {
            let service = HttpImageService::new(server)?;
            let camera = CommandCamera::new(camera_device).with_program(camera_program);
            let source = match select_source(source, camera) {
                Ok(source) => source,
                Err(message) => {
                    eprintln!("❌ {}", message);
                    std::process::exit(1);
                }
            };

            if !upload_once(CaptureController::new(service), source.as_ref()).await {
                std::process::exit(1);
            }
        }
        Commands::List { server } => {
            let service = HttpImageService::new(server)?;
            let mut controller = CaptureController::new(service);

            let listed = controller.refresh_listing().await.is_ok();
            print_notice(&mut controller);
            if !listed {
                std::process::exit(1);
            }
            print_gallery(&controller);
        }
    }

    Ok(())
}

/// Pick the image source, refusing modes this host cannot provide
fn select_source(args: SourceArgs, camera: CommandCamera) -> Result<Box<dyn ImageSource>, String> {
    if let Some(path) = args.file {
        return Ok(Box::new(FilePickerSource::new(path)));
    }

    let picker = NativePickerSource::default();
    let capabilities = CaptureCapabilities::probe(&camera, &picker);

    let (mode, source): (AcquisitionMode, Box<dyn ImageSource>) = if args.camera {
        (AcquisitionMode::Camera, Box::new(CameraSource::new(camera)))
    } else {
        (AcquisitionMode::NativePicker, Box::new(picker))
    };

    if capabilities.supports(mode) {
        Ok(source)
    } else {
        let available: Vec<String> = capabilities
            .available_modes()
            .iter()
            .map(ToString::to_string)
            .collect();
        Err(format!(
            "{} is not available on this host (available: {})",
            mode,
            available.join(", ")
        ))
    }
}

async fn upload_once<S: ImageService>(
    mut controller: CaptureController<S>,
    source: &dyn ImageSource,
) -> bool {
    let acquired = controller.acquire(source).await;
    print_notice(&mut controller);
    if acquired.is_err() {
        return false;
    }

    let submitted = controller.submit().await;
    print_notice(&mut controller);
    if submitted.is_err() {
        return false;
    }

    print_gallery(&controller);
    true
}

fn print_notice<S: ImageService>(controller: &mut CaptureController<S>) {
    if let Some(notice) = controller.current_notice() {
        match notice.kind {
            NoticeKind::Danger => eprintln!("❌ {}", notice.message),
            NoticeKind::Success => println!("✅ {}", notice.message),
            NoticeKind::Info => println!("ℹ️  {}", notice.message),
        }
    }
}

fn print_gallery<S: ImageService>(controller: &CaptureController<S>) {
    if controller.gallery().is_empty() {
        println!("No images uploaded yet.");
    }
    for url in controller.gallery() {
        println!("{}", url);
    }
}
