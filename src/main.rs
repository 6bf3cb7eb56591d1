// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use face_sdk::context::Context;
use face_sdk::imaging::{bboxes_from_context, draw_bboxes, image_to_context};
use face_sdk::service::Service;
use image::{ImageReader, Rgb};
use tracing_subscriber::EnvFilter;

/// Overlay colour for detected faces.
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

#[derive(Parser)]
#[command(name = "face-sdk-demo")]
#[command(about = "Detect faces in images with the face SDK")]
struct Cli {
    /// SDK installation directory (must contain data/models)
    #[arg(long, value_name = "DIR", default_value = ".")]
    sdk_path: PathBuf,

    /// Image to process; repeat to process several concurrently
    #[arg(long = "input-image", value_name = "IMAGE", required = true)]
    input_images: Vec<PathBuf>,

    /// Write each image with its detections drawn on it into this directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Override the detector's confidence threshold
    #[arg(long)]
    confidence_threshold: Option<f64>,

    /// Print each result context as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

/// One decoded image together with its io context.
struct Job {
    path: PathBuf,
    image: image::DynamicImage,
    io: Context,
}

fn load_job(path: &Path) -> anyhow::Result<Job> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let mut io = Context::new();
    image_to_context(&image, &mut io)?;
    Ok(Job {
        path: path.to_path_buf(),
        image,
        io,
    })
}

fn save_overlay(job: &Job, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let mut canvas = job.image.to_rgb8();
    draw_bboxes(&mut canvas, &bboxes_from_context(&job.io)?, BOX_COLOR);

    let name = job
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let target = output_dir.join(format!("{}_faces.png", name));
    canvas
        .save(&target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Cli::parse();

    let service = Service::create_service(&args.sdk_path)?;

    let mut config = service.create_context();
    config.get_or_insert_by_key("unit_type")?.set_string("FACE_DETECTOR")?;
    if let Some(threshold) = args.confidence_threshold {
        config
            .get_or_insert_by_key("confidence_threshold")?
            .set_double(threshold)?;
    }

    let mut jobs = Vec::with_capacity(args.input_images.len());
    for path in &args.input_images {
        jobs.push(load_job(path)?);
    }

    // the batch consumes the io contexts; keep the decoded pictures for overlays
    let inputs = jobs.iter_mut().map(|job| std::mem::take(&mut job.io)).collect();
    let outputs = service.process_batch(&config, inputs).await?;
    for (job, io) in jobs.iter_mut().zip(outputs) {
        job.io = io;
    }

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    for job in &mut jobs {
        if args.json {
            // the pixel blob would drown the output
            job.io.remove("image")?;
            println!("{}", job.io.to_json_string(true)?);
        } else {
            let boxes = bboxes_from_context(&job.io)?;
            println!("{}: {} face(s)", job.path.display(), boxes.len());
            for [x1, y1, x2, y2] in &boxes {
                println!("  [{:.3}, {:.3}, {:.3}, {:.3}]", x1, y1, x2, y2);
            }
        }

        if let Some(dir) = &args.output_dir {
            let written = save_overlay(job, dir)?;
            tracing::info!(path = %written.display(), "Overlay written");
        }
    }

    Ok(())
}
