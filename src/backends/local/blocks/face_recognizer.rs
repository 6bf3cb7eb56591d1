// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use crate::backends::local::detection::ImageView;
use crate::backends::local::recognition::{l2_normalize, FaceEmbeddingBackend, LumaGridBackend};
use crate::config::consts::MODEL_PATH_KEY;
use crate::config::{load_recognizer_model, string_option, UnitType};
use crate::context::Context;
use crate::errors::{ProcessError, ServiceError};
use crate::observability::messages::block::{
    BlockProcessCompleted, BlockProcessFailed, BlockProcessStarted,
};
use crate::observability::messages::recognition::TemplatesComputed;
use crate::observability::messages::StructuredLog;
use crate::traits::ProcessingBlock;

use super::face_detector::{FACE_CLASS, OBJECTS_KEY};

pub const TEMPLATE_KEY: &str = "template";
pub const TEMPLATE_SIZE_KEY: &str = "template_size";

const WHOLE_IMAGE: [f64; 4] = [0.0, 0.0, 1.0, 1.0];

/// `FACE_RECOGNIZER` block: writes a unit-length `template` for each face.
///
/// * With an `objects` array (usually from `FACE_DETECTOR`), every object whose
///   `class` is `"face"` or absent gets `template` (Array[Float64]) and
///   `template_size` (Int64) computed from its `bbox`. Other classes are skipped.
/// * Without `objects`, the whole image is treated as one face and a new
///   `{class, bbox, template_size, template}` object is appended.
pub struct FaceRecognizerBlock {
    backend: Box<dyn FaceEmbeddingBackend>,
}

/// Where a computed template goes.
enum Target {
    Existing(usize),
    WholeImage,
}

impl FaceRecognizerBlock {
    /// Binds the recognizer model named by the config's `model_path`.
    pub fn from_config(config: &Context) -> Result<Self, ServiceError> {
        let model_path = string_option(config, MODEL_PATH_KEY)?.ok_or_else(|| {
            ServiceError::InitializationError(format!(
                "{} requires '{}'",
                UnitType::FaceRecognizer,
                MODEL_PATH_KEY
            ))
        })?;
        let model = load_recognizer_model(&model_path)?;
        Ok(Self::with_backend(Box::new(LumaGridBackend::new(model))))
    }

    pub fn with_backend(backend: Box<dyn FaceEmbeddingBackend>) -> Self {
        Self { backend }
    }

    fn embed(&self, image: &ImageView<'_>, bbox: [f64; 4]) -> Result<Vec<f64>, ProcessError> {
        let mut template = self.backend.embed(image, bbox);
        if template.len() != self.backend.template_size() {
            return Err(ProcessError::invalid(format!(
                "backend '{}' produced {} values, expected {}",
                self.backend.name(),
                template.len(),
                self.backend.template_size()
            )));
        }
        l2_normalize(&mut template);
        Ok(template)
    }

    /// Reads everything needed up front so a bad object fails before any write.
    fn plan(&self, ctx: &Context) -> Result<Vec<(Target, Vec<f64>)>, ProcessError> {
        let image = ImageView::from_context(ctx)?;

        let objects = match ctx.get_by_key(OBJECTS_KEY) {
            Ok(objects) if objects.is_array() => objects,
            Ok(objects) if !objects.is_none() => {
                return Err(ProcessError::invalid(format!(
                    "'{}' must be an array, found {}",
                    OBJECTS_KEY,
                    objects.kind()
                )));
            }
            _ => return Ok(vec![(Target::WholeImage, self.embed(&image, WHOLE_IMAGE)?)]),
        };

        let mut planned = Vec::with_capacity(objects.size());
        for (index, object) in objects.iter().enumerate() {
            if !object.is_object() {
                return Err(ProcessError::invalid(format!(
                    "'{}[{}]' must be an object, found {}",
                    OBJECTS_KEY,
                    index,
                    object.kind()
                )));
            }
            if !is_face(object, index)? {
                continue;
            }
            let bbox = read_bbox(object, index)?;
            planned.push((Target::Existing(index), self.embed(&image, bbox)?));
        }
        Ok(planned)
    }

    /// Returns the number of templates written.
    fn run(&self, ctx: &mut Context) -> Result<usize, ProcessError> {
        if !ctx.is_none() && !ctx.is_object() {
            return Err(ProcessError::invalid(format!(
                "io context must be an object, found {}",
                ctx.kind()
            )));
        }

        let planned = self.plan(ctx)?;
        let object_count = ctx.get_by_key(OBJECTS_KEY).map(Context::size).unwrap_or(0);
        TemplatesComputed {
            backend: self.backend.name(),
            faces: planned.len(),
            skipped: object_count.saturating_sub(planned.len()),
            template_size: self.backend.template_size(),
        }
        .log();

        let written = planned.len();
        for (target, template) in planned {
            let object = match target {
                Target::Existing(index) => ctx.get_by_key_mut(OBJECTS_KEY)?.get_by_index_mut(index)?,
                Target::WholeImage => {
                    let object = ctx
                        .get_or_insert_by_key(OBJECTS_KEY)?
                        .push_back(Context::new_object())?;
                    object.get_or_insert_by_key("class")?.set_string(FACE_CLASS)?;
                    let bbox = object.get_or_insert_by_key("bbox")?;
                    for coordinate in WHOLE_IMAGE {
                        bbox.push_back(coordinate)?;
                    }
                    object
                }
            };
            write_template(object, template)?;
        }
        Ok(written)
    }
}

fn is_face(object: &Context, index: usize) -> Result<bool, ProcessError> {
    match object.get_by_key("class") {
        Ok(class) if class.is_none() => Ok(true),
        Ok(class) => class.get_string().map(|c| c == FACE_CLASS).map_err(|e| {
            ProcessError::invalid(format!("'{}[{}].class' must be a string: {}", OBJECTS_KEY, index, e))
        }),
        Err(_) => Ok(true),
    }
}

fn read_bbox(object: &Context, index: usize) -> Result<[f64; 4], ProcessError> {
    let invalid = |detail: String| {
        ProcessError::invalid(format!("'{}[{}].bbox' {}", OBJECTS_KEY, index, detail))
    };
    let bbox = object
        .get_by_key("bbox")
        .map_err(|_| invalid("is missing".to_string()))?;
    if !bbox.is_array() || bbox.size() != 4 {
        return Err(invalid("must be an array of four doubles".to_string()));
    }

    let mut coords = [0.0; 4];
    for (slot, value) in coords.iter_mut().zip(bbox.iter()) {
        *slot = value
            .get_double()
            .map_err(|e| invalid(format!("entries must be doubles: {}", e)))?;
    }
    let [x1, y1, x2, y2] = coords;
    let in_unit = |v: f64| (0.0..=1.0).contains(&v);
    if !coords.iter().all(|v| in_unit(*v)) || x1 > x2 || y1 > y2 {
        return Err(invalid(format!(
            "must be ordered and normalized to [0, 1], got {:?}",
            coords
        )));
    }
    Ok(coords)
}

/// Replaces any previous template on `object`.
fn write_template(object: &mut Context, template: Vec<f64>) -> Result<(), ProcessError> {
    *object.get_or_insert_by_key(TEMPLATE_SIZE_KEY)? = Context::from(template.len() as i64);
    *object.get_or_insert_by_key(TEMPLATE_KEY)? =
        Context::from(template.into_iter().map(Context::from).collect::<Vec<_>>());
    Ok(())
}

impl ProcessingBlock for FaceRecognizerBlock {
    fn process(&mut self, ctx: &mut Context) -> Result<(), ProcessError> {
        let unit_type = self.unit_type().as_str();
        BlockProcessStarted { unit_type }.log();
        let started = Instant::now();

        match self.run(ctx) {
            Ok(objects) => {
                BlockProcessCompleted {
                    unit_type,
                    objects,
                    duration: started.elapsed(),
                }
                .log();
                Ok(())
            }
            Err(error) => {
                BlockProcessFailed {
                    unit_type,
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }

    fn unit_type(&self) -> UnitType {
        UnitType::FaceRecognizer
    }

    fn name(&self) -> &'static str {
        "face_recognizer"
    }
}
