// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Confidence filtering and greedy non-maximum suppression.

use super::Candidate;

/// Intersection over union of two boxes; `0.0` when either box is empty.
pub fn iou(a: &Candidate, b: &Candidate) -> f64 {
    let ix = (a.x2.min(b.x2) - a.x1.max(b.x1)).max(0.0);
    let iy = (a.y2.min(b.y2) - a.y1.max(b.y1)).max(0.0);
    let intersection = ix * iy;
    let union = a.area() + b.area() - intersection;
    if union <= 0.0 {
        0.0
    } else {
        intersection / union
    }
}

/// Drops candidates below `confidence_threshold` and any non-finite ones.
pub fn filter_by_confidence(candidates: Vec<Candidate>, confidence_threshold: f64) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| c.is_finite() && c.confidence >= confidence_threshold)
        .collect()
}

/// Greedy NMS: visits candidates by descending confidence and keeps one only if
/// its overlap with every kept box is at most `iou_threshold`.
///
/// The result is ordered by descending confidence; ties keep input order.
pub fn non_max_suppression(mut candidates: Vec<Candidate>, iou_threshold: f64) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept.iter().all(|k| iou(k, &candidate) <= iou_threshold) {
            kept.push(candidate);
        }
    }
    kept
}
