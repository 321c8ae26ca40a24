//! Deterministic fallback classifier.
//!
//! Produces a stable pseudo-classification from the upload's name and size
//! when the analysis daemon cannot be reached. Primary path is the remote
//! engine; this is the timeout/network-failure substitute, so identical
//! inputs must keep yielding identical results across calls.

use rand::Rng;
use tracing::debug;

use crate::types::{BoneType, ClassificationResult, BONE_ORDER};

/// Seed used when no file is supplied.
pub const DEFAULT_SEED: &str = "default-seed";

/// Keyword override rules, checked in order; first match wins.
const OVERRIDE_RULES: &[(&[&str], BoneType)] = &[
    (&["wrist", "forearm", "arm"], BoneType::Wrist),
    (&["elbow"], BoneType::Elbow),
    (&["hand", "finger", "palm"], BoneType::Hand),
    (&["shoulder", "clavicle", "humerus"], BoneType::Shoulder),
    (&["ankle", "foot", "tibia"], BoneType::Ankle),
];

/// File-name substrings that force the fracture flag on.
const FRACTURE_HINTS: [&str; 5] = ["frac", "pos", "break", "displace", "severe"];

/// Recommendations when a fracture is flagged.
const FRACTURE_RECOMMENDATIONS: [&str; 3] = [
    "Immediate orthopedic consultation recommended",
    "Immobilization with cast or splint",
    "Follow-up X-ray in 2 weeks",
];

/// Recommendations for a normal read.
const NORMAL_RECOMMENDATIONS: [&str; 3] = [
    "No acute intervention required",
    "Monitor for persistent pain or swelling",
    "Routine follow-up if symptoms continue",
];

/// 32-bit string hash over UTF-16 code units with wraparound at every
/// step: `h = (h << 5) - h + unit`. Must stay wrapping i32 arithmetic,
/// never widened, or seeds stop matching across implementations.
pub fn seed_hash(seed: &str) -> i32 {
    let mut h: i32 = 0;
    for unit in seed.encode_utf16() {
        h = h
            .wrapping_shl(5)
            .wrapping_sub(h)
            .wrapping_add(i32::from(unit));
    }
    h
}

/// Build the classifier seed from file name and size.
pub fn seed_for(file_name: Option<&str>, file_size: u64) -> String {
    match file_name {
        Some(name) if !name.is_empty() => format!("{}-{}", name, file_size),
        _ => DEFAULT_SEED.to_string(),
    }
}

/// `abs(h) % 100 / 100`, the hash folded into [0.0, 0.99].
fn normalized_hash(h: i32) -> f64 {
    ((i64::from(h) % 100).abs() as f64) / 100.0
}

/// Hash-derived base bone type, before keyword overrides.
fn base_bone_type(h: i32) -> BoneType {
    let index = (i64::from(h).abs() % BONE_ORDER.len() as i64) as usize;
    BoneType::from_index(index)
}

/// Apply the keyword override rules to the lowercased file name.
fn keyword_override(lower_name: &str) -> Option<BoneType> {
    for (keywords, bone) in OVERRIDE_RULES {
        if keywords.iter().any(|k| lower_name.contains(k)) {
            return Some(*bone);
        }
    }
    None
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Fixed recommendation list for the given fracture branch.
pub fn recommendations_for(fracture_detected: bool) -> Vec<String> {
    let list = if fracture_detected {
        FRACTURE_RECOMMENDATIONS
    } else {
        NORMAL_RECOMMENDATIONS
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// Classify an upload locally. Never fails; always returns a fully
/// populated result.
pub fn classify(file_name: Option<&str>, file_size: u64) -> ClassificationResult {
    classify_with(file_name, file_size, &mut rand::thread_rng())
}

/// Classifier with an injectable RNG for the fracture-branch confidence
/// draw. That draw is the one non-deterministic step in an otherwise
/// deterministic function (kept to match observed behavior; tests pass a
/// seeded RNG).
pub fn classify_with<R: Rng>(
    file_name: Option<&str>,
    file_size: u64,
    rng: &mut R,
) -> ClassificationResult {
    let seed = seed_for(file_name, file_size);
    let h = seed_hash(&seed);

    let lower_name = file_name.unwrap_or("").to_lowercase();
    let bone_type = keyword_override(&lower_name).unwrap_or_else(|| base_bone_type(h));

    let is_likely_fracture = FRACTURE_HINTS.iter().any(|k| lower_name.contains(k));

    // Same hash function over the same seed; the two computations must be
    // numerically identical.
    let normalized = normalized_hash(seed_hash(&seed));
    let fracture_detected = is_likely_fracture || normalized > 0.40;

    debug!(
        "Fallback classification for seed {:?}: bone {}, fracture {}",
        seed, bone_type, fracture_detected
    );

    let confidence = if fracture_detected {
        round1(rng.gen_range(94.0..99.0))
    } else {
        round1(normalized * 25.0 + 70.0)
    };

    ClassificationResult {
        bone_type,
        fracture_detected,
        confidence,
        location: bone_type.location().to_string(),
        recommendations: recommendations_for(fracture_detected),
    }
}
