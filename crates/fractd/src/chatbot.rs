//! Rule-based chatbot.
//!
//! Ordered keyword-conjunction rules over the lowercased message; the
//! first matching rule answers. Falls back to a usage hint.

/// Each rule fires when the message contains every listed keyword.
const RULES: &[(&[&str], &str)] = &[
    (
        &["how", "upload"],
        "To upload an X-ray, navigate to the Dashboard 'Overview' tab and use the 'Upload X-Ray Image' section. You can drag and drop your image or click to select a file.",
    ),
    (
        &["generate", "report"],
        "Once an analysis is complete, a 'Download Report' button will appear in the results panel. Click it to generate a professional PDF medical report.",
    ),
    (
        &["how", "use"],
        "Simply upload an X-ray image in the Analysis tab, click 'Analyze Fracture', and wait for the AI to process it. You'll receive a confidence score and structural details.",
    ),
    (
        &["confidence"],
        "The confidence score reflects the AI model's certainty in its detection. A score above 75% indicates high confidence, while lower scores suggest the need for careful expert review.",
    ),
    (
        &["detected"],
        "A 'Detected' status means the AI has identified patterns in the X-ray consistent with a bone fracture. Please consult a qualified radiologist for clinical confirmation.",
    ),
    (
        &["uncertain"],
        "An 'Uncertain' status means the model found conflicting patterns. In such cases, the system recommends a manual review by a medical professional.",
    ),
    (
        &["what is", "fracture"],
        "A bone fracture is a medical condition where there is a partial or complete break in the continuity of the bone. Our system helps identify these breaks from X-ray imagery.",
    ),
    (
        &["accurate"],
        "Our current model achieves approximately 92% accuracy on standard benchmark datasets like MURA. However, it is designed as a diagnostic aid, not a replacement for human expertise.",
    ),
    (
        &["history"],
        "You can view all your previous analysis results in the 'History' tab of the dashboard.",
    ),
    (
        &["settings"],
        "The 'Settings' tab allows you to configure your profile and system preferences.",
    ),
];

const DEFAULT_RESPONSE: &str = "I'm sorry, I didn't quite catch that. I can help with system navigation, explaining results, or general info about fracture detection. Try asking 'How to upload X-ray?' or 'What is a confidence score?'";

/// Answer a user message.
pub fn respond(message: &str) -> String {
    let lower = message.to_lowercase();
    for (keywords, reply) in RULES {
        if keywords.iter().all(|k| lower.contains(k)) {
            return reply.to_string();
        }
    }
    DEFAULT_RESPONSE.to_string()
}
