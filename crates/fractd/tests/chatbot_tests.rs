//! Chatbot rule-table tests.

use fractd::chatbot::respond;

#[test]
fn upload_guidance_needs_both_keywords() {
    let reply = respond("How do I upload an X-ray?");
    assert!(reply.contains("Upload X-Ray Image"));

    // "upload" alone falls through to later rules or the default.
    let reply = respond("upload");
    assert!(!reply.contains("Upload X-Ray Image"));
}

#[test]
fn report_guidance() {
    let reply = respond("Can you generate a report for me?");
    assert!(reply.contains("Download Report"));
}

#[test]
fn result_explanations() {
    assert!(respond("What does the confidence score mean?").contains("certainty"));
    assert!(respond("It says detected, what now?").contains("radiologist"));
    assert!(respond("Why is my result uncertain?").contains("manual review"));
}

#[test]
fn general_questions() {
    assert!(respond("What is a fracture exactly?").contains("partial or complete break"));
    assert!(respond("How accurate is this?").contains("92%"));
}

#[test]
fn navigation_rules() {
    assert!(respond("Where is my history?").contains("'History' tab"));
    assert!(respond("open settings please").contains("'Settings' tab"));
}

#[test]
fn rules_are_case_insensitive() {
    assert_eq!(
        respond("HOW DO I UPLOAD?"),
        respond("how do i upload?")
    );
}

#[test]
fn unknown_messages_get_the_default_reply() {
    let reply = respond("tell me a joke");
    assert!(reply.contains("didn't quite catch that"));
}
