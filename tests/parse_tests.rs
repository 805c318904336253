use kreator::ai::ChatCompletion;
use kreator::ai::parse::{
    ENGLISH_PROMPT_FALLBACK, INDONESIAN_PROMPT_FALLBACK, bilingual_prompt, message_text,
};
use kreator::errors::KreatorError;

fn completion(content: &str) -> ChatCompletion {
    serde_json::from_value(serde_json::json!({
        "choices": [{"message": {"content": content}}]
    }))
    .expect("test completion parses")
}

#[test]
fn test_message_text_returns_first_choice_content() {
    let text = message_text("Chatbot", &completion("  halo dunia  ")).unwrap();
    // Trimming is the caller's concern; the extractor returns content as-is
    assert_eq!(text, "  halo dunia  ");
}

#[test]
fn test_message_text_rejects_missing_choices() {
    let empty: ChatCompletion = serde_json::from_str("{}").unwrap();
    let err = message_text("Chatbot", &empty).unwrap_err();
    assert!(matches!(err, KreatorError::InvalidResponse { .. }));
}

#[test]
fn test_message_text_rejects_empty_content() {
    let err = message_text("Optimasi prompt", &completion("")).unwrap_err();
    assert!(matches!(err, KreatorError::InvalidResponse { .. }));
}

#[test]
fn test_bilingual_prompt_splits_on_delimiter_and_strips_headers() {
    let prompts =
        bilingual_prompt("Versi Indonesia: Foto kucing\n---\nEnglish Version: Cat photo");
    assert_eq!(prompts.indonesian, "Foto kucing");
    assert_eq!(prompts.english, "Cat photo");
}

#[test]
fn test_bilingual_prompt_headers_are_optional_and_case_insensitive() {
    let prompts = bilingual_prompt("versi indonesia:   Lukisan senja\n---\nSunset painting");
    assert_eq!(prompts.indonesian, "Lukisan senja");
    assert_eq!(prompts.english, "Sunset painting");
}

#[test]
fn test_missing_delimiter_keeps_first_section_and_falls_back_for_english() {
    let prompts = bilingual_prompt("Versi Indonesia: Foto pantai saat senja");
    assert_eq!(prompts.indonesian, "Foto pantai saat senja");
    assert_eq!(prompts.english, ENGLISH_PROMPT_FALLBACK);
}

#[test]
fn test_empty_sections_use_both_fallbacks() {
    let prompts = bilingual_prompt("   ");
    assert_eq!(prompts.indonesian, INDONESIAN_PROMPT_FALLBACK);
    assert_eq!(prompts.english, ENGLISH_PROMPT_FALLBACK);
}

#[test]
fn test_header_only_section_counts_as_missing() {
    let prompts = bilingual_prompt("Versi Indonesia:\n---\nEnglish Version: A cat");
    assert_eq!(prompts.indonesian, INDONESIAN_PROMPT_FALLBACK);
    assert_eq!(prompts.english, "A cat");
}

#[test]
fn test_extra_delimiters_only_first_two_sections_are_used() {
    let prompts = bilingual_prompt(
        "Versi Indonesia: Kucing\n---\nEnglish Version: Cat\n---\nignored trailing section",
    );
    assert_eq!(prompts.indonesian, "Kucing");
    assert_eq!(prompts.english, "Cat");
}

#[test]
fn test_sections_are_trimmed_around_the_delimiter() {
    let prompts = bilingual_prompt("  Versi Indonesia: Hutan pinus  \n --- \n  English Version: Pine forest  ");
    assert_eq!(prompts.indonesian, "Hutan pinus");
    assert_eq!(prompts.english, "Pine forest");
}
