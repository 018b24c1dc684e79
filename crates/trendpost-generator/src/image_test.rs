use std::sync::Arc;

use trendpost_core::GeneratedImage;
use trendpost_llm::ImageData;

use super::*;
use crate::testing::{image_cache, FakeImages, ImageReply, ScriptedChat};

fn data(b64: Option<&str>, url: Option<&str>) -> ImageData {
    ImageData {
        b64_json: b64.map(ToOwned::to_owned),
        url: url.map(ToOwned::to_owned),
    }
}

#[test]
fn base64_only_becomes_data_uri() {
    let image = normalize_image_data(&[data(Some("QUJD"), None)]);
    assert_eq!(image.image_url(), Some("data:image/png;base64,QUJD"));
}

#[test]
fn url_only_is_passed_through() {
    let image = normalize_image_data(&[data(None, Some("https://cdn.example/img.png"))]);
    assert_eq!(
        image,
        GeneratedImage::Hosted {
            url: "https://cdn.example/img.png".to_string()
        }
    );
}

#[test]
fn base64_is_preferred_over_url() {
    let image = normalize_image_data(&[data(Some("QUJD"), Some("https://cdn.example/img.png"))]);
    assert_eq!(image.image_url(), Some("data:image/png;base64,QUJD"));
}

#[test]
fn neither_field_is_a_failure() {
    let image = normalize_image_data(&[data(None, None)]);
    assert_eq!(image.image_url(), None);
    assert_eq!(image.error(), Some("No image data received"));
    assert_eq!(normalize_image_data(&[]).error(), Some("No image data received"));
}

#[test]
fn only_first_entry_counts() {
    let image = normalize_image_data(&[data(None, None), data(Some("QUJD"), None)]);
    assert!(!image.is_success());
}

#[test]
fn prompt_cleanup_strips_quotes_and_whitespace() {
    assert_eq!(clean_prompt("  \"a red crab\"\n"), "a red crab");
    assert_eq!(clean_prompt("'neon city'"), "neon city");
    assert_eq!(clean_prompt("plain prompt"), "plain prompt");
    assert_eq!(clean_prompt("\"unbalanced"), "\"unbalanced");
}

#[tokio::test]
async fn post_image_uses_derived_prompt() {
    let chat = ScriptedChat::new(["\"A futuristic crab coding in Rust\""]);
    let images = FakeImages::base64("QUJD");
    let generator = ImageGenerator::new(chat.clone(), Some(images.clone()), image_cache());

    let image = generator.generate_for_post("Rust 2.0 is here! 🦀 #rust").await;

    assert_eq!(image.image_url(), Some("data:image/png;base64,QUJD"));
    assert_eq!(
        images.prompts.lock().unwrap().as_slice(),
        ["A futuristic crab coding in Rust".to_string()]
    );
    let request = chat.last_request();
    assert!(request.messages[0]
        .content
        .starts_with("What is the topic of this social media post: Rust 2.0 is here!"));
}

#[tokio::test]
async fn missing_image_client_fails_without_model_calls() {
    let chat = ScriptedChat::new(["prompt"]);
    let generator = ImageGenerator::new(chat.clone(), None, image_cache());

    let image = generator.generate_for_post("post").await;

    assert_eq!(image.error(), Some("No API key configured"));
    assert_eq!(chat.call_count(), 0);
}

#[tokio::test]
async fn provider_error_degrades_to_generic_failure() {
    let chat = ScriptedChat::new(["prompt"]);
    let images = FakeImages::with(ImageReply::Error);
    let generator = ImageGenerator::new(chat, Some(images), image_cache());

    let image = generator.generate_for_post("post").await;
    assert_eq!(image.error(), Some("Failed to generate image"));
}

#[tokio::test]
async fn prompt_derivation_error_degrades_to_generic_failure() {
    let images = FakeImages::base64("QUJD");
    let generator =
        ImageGenerator::new(ScriptedChat::failing(), Some(images.clone()), image_cache());

    let image = generator.generate_for_post("post").await;
    assert_eq!(image.error(), Some("Failed to generate image"));
    assert_eq!(images.call_count(), 0);
}

#[tokio::test]
async fn successful_images_are_cached_per_prompt() {
    let images = FakeImages::base64("QUJD");
    let generator =
        ImageGenerator::new(ScriptedChat::new(["x"]), Some(images.clone()), image_cache());

    let first = generator.generate_from_prompt("A  Red crab").await;
    let second = generator.generate_from_prompt("a red CRAB").await;

    assert_eq!(first, second);
    assert_eq!(images.call_count(), 1);
}

#[tokio::test]
async fn failed_images_are_not_cached() {
    let images = FakeImages::with(ImageReply::Data(Vec::new()));
    let generator =
        ImageGenerator::new(ScriptedChat::new(["x"]), Some(images.clone()), image_cache());

    generator.generate_from_prompt("crab").await;
    generator.generate_from_prompt("crab").await;

    assert_eq!(images.call_count(), 2);
}

#[tokio::test]
async fn long_prompts_sharing_a_prefix_do_not_collide() {
    let images = FakeImages::base64("QUJD");
    let generator =
        ImageGenerator::new(ScriptedChat::new(["x"]), Some(images.clone()), image_cache());
    let prefix = "a".repeat(60);

    generator.generate_from_prompt(&format!("{prefix} one")).await;
    generator.generate_from_prompt(&format!("{prefix} two")).await;

    assert_eq!(images.call_count(), 2);
}
