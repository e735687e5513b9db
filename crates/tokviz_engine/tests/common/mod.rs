#![allow(dead_code)]

use std::sync::Once;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Minimal word-level `tokenizer.json` with a Llama-style id layout.
pub const TINY_TOKENIZER_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": null,
  "pre_tokenizer": { "type": "Whitespace" },
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {
      "<unk>": 0,
      "<s>": 1,
      "</s>": 2,
      "▁Hello": 259,
      "Hello": 260,
      "world": 261
    },
    "unk_token": "<unk>"
  }
}"#;
