// ABOUTME: Illustrative photo lookup for exercises and meals
// ABOUTME: Builds the public photo-search URL for a subject term
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

/// Photo search endpoint returning an 800x600 image
pub const PHOTO_SEARCH_BASE: &str = "https://source.unsplash.com/800x600/";

/// Tags appended to every search so results stay on topic
const TOPIC_TAGS: &str = "fitness,food";

/// URL of an illustrative photo for `term`
#[must_use]
pub fn image_url(term: &str) -> String {
    format!(
        "{PHOTO_SEARCH_BASE}?{},{TOPIC_TAGS}",
        urlencoding::encode(term.trim())
    )
}
